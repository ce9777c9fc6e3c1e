//! PaperScope Common Library
//!
//! Shared code for the PaperScope analysis crates including:
//! - Typed paper, author, and citation records
//! - Metadata normalization and stable paper identifiers
//! - Error types and handling
//! - Configuration management

pub mod config;
pub mod errors;
pub mod normalize;
pub mod records;

// Re-export commonly used types
pub use config::{AnalysisConfig, AppConfig};
pub use errors::{AnalysisError, Result};
pub use records::{AuthorRef, CitationRecord, PaperId, PaperRecord, RawPaper};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Length of the hex-encoded paper identifier
pub const PAPER_ID_LEN: usize = 16;
