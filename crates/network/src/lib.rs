//! PaperScope Citation Network Core
//!
//! Builds and analyzes networks over extracted academic paper metadata:
//! - Citation matching (entity resolution against the corpus)
//! - Five derived graph structures (citation, co-citation, bibliographic
//!   coupling, author collaboration, keyword co-occurrence)
//! - Structural metrics and per-node centrality scores
//! - Bibliometric aggregates (h-index, generational citation influence)
//! - JSON node-link and paired-CSV export
//!
//! All computation is synchronous and in-memory; every analysis invocation
//! owns its own `NetworkAnalyzer` instance and graph objects.

pub mod analyzer;
pub mod authors;
pub mod builder;
pub mod centrality;
pub mod export;
pub mod graph;
pub mod influence;
pub mod matcher;
pub mod metrics;

// Re-export commonly used types
pub use analyzer::{
    analyze_citation_networks, build_citation_network, AnalysisReport, NetworkAnalyzer,
    NetworkReport, NetworkSummary, ProcessingStatus,
};
pub use authors::{analyze_author_metrics, AuthorMetrics};
pub use centrality::{calculate_centrality_metrics, CentralityKind};
pub use export::{export_network_to_path, ExportError, ExportFormat};
pub use graph::{EdgeAttrs, Network, NetworkKind, NodeAttrs, NodeKind};
pub use influence::{analyze_citation_influence, CitationInfluence};
pub use matcher::{CorpusIndex, ExactDoiMatcher, HeuristicMatcher, PaperMatcher};
pub use metrics::{calculate_network_metrics, MostCitedPaper, NetworkMetrics};
