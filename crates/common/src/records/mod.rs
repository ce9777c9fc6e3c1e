//! Paper, author, and citation records
//!
//! `raw` mirrors the loosely-typed input contract produced by the extraction
//! pipeline; `paper` holds the validated internal records the rest of the
//! pipeline works with. Validation happens exactly once, at the
//! normalization boundary.

mod paper;
mod raw;

pub use paper::{AuthorRef, CitationRecord, PaperId, PaperRecord};
pub use raw::{RawAuthor, RawCitation, RawPaper, RawPublicationInfo};
