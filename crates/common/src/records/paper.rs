//! Validated paper records
//!
//! These are the node-level entities of the citation network. A `PaperId` is
//! a pure function of the normalized title, first-author surname, and year,
//! so the same logical paper maps to the same node across runs and datasets.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Stable paper identifier: 16 hex characters derived from normalized metadata
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaperId(String);

impl PaperId {
    /// Wrap an already-derived identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PaperId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<PaperId> for String {
    fn from(id: PaperId) -> Self {
        id.0
    }
}

/// An author reference on a paper
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorRef {
    /// Name as printed on the paper
    pub display_name: String,

    /// Normalized form used for identity matching
    pub normalized_name: String,

    /// 1-based order in the author list
    pub position: u32,
}

/// An outgoing citation, optionally resolved to a corpus paper
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CitationRecord {
    /// Raw bibliography entry text
    pub raw_text: String,

    pub title: Option<String>,

    pub authors: Vec<String>,

    pub year: Option<i32>,

    pub journal: Option<String>,

    pub doi: Option<String>,

    /// Identifier of the matched corpus paper; None for external references
    pub resolved_target: Option<PaperId>,
}

/// A validated paper record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaperRecord {
    pub id: PaperId,

    pub title: String,

    /// Lowercased, whitespace-collapsed title used for matching
    pub normalized_title: String,

    /// Ordered author list
    pub authors: Vec<AuthorRef>,

    pub year: Option<i32>,

    pub journal: Option<String>,

    pub doi: Option<String>,

    pub arxiv_id: Option<String>,

    pub keywords: BTreeSet<String>,

    /// Outgoing citations as authored by this paper
    pub citations: Vec<CitationRecord>,
}

impl PaperRecord {
    /// First author, if any
    pub fn first_author(&self) -> Option<&AuthorRef> {
        self.authors.first()
    }

    /// Normalized surnames of all authors
    pub fn author_surnames(&self) -> BTreeSet<String> {
        self.authors
            .iter()
            .filter_map(|a| {
                a.normalized_name
                    .rsplit(' ')
                    .next()
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
            })
            .collect()
    }
}
