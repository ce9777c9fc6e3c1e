//! Raw input records from the extraction pipeline
//!
//! Every field is optional or defaulted: upstream bibliography parsing is
//! noisy and absent keys must never fail deserialization. Years arrive as
//! free-form JSON values (integers or strings) and are parsed at the
//! normalization boundary.

use serde::{Deserialize, Serialize};

/// A paper as emitted by the extraction pipeline
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPaper {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub authors: Vec<RawAuthor>,

    #[serde(default)]
    pub publication_info: Option<RawPublicationInfo>,

    #[serde(default)]
    pub doi: Option<String>,

    #[serde(default)]
    pub arxiv_id: Option<String>,

    #[serde(default)]
    pub keywords: Vec<String>,

    #[serde(default)]
    pub citations: Vec<RawCitation>,
}

/// Author entry in a raw paper record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawAuthor {
    #[serde(default)]
    pub name: String,

    /// 1-based position in the author list
    #[serde(default)]
    pub position: Option<u32>,
}

/// Publication metadata block
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPublicationInfo {
    /// Publication year; integer or string depending on the parser
    #[serde(default)]
    pub year: Option<serde_json::Value>,

    #[serde(default)]
    pub journal: Option<String>,

    #[serde(default)]
    pub volume: Option<String>,

    #[serde(default)]
    pub issue: Option<String>,

    #[serde(default)]
    pub pages: Option<String>,
}

/// An outgoing citation as parsed from a paper's bibliography
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawCitation {
    /// Raw bibliography entry text
    #[serde(default)]
    pub text: Option<String>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub authors: Vec<String>,

    #[serde(default)]
    pub year: Option<serde_json::Value>,

    #[serde(default)]
    pub journal: Option<String>,

    #[serde(default)]
    pub doi: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_record() {
        let paper: RawPaper = serde_json::from_str(r#"{"title": "A Study"}"#).unwrap();
        assert_eq!(paper.title.as_deref(), Some("A Study"));
        assert!(paper.authors.is_empty());
        assert!(paper.citations.is_empty());
    }

    #[test]
    fn test_deserialize_empty_object() {
        let paper: RawPaper = serde_json::from_str("{}").unwrap();
        assert!(paper.title.is_none());
        assert!(paper.publication_info.is_none());
    }

    #[test]
    fn test_year_accepts_string_and_int() {
        let info: RawPublicationInfo =
            serde_json::from_str(r#"{"year": "2019", "journal": "Nature"}"#).unwrap();
        assert!(info.year.is_some());

        let info: RawPublicationInfo = serde_json::from_str(r#"{"year": 2019}"#).unwrap();
        assert!(info.year.is_some());
    }
}
