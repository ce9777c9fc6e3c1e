//! Paper dump loading
//!
//! Reads the JSON produced by the extraction pipeline: either a top-level
//! array of paper records or an object with a `papers` array.

use crate::errors::LoaderError;
use paperscope_common::records::RawPaper;
use std::path::Path;
use tracing::{debug, info};

/// Load raw paper records from a JSON dump
pub fn load_papers(path: &Path) -> Result<Vec<RawPaper>, LoaderError> {
    if !path.exists() {
        return Err(LoaderError::FileNotFound(path.display().to_string()));
    }

    let raw = std::fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&raw)?;

    let papers: Vec<RawPaper> = match value {
        serde_json::Value::Array(_) => serde_json::from_value(value)?,
        serde_json::Value::Object(mut map) => match map.remove("papers") {
            Some(papers) => serde_json::from_value(papers)?,
            None => {
                return Err(LoaderError::InvalidDump {
                    message: "expected an array or an object with a `papers` key".to_string(),
                })
            }
        },
        _ => {
            return Err(LoaderError::InvalidDump {
                message: "expected an array or an object with a `papers` key".to_string(),
            })
        }
    };

    info!(path = %path.display(), papers = papers.len(), "Paper dump loaded");
    debug!(
        with_citations = papers.iter().filter(|p| !p.citations.is_empty()).count(),
        "Dump statistics"
    );

    Ok(papers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_temp(name: &str, content: &str) -> PathBuf {
        let path =
            std::env::temp_dir().join(format!("paperscope_input_{}_{}", std::process::id(), name));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_array_dump() {
        let path = write_temp("array.json", r#"[{"title": "A"}, {"title": "B"}]"#);
        let papers = load_papers(&path).unwrap();
        assert_eq!(papers.len(), 2);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_wrapped_dump() {
        let path = write_temp("wrapped.json", r#"{"papers": [{"title": "A"}]}"#);
        let papers = load_papers(&path).unwrap();
        assert_eq!(papers.len(), 1);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_file() {
        let err = load_papers(Path::new("/nonexistent/papers.json")).unwrap_err();
        assert!(matches!(err, LoaderError::FileNotFound(_)));
    }

    #[test]
    fn test_invalid_dump_shape() {
        let path = write_temp("scalar.json", "42");
        let err = load_papers(&path).unwrap_err();
        assert!(matches!(err, LoaderError::InvalidDump { .. }));
        std::fs::remove_file(&path).ok();
    }
}
