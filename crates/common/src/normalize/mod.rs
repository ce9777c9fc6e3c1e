//! Metadata normalization and stable paper identifiers
//!
//! Canonicalizes raw paper records into typed `PaperRecord`s and derives the
//! stable identifier used as the node key in every network. Normalization is
//! the system's sole identity-resolution mechanism: it is intentionally
//! heuristic and may under- or over-merge on pathological metadata.

use crate::records::{AuthorRef, CitationRecord, PaperId, PaperRecord, RawCitation, RawPaper};
use regex_lite::Regex;
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Normalize a title for matching: lowercase, trim, collapse internal
/// whitespace, strip trailing punctuation.
pub fn normalize_title(text: &str) -> String {
    let collapsed = text
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    collapsed
        .trim_end_matches(['.', ',', ';', ':', '!', '?'])
        .trim()
        .to_string()
}

/// Normalize an author name: lowercase, strip punctuation, collapse whitespace.
///
/// "A. Johnson" and "a johnson" normalize identically; "Alice Johnson" does
/// not collapse to either (initials are kept as-is).
pub fn normalize_name(name: &str) -> String {
    name.replace(['.', ','], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Normalized surname: last token of the normalized name
pub fn surname(name: &str) -> Option<String> {
    let normalized = normalize_name(name);
    normalized
        .rsplit(' ')
        .next()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Extract the first DOI found in free text
pub fn extract_doi(text: &str) -> Option<String> {
    let pattern = Regex::new(r"10\.\d{4,9}/[-._;()/:A-Za-z0-9]+").unwrap();
    pattern.find(text).map(|m| {
        m.as_str()
            .trim_end_matches(['.', ',', ';'])
            .to_lowercase()
    })
}

/// Extract the first arXiv identifier found in free text
pub fn extract_arxiv_id(text: &str) -> Option<String> {
    let pattern = Regex::new(r"(?i)arxiv[:\s]+(\d{4}\.\d{4,5})").unwrap();
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Canonical arXiv id: lowercase, without the scheme prefix
fn normalize_arxiv_id(id: &str) -> String {
    let trimmed = id.trim().to_lowercase();
    trimmed
        .strip_prefix("arxiv:")
        .unwrap_or(&trimmed)
        .trim()
        .to_string()
}

/// Derive the stable paper identifier from normalized metadata.
///
/// Pure function of (normalized_title, first_author_surname, year): the same
/// logical paper always maps to the same node across runs and datasets.
pub fn derive_paper_id(
    normalized_title: &str,
    first_author_surname: &str,
    year: Option<i32>,
) -> PaperId {
    let year_part = year.map(|y| y.to_string()).unwrap_or_default();
    let key = format!("{}|{}|{}", normalized_title, first_author_surname, year_part);

    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    let digest = hex::encode(hasher.finalize());

    PaperId::new(&digest[..crate::PAPER_ID_LEN])
}

/// Parse a year that may arrive as a JSON integer or string
fn parse_year(value: Option<&serde_json::Value>) -> Option<i32> {
    let value = value?;
    match value {
        serde_json::Value::Number(n) => n.as_i64().map(|y| y as i32),
        serde_json::Value::String(s) => match s.trim().parse::<i32>() {
            Ok(y) => Some(y),
            Err(_) => {
                warn!(year = %s, "Unparseable publication year, treating as absent");
                None
            }
        },
        _ => {
            warn!(year = ?value, "Unexpected year value, treating as absent");
            None
        }
    }
}

/// Normalize a single raw record; None if it is unusable (missing title)
pub fn normalize_paper(raw: &RawPaper) -> Option<PaperRecord> {
    let title = raw.title.as_deref().map(str::trim).unwrap_or_default();
    if title.is_empty() {
        warn!("Skipping paper record without a title");
        return None;
    }

    let normalized_title = normalize_title(title);

    let mut authors: Vec<AuthorRef> = raw
        .authors
        .iter()
        .filter(|a| !a.name.trim().is_empty())
        .enumerate()
        .map(|(i, a)| AuthorRef {
            display_name: a.name.trim().to_string(),
            normalized_name: normalize_name(&a.name),
            position: a.position.unwrap_or(i as u32 + 1),
        })
        .collect();
    authors.sort_by_key(|a| a.position);

    let info = raw.publication_info.as_ref();
    let year = parse_year(info.and_then(|i| i.year.as_ref()));
    let journal = info.and_then(|i| i.journal.clone());

    let first_surname = authors
        .first()
        .and_then(|a| surname(&a.display_name))
        .unwrap_or_default();

    let keywords: BTreeSet<String> = raw
        .keywords
        .iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect();

    let citations = raw.citations.iter().map(normalize_citation).collect();

    Some(PaperRecord {
        id: derive_paper_id(&normalized_title, &first_surname, year),
        title: title.to_string(),
        normalized_title,
        authors,
        year,
        journal,
        doi: raw.doi.as_ref().map(|d| d.trim().to_lowercase()),
        arxiv_id: raw.arxiv_id.as_deref().map(normalize_arxiv_id),
        keywords,
        citations,
    })
}

fn normalize_citation(raw: &RawCitation) -> CitationRecord {
    let raw_text = raw
        .text
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_string();

    CitationRecord {
        raw_text,
        title: raw.title.as_deref().map(str::trim).map(str::to_string),
        authors: raw
            .authors
            .iter()
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .collect(),
        year: parse_year(raw.year.as_ref()),
        journal: raw.journal.clone(),
        doi: raw.doi.as_ref().map(|d| d.trim().to_lowercase()),
        resolved_target: None,
    }
}

/// Normalize a full corpus, dropping unusable records
pub fn normalize_papers(raw: &[RawPaper]) -> Vec<PaperRecord> {
    let records: Vec<PaperRecord> = raw.iter().filter_map(normalize_paper).collect();

    debug!(
        input = raw.len(),
        usable = records.len(),
        "Corpus normalized"
    );

    records
}
