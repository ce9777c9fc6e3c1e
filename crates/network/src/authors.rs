//! Per-author bibliometric aggregates
//!
//! Groups the corpus by normalized author name and derives publication
//! counts, received citations, h-index, distinct collaborators, and inferred
//! research areas. Citation counts come from in-degrees in the citation
//! network; papers outside the corpus contribute nothing.

use crate::graph::Network;
use paperscope_common::records::PaperRecord;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Bibliometric profile of one author
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorMetrics {
    /// Name as first seen on a paper
    pub display_name: String,

    pub paper_count: usize,

    /// Sum of the author's papers' in-degrees in the citation network
    pub total_citations: usize,

    pub h_index: usize,

    /// Distinct co-authors across all papers (excluding the author)
    pub collaboration_count: usize,

    pub average_citations_per_paper: f64,

    /// Top keywords by frequency across the author's papers
    pub research_areas: Vec<String>,
}

/// H-index as the crossover point of the descending per-paper citation
/// counts: cited papers count toward h while their citation count stays at
/// or above their zero-based rank, so [10, 8, 5, 3, 1] yields 4.
pub fn h_index(citation_counts: &[usize]) -> usize {
    let mut sorted = citation_counts.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));

    sorted
        .iter()
        .enumerate()
        .take_while(|(i, &count)| count > 0 && count >= *i)
        .count()
}

/// Compute the bibliometric profile of every author in the corpus,
/// keyed by normalized author name
pub fn analyze_author_metrics(
    papers: &[PaperRecord],
    citation: &Network,
    top_keywords: usize,
) -> BTreeMap<String, AuthorMetrics> {
    // normalized name -> indexes of authored papers
    let mut authored: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    let mut display_names: BTreeMap<String, String> = BTreeMap::new();

    for (i, paper) in papers.iter().enumerate() {
        for author in &paper.authors {
            if author.normalized_name.is_empty() {
                continue;
            }
            authored
                .entry(author.normalized_name.clone())
                .or_default()
                .push(i);
            display_names
                .entry(author.normalized_name.clone())
                .or_insert_with(|| author.display_name.clone());
        }
    }

    let mut results = BTreeMap::new();

    for (name, paper_indexes) in authored {
        let citation_counts: Vec<usize> = paper_indexes
            .iter()
            .map(|&i| citation.in_degree(papers[i].id.as_str()))
            .collect();
        let total_citations: usize = citation_counts.iter().sum();

        let mut collaborators: BTreeSet<&str> = BTreeSet::new();
        let mut keyword_counts: BTreeMap<&str, usize> = BTreeMap::new();
        for &i in &paper_indexes {
            for coauthor in &papers[i].authors {
                if coauthor.normalized_name != name && !coauthor.normalized_name.is_empty() {
                    collaborators.insert(coauthor.normalized_name.as_str());
                }
            }
            for keyword in &papers[i].keywords {
                *keyword_counts.entry(keyword.as_str()).or_insert(0) += 1;
            }
        }

        let mut areas: Vec<(&str, usize)> = keyword_counts.into_iter().collect();
        areas.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        let research_areas: Vec<String> = areas
            .into_iter()
            .take(top_keywords)
            .map(|(keyword, _)| keyword.to_string())
            .collect();

        let paper_count = paper_indexes.len();
        let metrics = AuthorMetrics {
            display_name: display_names.remove(&name).unwrap_or_else(|| name.clone()),
            paper_count,
            total_citations,
            h_index: h_index(&citation_counts),
            collaboration_count: collaborators.len(),
            average_citations_per_paper: if paper_count > 0 {
                total_citations as f64 / paper_count as f64
            } else {
                0.0
            },
            research_areas,
        };
        results.insert(name, metrics);
    }

    debug!(authors = results.len(), "Author metrics computed");
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_citation_network;
    use crate::matcher::{resolve_citations, HeuristicMatcher};
    use paperscope_common::normalize::normalize_paper;
    use paperscope_common::records::{CitationRecord, RawAuthor, RawPaper, RawPublicationInfo};

    fn paper(title: &str, authors: &[&str], year: i64, keywords: &[&str]) -> PaperRecord {
        let raw = RawPaper {
            title: Some(title.to_string()),
            authors: authors
                .iter()
                .enumerate()
                .map(|(i, name)| RawAuthor {
                    name: name.to_string(),
                    position: Some(i as u32 + 1),
                })
                .collect(),
            publication_info: Some(RawPublicationInfo {
                year: Some(serde_json::json!(year)),
                ..Default::default()
            }),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            ..Default::default()
        };
        normalize_paper(&raw).unwrap()
    }

    #[test]
    fn test_h_index_crossover() {
        assert_eq!(h_index(&[10, 8, 5, 3, 1]), 4);
        assert_eq!(h_index(&[0, 0]), 0);
        assert_eq!(h_index(&[]), 0);
        assert_eq!(h_index(&[3]), 1);
        assert_eq!(h_index(&[5, 5, 5, 5, 5]), 5);
    }

    #[test]
    fn test_collaborators_are_distinct_across_papers() {
        // Alice appears on two papers with overlapping co-author sets;
        // Carol Davis is shared and must be counted once
        let papers = vec![
            paper(
                "Deep Learning Foundations",
                &["Alice Johnson", "Bob Smith", "Carol Davis"],
                2018,
                &["deep learning"],
            ),
            paper(
                "Neural Network Architectures",
                &["David Wilson", "Alice Johnson", "Carol Davis"],
                2019,
                &["computer vision"],
            ),
        ];
        let citation = build_citation_network(&papers);
        let metrics = analyze_author_metrics(&papers, &citation, 5);

        let alice = &metrics["alice johnson"];
        assert_eq!(alice.paper_count, 2);
        // bob smith, carol davis, david wilson: carol counted once
        assert_eq!(alice.collaboration_count, 3);
    }

    #[test]
    fn test_total_citations_sum_in_degrees() {
        let mut papers = vec![
            paper("Deep Learning Foundations", &["Alice Johnson"], 2018, &[]),
            paper("Neural Network Architectures", &["David Wilson"], 2019, &[]),
            paper("Transformer Networks", &["Frank Miller"], 2020, &[]),
        ];
        for i in 1..3 {
            papers[i].citations = vec![CitationRecord {
                raw_text: "Johnson, A. (2018). Deep Learning Foundations.".to_string(),
                title: Some("Deep Learning Foundations".to_string()),
                authors: vec!["A. Johnson".to_string()],
                year: Some(2018),
                ..Default::default()
            }];
        }
        resolve_citations(&mut papers, &HeuristicMatcher);
        let citation = build_citation_network(&papers);
        let metrics = analyze_author_metrics(&papers, &citation, 5);

        assert_eq!(metrics["alice johnson"].total_citations, 2);
        assert_eq!(metrics["alice johnson"].h_index, 1);
        assert_eq!(metrics["alice johnson"].average_citations_per_paper, 2.0);
        assert_eq!(metrics["david wilson"].total_citations, 0);
    }

    #[test]
    fn test_research_areas_ranked_by_frequency() {
        let papers = vec![
            paper("P1", &["Alice Johnson"], 2018, &["deep learning", "vision"]),
            paper("P2", &["Alice Johnson"], 2019, &["deep learning", "nlp"]),
        ];
        let citation = build_citation_network(&papers);
        let metrics = analyze_author_metrics(&papers, &citation, 2);

        let areas = &metrics["alice johnson"].research_areas;
        assert_eq!(areas[0], "deep learning");
        assert_eq!(areas.len(), 2);
    }
}
