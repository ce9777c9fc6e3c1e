//! Citation resolution against the corpus
//!
//! Maps each parsed bibliography entry to an existing paper identifier, or
//! leaves it unresolved. Unresolved citations never create nodes: they are
//! simply omitted from edge construction, so a paper's out-degree in the
//! citation network can legitimately be lower than its raw citation count.
//!
//! The matching policy sits behind the `PaperMatcher` trait so that stricter
//! policies can be swapped in for corpora where precision matters more than
//! recall.

use paperscope_common::normalize::{extract_arxiv_id, extract_doi, normalize_title, surname};
use paperscope_common::records::{CitationRecord, PaperId, PaperRecord};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// Per-paper facts the matcher needs, detached from the full record
#[derive(Debug, Clone)]
struct PaperFacts {
    id: PaperId,
    normalized_title: String,
    surnames: BTreeSet<String>,
    year: Option<i32>,
}

/// Lookup structures over a normalized corpus
///
/// Iteration order follows the input corpus order, which makes fuzzy-match
/// tie-breaking deterministic: the earliest paper wins.
pub struct CorpusIndex {
    papers: Vec<PaperFacts>,
    by_doi: HashMap<String, PaperId>,
    by_arxiv: HashMap<String, PaperId>,
    by_title: HashMap<String, PaperId>,
}

impl CorpusIndex {
    pub fn build(papers: &[PaperRecord]) -> Self {
        let mut by_doi = HashMap::new();
        let mut by_arxiv = HashMap::new();
        let mut by_title = HashMap::new();
        let mut facts = Vec::with_capacity(papers.len());

        for paper in papers {
            if let Some(doi) = &paper.doi {
                by_doi.entry(doi.clone()).or_insert_with(|| paper.id.clone());
            }
            if let Some(arxiv_id) = &paper.arxiv_id {
                by_arxiv
                    .entry(arxiv_id.clone())
                    .or_insert_with(|| paper.id.clone());
            }
            by_title
                .entry(paper.normalized_title.clone())
                .or_insert_with(|| paper.id.clone());

            facts.push(PaperFacts {
                id: paper.id.clone(),
                normalized_title: paper.normalized_title.clone(),
                surnames: paper.author_surnames(),
                year: paper.year,
            });
        }

        Self {
            papers: facts,
            by_doi,
            by_arxiv,
            by_title,
        }
    }

    pub fn lookup_doi(&self, doi: &str) -> Option<&PaperId> {
        self.by_doi.get(doi)
    }

    pub fn lookup_arxiv(&self, arxiv_id: &str) -> Option<&PaperId> {
        self.by_arxiv.get(arxiv_id)
    }

    pub fn lookup_title(&self, normalized_title: &str) -> Option<&PaperId> {
        self.by_title.get(normalized_title)
    }
}

/// Resolution policy for a single citation
pub trait PaperMatcher {
    fn resolve(&self, citation: &CitationRecord, index: &CorpusIndex) -> Option<PaperId>;
}

/// Default matcher: strong identifiers (DOI, arXiv id), then exact
/// normalized title, then the fuzzy title/author/year heuristic.
///
/// The fuzzy rule (title overlap + >=1 shared surname + year within +-1) is
/// a recall-oriented heuristic and can over-merge on common surnames and
/// generic titles; use `ExactDoiMatcher` where that risk is unacceptable.
#[derive(Debug, Default)]
pub struct HeuristicMatcher;

impl HeuristicMatcher {
    fn citation_doi(citation: &CitationRecord) -> Option<String> {
        citation
            .doi
            .clone()
            .or_else(|| extract_doi(&citation.raw_text))
    }

    /// Substring containment either way, or most of the shorter title's
    /// tokens appearing in the longer one
    fn titles_overlap(a: &str, b: &str) -> bool {
        if a.is_empty() || b.is_empty() {
            return false;
        }
        if a.contains(b) || b.contains(a) {
            return true;
        }

        let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
        let long_tokens: BTreeSet<&str> = long.split(' ').collect();
        let short_tokens: Vec<&str> = short.split(' ').collect();
        if short_tokens.is_empty() {
            return false;
        }
        let shared = short_tokens
            .iter()
            .filter(|t| long_tokens.contains(**t))
            .count();
        shared * 10 >= short_tokens.len() * 8
    }

    fn years_compatible(a: Option<i32>, b: Option<i32>) -> bool {
        match (a, b) {
            // The +-1 constraint only applies when both years are present
            (Some(a), Some(b)) => (a - b).abs() <= 1,
            _ => true,
        }
    }
}

impl PaperMatcher for HeuristicMatcher {
    fn resolve(&self, citation: &CitationRecord, index: &CorpusIndex) -> Option<PaperId> {
        // Rule 1: exact strong identifier (DOI, then arXiv id)
        if let Some(doi) = Self::citation_doi(citation) {
            if let Some(id) = index.lookup_doi(&doi) {
                return Some(id.clone());
            }
        }
        if let Some(arxiv_id) = extract_arxiv_id(&citation.raw_text) {
            if let Some(id) = index.lookup_arxiv(&arxiv_id) {
                return Some(id.clone());
            }
        }

        let cited_title = citation
            .title
            .as_deref()
            .map(normalize_title)
            .unwrap_or_default();

        // Rule 2: exact normalized title
        if !cited_title.is_empty() {
            if let Some(id) = index.lookup_title(&cited_title) {
                return Some(id.clone());
            }
        }

        // Rule 3: fuzzy title overlap + shared surname + compatible year
        if cited_title.is_empty() {
            return None;
        }
        let cited_surnames: BTreeSet<String> =
            citation.authors.iter().filter_map(|a| surname(a)).collect();
        if cited_surnames.is_empty() {
            return None;
        }

        index
            .papers
            .iter()
            .find(|paper| {
                Self::titles_overlap(&paper.normalized_title, &cited_title)
                    && !paper.surnames.is_disjoint(&cited_surnames)
                    && Self::years_compatible(paper.year, citation.year)
            })
            .map(|paper| paper.id.clone())
    }
}

/// Strict matcher: resolves on exact DOI only
#[derive(Debug, Default)]
pub struct ExactDoiMatcher;

impl PaperMatcher for ExactDoiMatcher {
    fn resolve(&self, citation: &CitationRecord, index: &CorpusIndex) -> Option<PaperId> {
        let doi = HeuristicMatcher::citation_doi(citation)?;
        index.lookup_doi(&doi).cloned()
    }
}

/// Resolve every outgoing citation in the corpus in place
pub fn resolve_citations(papers: &mut [PaperRecord], matcher: &dyn PaperMatcher) {
    let index = CorpusIndex::build(papers);

    let mut resolved = 0usize;
    let mut total = 0usize;

    for paper in papers.iter_mut() {
        for citation in paper.citations.iter_mut() {
            total += 1;
            citation.resolved_target = matcher.resolve(citation, &index);
            if citation.resolved_target.is_some() {
                resolved += 1;
            }
        }
    }

    debug!(total, resolved, "Citations resolved against corpus");
}

#[cfg(test)]
mod tests {
    use super::*;
    use paperscope_common::normalize::normalize_paper;
    use paperscope_common::records::{RawAuthor, RawPaper, RawPublicationInfo};

    fn corpus_paper(title: &str, author: &str, year: i64, doi: Option<&str>) -> PaperRecord {
        let raw = RawPaper {
            title: Some(title.to_string()),
            authors: vec![RawAuthor {
                name: author.to_string(),
                position: Some(1),
            }],
            publication_info: Some(RawPublicationInfo {
                year: Some(serde_json::json!(year)),
                ..Default::default()
            }),
            doi: doi.map(str::to_string),
            ..Default::default()
        };
        normalize_paper(&raw).unwrap()
    }

    fn citation(title: &str, authors: &[&str], year: Option<i32>) -> CitationRecord {
        CitationRecord {
            raw_text: format!("{} ({})", title, year.unwrap_or_default()),
            title: Some(title.to_string()),
            authors: authors.iter().map(|a| a.to_string()).collect(),
            year,
            ..Default::default()
        }
    }

    #[test]
    fn test_doi_match_wins_over_title() {
        let papers = vec![
            corpus_paper("Deep Learning", "Y. LeCun", 2015, Some("10.1038/nature14539")),
            corpus_paper("Deep Learning", "I. Goodfellow", 2016, None),
        ];
        let index = CorpusIndex::build(&papers);

        let mut cited = citation("Deep Learning", &["Y. LeCun"], Some(2015));
        cited.doi = Some("10.1038/nature14539".to_string());

        let resolved = HeuristicMatcher.resolve(&cited, &index);
        assert_eq!(resolved.as_ref(), Some(&papers[0].id));
    }

    #[test]
    fn test_doi_extracted_from_raw_text() {
        let papers = vec![corpus_paper(
            "Deep Learning",
            "Y. LeCun",
            2015,
            Some("10.1038/nature14539"),
        )];
        let index = CorpusIndex::build(&papers);

        let cited = CitationRecord {
            raw_text: "LeCun et al., Nature, doi:10.1038/nature14539".to_string(),
            ..Default::default()
        };
        assert_eq!(
            HeuristicMatcher.resolve(&cited, &index).as_ref(),
            Some(&papers[0].id)
        );
    }

    #[test]
    fn test_arxiv_id_match_from_raw_text() {
        let mut papers = vec![corpus_paper("Deep Learning", "Y. LeCun", 2015, None)];
        papers[0].arxiv_id = Some("1706.03762".to_string());
        let index = CorpusIndex::build(&papers);

        let cited = CitationRecord {
            raw_text: "Attention paper, arXiv: 1706.03762, 2017".to_string(),
            ..Default::default()
        };
        assert_eq!(
            HeuristicMatcher.resolve(&cited, &index).as_ref(),
            Some(&papers[0].id)
        );
    }

    #[test]
    fn test_exact_title_match() {
        let papers = vec![corpus_paper(
            "Transformer Networks and Attention Mechanisms",
            "Frank Miller",
            2020,
            None,
        )];
        let index = CorpusIndex::build(&papers);

        let cited = citation(
            "Transformer Networks and Attention Mechanisms.",
            &[],
            None,
        );
        assert_eq!(
            HeuristicMatcher.resolve(&cited, &index).as_ref(),
            Some(&papers[0].id)
        );
    }

    #[test]
    fn test_fuzzy_match_requires_shared_surname() {
        let papers = vec![corpus_paper(
            "Neural Network Architectures for Computer Vision",
            "David Wilson",
            2019,
            None,
        )];
        let index = CorpusIndex::build(&papers);

        let with_author = citation(
            "Neural Network Architectures",
            &["D. Wilson"],
            Some(2019),
        );
        assert!(HeuristicMatcher.resolve(&with_author, &index).is_some());

        let wrong_author = citation(
            "Neural Network Architectures",
            &["G. Hinton"],
            Some(2019),
        );
        assert!(HeuristicMatcher.resolve(&wrong_author, &index).is_none());
    }

    #[test]
    fn test_fuzzy_match_year_window() {
        let papers = vec![corpus_paper(
            "Reinforcement Learning in Complex Environments",
            "Henry Garcia",
            2021,
            None,
        )];
        let index = CorpusIndex::build(&papers);

        let near = citation("Reinforcement Learning in Complex", &["Garcia"], Some(2020));
        assert!(HeuristicMatcher.resolve(&near, &index).is_some());

        let far = citation("Reinforcement Learning in Complex", &["Garcia"], Some(2017));
        assert!(HeuristicMatcher.resolve(&far, &index).is_none());
    }

    #[test]
    fn test_unresolved_citation_stays_unresolved() {
        let papers = vec![corpus_paper("Deep Learning Foundations", "Alice Johnson", 2018, None)];
        let index = CorpusIndex::build(&papers);

        let external = citation("Attention Is All You Need", &["Vaswani"], Some(2017));
        assert!(HeuristicMatcher.resolve(&external, &index).is_none());
    }

    #[test]
    fn test_tie_breaks_to_earliest_corpus_paper() {
        let papers = vec![
            corpus_paper("Graph Methods Survey", "Jane Lee", 2020, None),
            corpus_paper("Graph Methods Survey Extended", "John Lee", 2020, None),
        ];
        let index = CorpusIndex::build(&papers);

        let cited = citation("Graph Methods Survey", &["Lee"], Some(2020));
        // Exact title matches paper 0; even via the fuzzy path the earliest
        // corpus paper is preferred.
        assert_eq!(
            HeuristicMatcher.resolve(&cited, &index).as_ref(),
            Some(&papers[0].id)
        );
    }

    #[test]
    fn test_exact_doi_matcher_ignores_titles() {
        let papers = vec![corpus_paper("Deep Learning Foundations", "Alice Johnson", 2018, None)];
        let index = CorpusIndex::build(&papers);

        let cited = citation("Deep Learning Foundations", &["Johnson"], Some(2018));
        assert!(ExactDoiMatcher.resolve(&cited, &index).is_none());
    }

    #[test]
    fn test_resolve_citations_fills_targets() {
        let mut papers = vec![
            corpus_paper("Deep Learning Foundations", "Alice Johnson", 2018, None),
            corpus_paper("Neural Network Architectures", "David Wilson", 2019, None),
        ];
        papers[1].citations = vec![
            citation("Deep Learning Foundations", &["A. Johnson"], Some(2018)),
            citation("Some External Reference", &["Nobody"], Some(2000)),
        ];

        resolve_citations(&mut papers, &HeuristicMatcher);

        assert_eq!(
            papers[1].citations[0].resolved_target.as_ref(),
            Some(&papers[0].id)
        );
        assert!(papers[1].citations[1].resolved_target.is_none());
    }
}
