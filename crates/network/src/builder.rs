//! Network construction
//!
//! Builds the five derived networks from a resolved corpus. Co-citation and
//! bibliographic coupling avoid the full paper-pair scan by pair-combining
//! inside inverted-index buckets: each citing paper's reference list yields
//! the co-cited pairs, and each cited paper's citer list yields the coupled
//! pairs.

use crate::graph::{EdgeAttrs, Network, NodeAttrs};
use paperscope_common::records::PaperRecord;
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, info};

/// Directed citation network: citing -> cited for every resolved citation
pub fn build_citation_network(papers: &[PaperRecord]) -> Network {
    let mut network = Network::new(true);

    for paper in papers {
        network.add_node(
            paper.id.as_str(),
            NodeAttrs::paper(paper.title.clone(), paper.year),
        );
    }

    for paper in papers {
        for citation in &paper.citations {
            let Some(target) = &citation.resolved_target else {
                continue;
            };
            let context = (!citation.raw_text.is_empty()).then(|| citation.raw_text.clone());
            network.add_edge(
                paper.id.as_str(),
                target.as_str(),
                EdgeAttrs::presence(paper.year, context),
            );
        }
    }

    info!(
        nodes = network.node_count(),
        edges = network.edge_count(),
        "Citation network built"
    );
    network
}

/// Count unordered pairs within one index bucket
fn count_pairs(bucket: &[String], counts: &mut HashMap<(String, String), u32>) {
    for (i, a) in bucket.iter().enumerate() {
        for b in &bucket[i + 1..] {
            if a == b {
                continue;
            }
            let key = if a <= b {
                (a.clone(), b.clone())
            } else {
                (b.clone(), a.clone())
            };
            *counts.entry(key).or_insert(0) += 1;
        }
    }
}

/// Copy the citation network's paper nodes into an undirected network
fn paper_nodes(citation: &Network) -> Network {
    let mut network = Network::new(false);
    for (id, attrs) in citation.nodes() {
        network.add_node(id.clone(), attrs.clone());
    }
    network
}

/// Co-citation network: papers A and B are linked when at least `threshold`
/// distinct papers cite both.
pub fn build_cocitation_network(citation: &Network, threshold: u32) -> Network {
    let mut network = paper_nodes(citation);
    let mut counts: HashMap<(String, String), u32> = HashMap::new();

    // Each citing paper's reference list is one bucket of co-cited pairs
    for id in citation.node_ids() {
        count_pairs(citation.out_neighbors(id), &mut counts);
    }

    let threshold = threshold.max(1);
    for ((a, b), count) in counts {
        if count >= threshold {
            network.add_edge(&a, &b, EdgeAttrs::weighted(count as f64));
        }
    }

    debug!(
        edges = network.edge_count(),
        threshold, "Co-citation network built"
    );
    network
}

/// Bibliographic coupling network: citing papers A and B are linked when they
/// share at least `threshold` cited references.
pub fn build_coupling_network(citation: &Network, threshold: u32) -> Network {
    let mut network = paper_nodes(citation);
    let mut counts: HashMap<(String, String), u32> = HashMap::new();

    // Each cited paper's citer list is one bucket of coupled pairs
    for id in citation.node_ids() {
        count_pairs(citation.in_neighbors(id), &mut counts);
    }

    let threshold = threshold.max(1);
    for ((a, b), count) in counts {
        if count >= threshold {
            network.add_edge(&a, &b, EdgeAttrs::weighted(count as f64));
        }
    }

    debug!(
        edges = network.edge_count(),
        threshold, "Bibliographic coupling network built"
    );
    network
}

/// Author collaboration network keyed by normalized author name; edge weight
/// is the number of co-authored papers.
pub fn build_collaboration_network(papers: &[PaperRecord], threshold: u32) -> Network {
    let mut network = Network::new(false);
    let mut counts: HashMap<(String, String), u32> = HashMap::new();

    for paper in papers {
        let mut seen = BTreeSet::new();
        for author in &paper.authors {
            if author.normalized_name.is_empty() {
                continue;
            }
            if seen.insert(author.normalized_name.clone()) {
                network.add_node(
                    author.normalized_name.clone(),
                    NodeAttrs::author(author.display_name.clone()),
                );
            }
        }

        let names: Vec<String> = seen.into_iter().collect();
        count_pairs(&names, &mut counts);
    }

    let threshold = threshold.max(1);
    for ((a, b), count) in counts {
        if count >= threshold {
            network.add_edge(&a, &b, EdgeAttrs::weighted(count as f64));
        }
    }

    debug!(
        authors = network.node_count(),
        collaborations = network.edge_count(),
        "Author collaboration network built"
    );
    network
}

/// Keyword co-occurrence network; every co-occurring pair is materialized
pub fn build_keyword_network(papers: &[PaperRecord]) -> Network {
    let mut network = Network::new(false);
    let mut counts: HashMap<(String, String), u32> = HashMap::new();

    for paper in papers {
        for keyword in &paper.keywords {
            network.add_node(keyword.clone(), NodeAttrs::keyword(keyword.clone()));
        }
        let keywords: Vec<String> = paper.keywords.iter().cloned().collect();
        count_pairs(&keywords, &mut counts);
    }

    for ((a, b), count) in counts {
        network.add_edge(&a, &b, EdgeAttrs::weighted(count as f64));
    }

    debug!(
        keywords = network.node_count(),
        cooccurrences = network.edge_count(),
        "Keyword co-occurrence network built"
    );
    network
}
