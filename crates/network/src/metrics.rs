//! Structural network metrics
//!
//! Pure read-only computations over a built network: density, connectivity,
//! clustering, and the citation-specific aggregates. Undersized networks get
//! defined defaults (0.0 / empty) instead of errors.

use crate::graph::{Network, NetworkKind};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};

/// Entry in the most-cited ranking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MostCitedPaper {
    pub id: String,
    pub title: String,
    pub citations: usize,
}

/// Structural metrics for one network
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkMetrics {
    pub num_nodes: usize,
    pub num_edges: usize,
    pub density: f64,
    pub is_connected: bool,
    pub num_components: usize,
    pub average_clustering: f64,
    pub global_clustering: f64,

    // Citation-network-specific fields; zero/empty for other kinds
    pub average_citations_per_paper: f64,
    pub most_cited_papers: Vec<MostCitedPaper>,
    pub network_age: Option<i32>,
    pub citation_velocity: f64,
}

fn density(network: &Network) -> f64 {
    let n = network.node_count();
    if n < 2 {
        return 0.0;
    }
    let possible = if network.is_directed() {
        (n * (n - 1)) as f64
    } else {
        (n * (n - 1)) as f64 / 2.0
    };
    network.edge_count() as f64 / possible
}

/// Connected components of the undirected view (weak components for
/// directed networks). Returns the number of components.
fn count_components(network: &Network) -> usize {
    let mut visited: HashSet<&str> = HashSet::new();
    let mut components = 0usize;

    for id in network.node_ids() {
        if visited.contains(id.as_str()) {
            continue;
        }
        components += 1;

        let mut queue = VecDeque::from([id.as_str()]);
        visited.insert(id.as_str());
        while let Some(current) = queue.pop_front() {
            for neighbor in network.undirected_neighbors(current) {
                if visited.insert(neighbor) {
                    queue.push_back(neighbor);
                }
            }
        }
    }

    components
}

/// Average local clustering and global transitivity over the undirected view
fn clustering(network: &Network) -> (f64, f64) {
    let n = network.node_count();
    if n == 0 {
        return (0.0, 0.0);
    }

    let neighbor_sets: HashMap<&str, HashSet<&str>> = network
        .node_ids()
        .map(|id| (id.as_str(), network.undirected_neighbors(id)))
        .collect();

    // Clustering is undefined on networks where fewer than 3 nodes can
    // participate in a triangle
    let eligible = neighbor_sets.values().filter(|s| s.len() >= 2).count();
    if eligible < 3 {
        return (0.0, 0.0);
    }

    let mut local_sum = 0.0;
    let mut closed_paths = 0usize;
    let mut total_paths = 0usize;

    for neighbors in neighbor_sets.values() {
        let k = neighbors.len();
        if k < 2 {
            continue;
        }

        // Edges among this node's neighbors; counts each triangle once per
        // corner across the whole loop
        let mut links = 0usize;
        let members: Vec<&str> = neighbors.iter().copied().collect();
        for (i, a) in members.iter().enumerate() {
            for b in &members[i + 1..] {
                if neighbor_sets.get(a).map(|s| s.contains(b)).unwrap_or(false) {
                    links += 1;
                }
            }
        }

        let triads = k * (k - 1) / 2;
        local_sum += links as f64 / triads as f64;
        closed_paths += links;
        total_paths += triads;
    }

    let average = local_sum / n as f64;
    let global = if total_paths > 0 {
        closed_paths as f64 / total_paths as f64
    } else {
        0.0
    };

    (average, global)
}

fn most_cited(network: &Network, limit: usize) -> Vec<MostCitedPaper> {
    let mut ranked: Vec<MostCitedPaper> = network
        .nodes()
        .map(|(id, attrs)| MostCitedPaper {
            id: id.clone(),
            title: attrs.label.clone(),
            citations: network.in_degree(id),
        })
        .filter(|entry| entry.citations > 0)
        .collect();

    ranked.sort_by(|a, b| b.citations.cmp(&a.citations).then(a.id.cmp(&b.id)));
    ranked.truncate(limit);
    ranked
}

fn network_age(network: &Network) -> Option<i32> {
    let years: Vec<i32> = network.nodes().filter_map(|(_, attrs)| attrs.year).collect();
    let min = years.iter().min()?;
    let max = years.iter().max()?;
    Some(max - min)
}

/// Compute the full metrics block for one network
pub fn calculate_network_metrics(
    network: &Network,
    kind: NetworkKind,
    most_cited_limit: usize,
) -> NetworkMetrics {
    let (average_clustering, global_clustering) = clustering(network);
    let num_components = count_components(network);

    let mut metrics = NetworkMetrics {
        num_nodes: network.node_count(),
        num_edges: network.edge_count(),
        density: density(network),
        is_connected: num_components == 1,
        num_components,
        average_clustering,
        global_clustering,
        average_citations_per_paper: 0.0,
        most_cited_papers: Vec::new(),
        network_age: None,
        citation_velocity: 0.0,
    };

    if kind == NetworkKind::Citation && metrics.num_nodes > 0 {
        metrics.average_citations_per_paper =
            metrics.num_edges as f64 / metrics.num_nodes as f64;
        metrics.most_cited_papers = most_cited(network, most_cited_limit);
        metrics.network_age = network_age(network);
        metrics.citation_velocity = match metrics.network_age {
            Some(age) if age > 0 => metrics.num_edges as f64 / age as f64,
            _ => 0.0,
        };
    }

    metrics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{EdgeAttrs, NodeAttrs};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn chain(directed: bool, n: usize) -> Network {
        let mut network = Network::new(directed);
        for i in 0..n {
            network.add_node(format!("n{}", i), NodeAttrs::paper(format!("N{}", i), None));
        }
        for i in 1..n {
            network.add_edge(
                &format!("n{}", i),
                &format!("n{}", i - 1),
                EdgeAttrs::presence(None, None),
            );
        }
        network
    }

    #[test]
    fn test_density_of_empty_and_tiny_networks() {
        let network = Network::new(true);
        assert_eq!(density(&network), 0.0);

        let mut one = Network::new(false);
        one.add_node("a", NodeAttrs::keyword("a"));
        assert_eq!(density(&one), 0.0);
    }

    #[test]
    fn test_density_of_complete_undirected_triangle() {
        let mut network = Network::new(false);
        for id in ["a", "b", "c"] {
            network.add_node(id, NodeAttrs::keyword(id));
        }
        network.add_edge("a", "b", EdgeAttrs::weighted(1.0));
        network.add_edge("b", "c", EdgeAttrs::weighted(1.0));
        network.add_edge("a", "c", EdgeAttrs::weighted(1.0));

        let metrics = calculate_network_metrics(&network, NetworkKind::KeywordCooccurrence, 10);
        assert!((metrics.density - 1.0).abs() < 1e-9);
        assert!((metrics.average_clustering - 1.0).abs() < 1e-9);
        assert!((metrics.global_clustering - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_density_bounds_on_random_networks() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let n = rng.gen_range(2..30);
            let mut network = Network::new(false);
            for i in 0..n {
                network.add_node(format!("n{}", i), NodeAttrs::keyword(format!("n{}", i)));
            }
            for i in 0..n {
                for j in (i + 1)..n {
                    if rng.gen_bool(0.3) {
                        network.add_edge(
                            &format!("n{}", i),
                            &format!("n{}", j),
                            EdgeAttrs::weighted(1.0),
                        );
                    }
                }
            }
            let d = density(&network);
            assert!((0.0..=1.0).contains(&d), "density {} out of bounds", d);
        }
    }

    #[test]
    fn test_components_weakly_connected_for_directed() {
        let network = chain(true, 4);
        let metrics = calculate_network_metrics(&network, NetworkKind::Citation, 10);
        assert!(metrics.is_connected);
        assert_eq!(metrics.num_components, 1);
    }

    #[test]
    fn test_components_counts_islands() {
        let mut network = chain(false, 3);
        network.add_node("island", NodeAttrs::keyword("island"));
        let metrics = calculate_network_metrics(&network, NetworkKind::KeywordCooccurrence, 10);
        assert!(!metrics.is_connected);
        assert_eq!(metrics.num_components, 2);
    }

    #[test]
    fn test_clustering_zero_for_small_networks() {
        // A 3-chain has only one node with degree >= 2
        let network = chain(false, 3);
        let (average, global) = clustering(&network);
        assert_eq!(average, 0.0);
        assert_eq!(global, 0.0);
    }

    #[test]
    fn test_citation_specific_fields() {
        let mut network = Network::new(true);
        network.add_node("hub", NodeAttrs::paper("Hub Paper", Some(2018)));
        for (i, year) in [2019, 2020, 2021].iter().enumerate() {
            let id = format!("citer{}", i);
            network.add_node(id.clone(), NodeAttrs::paper(format!("Citer {}", i), Some(*year)));
            network.add_edge(&id, "hub", EdgeAttrs::presence(Some(*year), None));
        }

        let metrics = calculate_network_metrics(&network, NetworkKind::Citation, 10);
        assert_eq!(metrics.num_nodes, 4);
        assert_eq!(metrics.num_edges, 3);
        assert_eq!(metrics.average_citations_per_paper, 0.75);
        assert_eq!(metrics.network_age, Some(3));
        assert_eq!(metrics.citation_velocity, 1.0);

        assert_eq!(metrics.most_cited_papers.len(), 1);
        assert_eq!(metrics.most_cited_papers[0].id, "hub");
        assert_eq!(metrics.most_cited_papers[0].citations, 3);
    }

    #[test]
    fn test_non_citation_networks_skip_citation_fields() {
        let network = chain(false, 5);
        let metrics = calculate_network_metrics(&network, NetworkKind::AuthorCollaboration, 10);
        assert_eq!(metrics.average_citations_per_paper, 0.0);
        assert!(metrics.most_cited_papers.is_empty());
        assert!(metrics.network_age.is_none());
        assert_eq!(metrics.citation_velocity, 0.0);
    }
}
