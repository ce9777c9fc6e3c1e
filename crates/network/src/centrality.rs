//! Per-node centrality scores
//!
//! Degree, betweenness (Brandes), closeness, and PageRank over any of the
//! built networks. Disconnected or isolated nodes receive defined scores
//! (0 for betweenness/closeness, 1/N for PageRank) rather than failing.

use crate::graph::Network;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

/// Supported centrality measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CentralityKind {
    Degree,
    Betweenness,
    Closeness,
    Pagerank,
}

impl CentralityKind {
    pub const ALL: [CentralityKind; 4] = [
        CentralityKind::Degree,
        CentralityKind::Betweenness,
        CentralityKind::Closeness,
        CentralityKind::Pagerank,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CentralityKind::Degree => "degree",
            CentralityKind::Betweenness => "betweenness",
            CentralityKind::Closeness => "closeness",
            CentralityKind::Pagerank => "pagerank",
        }
    }
}

/// PageRank and iteration tuning
#[derive(Debug, Clone)]
pub struct CentralityConfig {
    /// Damping factor (typically 0.85)
    pub damping: f64,

    /// Maximum PageRank iterations
    pub max_iterations: usize,

    /// Convergence threshold
    pub epsilon: f64,
}

impl Default for CentralityConfig {
    fn default() -> Self {
        Self {
            damping: 0.85,
            max_iterations: 100,
            epsilon: 1e-6,
        }
    }
}

/// Degree centrality normalized by the maximum possible degree (N-1)
pub fn degree_centrality(network: &Network) -> HashMap<String, f64> {
    let n = network.node_count();
    if n < 2 {
        return network.node_ids().map(|id| (id.clone(), 0.0)).collect();
    }
    let scale = 1.0 / (n - 1) as f64;
    network
        .node_ids()
        .map(|id| (id.clone(), network.degree(id) as f64 * scale))
        .collect()
}

/// Betweenness centrality via Brandes' algorithm, normalized
pub fn betweenness_centrality(network: &Network) -> HashMap<String, f64> {
    let nodes: Vec<&str> = network.node_ids().map(String::as_str).collect();
    let n = nodes.len();
    let mut centrality: HashMap<String, f64> =
        nodes.iter().map(|id| (id.to_string(), 0.0)).collect();
    if n < 3 {
        return centrality;
    }

    for &source in &nodes {
        // Single-source shortest paths (BFS; edges are treated as unit length)
        let mut stack: Vec<&str> = Vec::new();
        let mut predecessors: HashMap<&str, Vec<&str>> = HashMap::new();
        let mut sigma: HashMap<&str, f64> = HashMap::new();
        let mut dist: HashMap<&str, i64> = HashMap::new();

        sigma.insert(source, 1.0);
        dist.insert(source, 0);

        let mut queue = VecDeque::from([source]);
        while let Some(v) = queue.pop_front() {
            stack.push(v);
            let d_v = dist[v];
            let sigma_v = sigma[v];
            for w in network.out_neighbors(v) {
                let w = w.as_str();
                if !dist.contains_key(w) {
                    dist.insert(w, d_v + 1);
                    queue.push_back(w);
                }
                if dist[w] == d_v + 1 {
                    *sigma.entry(w).or_insert(0.0) += sigma_v;
                    predecessors.entry(w).or_default().push(v);
                }
            }
        }

        // Accumulate dependencies in reverse BFS order
        let mut delta: HashMap<&str, f64> = HashMap::new();
        while let Some(w) = stack.pop() {
            let coefficient = (1.0 + delta.get(w).copied().unwrap_or(0.0)) / sigma[w];
            if let Some(preds) = predecessors.get(w) {
                for &v in preds {
                    *delta.entry(v).or_insert(0.0) += sigma[v] * coefficient;
                }
            }
            if w != source {
                if let Some(value) = centrality.get_mut(w) {
                    *value += delta.get(w).copied().unwrap_or(0.0);
                }
            }
        }
    }

    // For undirected networks each pair is visited from both endpoints, so
    // the raw values are doubled; the combined scale works out the same.
    let scale = 1.0 / ((n - 1) * (n - 2)) as f64;
    for value in centrality.values_mut() {
        *value *= scale;
    }

    centrality
}

/// Closeness centrality over a node's own (weak) component:
/// (reachable - 1) / sum-of-distances, 0 for isolated nodes
pub fn closeness_centrality(network: &Network) -> HashMap<String, f64> {
    network
        .node_ids()
        .map(|id| {
            let mut dist: HashMap<&str, u64> = HashMap::new();
            dist.insert(id.as_str(), 0);
            let mut queue = VecDeque::from([id.as_str()]);
            let mut total = 0u64;

            while let Some(current) = queue.pop_front() {
                let d = dist[current];
                for neighbor in network.undirected_neighbors(current) {
                    if !dist.contains_key(neighbor) {
                        dist.insert(neighbor, d + 1);
                        total += d + 1;
                        queue.push_back(neighbor);
                    }
                }
            }

            let reachable = dist.len();
            let score = if reachable > 1 && total > 0 {
                (reachable - 1) as f64 / total as f64
            } else {
                0.0
            };
            (id.clone(), score)
        })
        .collect()
}

/// PageRank scores with teleport, iterated to convergence or the cap.
/// Isolated nodes receive 1/N.
pub fn pagerank(network: &Network, config: &CentralityConfig) -> HashMap<String, f64> {
    let n = network.node_count();
    if n == 0 {
        return HashMap::new();
    }

    let n_f64 = n as f64;
    let initial = 1.0 / n_f64;
    let teleport = (1.0 - config.damping) / n_f64;

    let nodes: Vec<&str> = network.node_ids().map(String::as_str).collect();
    let mut scores: HashMap<&str, f64> = nodes.iter().map(|&id| (id, initial)).collect();

    // Precompute outgoing counts
    let out_counts: HashMap<&str, usize> = nodes
        .iter()
        .map(|&id| (id, network.out_degree(id)))
        .collect();

    for _ in 0..config.max_iterations {
        let mut new_scores: HashMap<&str, f64> = HashMap::with_capacity(n);
        let mut max_diff: f64 = 0.0;

        for &node in &nodes {
            // Sum contributions from nodes linking to this one
            let incoming_sum: f64 = network
                .in_neighbors(node)
                .iter()
                .map(|source| {
                    let source = source.as_str();
                    let source_score = scores.get(source).copied().unwrap_or(0.0);
                    let source_out = *out_counts.get(source).unwrap_or(&1) as f64;
                    source_score / source_out.max(1.0)
                })
                .sum();

            let new_score = teleport + config.damping * incoming_sum;
            let old_score = scores.get(node).copied().unwrap_or(0.0);
            max_diff = max_diff.max((new_score - old_score).abs());
            new_scores.insert(node, new_score);
        }

        scores = new_scores;

        if max_diff < config.epsilon {
            break;
        }
    }

    nodes
        .iter()
        .map(|&id| {
            let score = if network.degree(id) == 0 {
                initial
            } else {
                scores.get(id).copied().unwrap_or(initial)
            };
            (id.to_string(), score)
        })
        .collect()
}

/// Compute the requested centrality measures for every node
pub fn calculate_centrality_metrics(
    network: &Network,
    kinds: &[CentralityKind],
    config: &CentralityConfig,
) -> HashMap<CentralityKind, HashMap<String, f64>> {
    kinds
        .iter()
        .map(|kind| {
            let scores = match kind {
                CentralityKind::Degree => degree_centrality(network),
                CentralityKind::Betweenness => betweenness_centrality(network),
                CentralityKind::Closeness => closeness_centrality(network),
                CentralityKind::Pagerank => pagerank(network, config),
            };
            (*kind, scores)
        })
        .collect()
}
