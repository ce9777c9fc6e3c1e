//! In-memory network representation
//!
//! Generalizes the citation adjacency structure to all five derived network
//! types: nodes carry display attributes, edges carry a weight and optional
//! citation context, and the same type serves directed and undirected
//! networks. Self-loops are never stored, and an edge is only accepted once
//! both endpoints exist in the node set.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// The five derived network types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetworkKind {
    Citation,
    Cocitation,
    BibliographicCoupling,
    AuthorCollaboration,
    KeywordCooccurrence,
}

impl NetworkKind {
    /// All network kinds in build order
    pub const ALL: [NetworkKind; 5] = [
        NetworkKind::Citation,
        NetworkKind::Cocitation,
        NetworkKind::BibliographicCoupling,
        NetworkKind::AuthorCollaboration,
        NetworkKind::KeywordCooccurrence,
    ];

    /// Only the citation network is directed
    pub fn is_directed(&self) -> bool {
        matches!(self, NetworkKind::Citation)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkKind::Citation => "citation",
            NetworkKind::Cocitation => "cocitation",
            NetworkKind::BibliographicCoupling => "bibliographic_coupling",
            NetworkKind::AuthorCollaboration => "author_collaboration",
            NetworkKind::KeywordCooccurrence => "keyword_cooccurrence",
        }
    }
}

impl std::fmt::Display for NetworkKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a node represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Paper,
    Author,
    Keyword,
}

/// Node attributes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeAttrs {
    /// Display label: paper title, author name, or keyword term
    pub label: String,

    pub kind: NodeKind,

    /// Publication year, where known (paper nodes only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

impl NodeAttrs {
    pub fn paper(label: impl Into<String>, year: Option<i32>) -> Self {
        Self { label: label.into(), kind: NodeKind::Paper, year }
    }

    pub fn author(label: impl Into<String>) -> Self {
        Self { label: label.into(), kind: NodeKind::Author, year: None }
    }

    pub fn keyword(label: impl Into<String>) -> Self {
        Self { label: label.into(), kind: NodeKind::Keyword, year: None }
    }
}

/// Edge attributes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeAttrs {
    /// Edge weight; always >= 1
    pub weight: f64,

    /// Citing paper's publication year (citation edges only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,

    /// Raw citation text (citation edges only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl EdgeAttrs {
    /// Unweighted presence edge
    pub fn presence(year: Option<i32>, context: Option<String>) -> Self {
        Self { weight: 1.0, year, context }
    }

    /// Weighted edge without further attributes
    pub fn weighted(weight: f64) -> Self {
        Self { weight, year: None, context: None }
    }
}

/// In-memory network over string node keys
///
/// Node keys are paper identifiers, normalized author names, or keyword
/// terms depending on the network kind.
#[derive(Debug, Clone)]
pub struct Network {
    directed: bool,

    /// Node key -> attributes
    nodes: HashMap<String, NodeAttrs>,

    /// Canonical (source, target) -> attributes. For undirected networks the
    /// key is ordered lexicographically so each edge is stored once.
    edges: HashMap<(String, String), EdgeAttrs>,

    /// Adjacency: outgoing neighbors for directed networks, all neighbors
    /// for undirected ones
    outgoing: HashMap<String, Vec<String>>,

    /// Reverse adjacency (directed networks only)
    incoming: HashMap<String, Vec<String>>,
}

impl Network {
    pub fn new(directed: bool) -> Self {
        Self {
            directed,
            nodes: HashMap::new(),
            edges: HashMap::new(),
            outgoing: HashMap::new(),
            incoming: HashMap::new(),
        }
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Add a node; the first attributes seen for a key win
    pub fn add_node(&mut self, id: impl Into<String>, attrs: NodeAttrs) {
        self.nodes.entry(id.into()).or_insert(attrs);
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn node(&self, id: &str) -> Option<&NodeAttrs> {
        self.nodes.get(id)
    }

    fn edge_key(&self, a: &str, b: &str) -> (String, String) {
        if self.directed || a <= b {
            (a.to_string(), b.to_string())
        } else {
            (b.to_string(), a.to_string())
        }
    }

    /// Add an edge between existing nodes.
    ///
    /// Self-loops and edges referencing absent nodes are skipped with a
    /// warning, and duplicate edges keep their original attributes. Returns
    /// whether the edge was stored.
    pub fn add_edge(&mut self, source: &str, target: &str, attrs: EdgeAttrs) -> bool {
        if source == target {
            warn!(node = source, "Skipping self-loop edge");
            return false;
        }
        if !self.has_node(source) || !self.has_node(target) {
            warn!(source, target, "Skipping edge with unknown endpoint");
            return false;
        }

        let key = self.edge_key(source, target);
        if self.edges.contains_key(&key) {
            return false;
        }
        self.edges.insert(key, attrs);

        self.outgoing
            .entry(source.to_string())
            .or_default()
            .push(target.to_string());
        if self.directed {
            self.incoming
                .entry(target.to_string())
                .or_default()
                .push(source.to_string());
        } else {
            self.outgoing
                .entry(target.to_string())
                .or_default()
                .push(source.to_string());
        }

        true
    }

    pub fn has_edge(&self, a: &str, b: &str) -> bool {
        self.edges.contains_key(&self.edge_key(a, b))
    }

    pub fn edge(&self, a: &str, b: &str) -> Option<&EdgeAttrs> {
        self.edges.get(&self.edge_key(a, b))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = (&String, &NodeAttrs)> {
        self.nodes.iter()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = &String> {
        self.nodes.keys()
    }

    pub fn edges(&self) -> impl Iterator<Item = (&(String, String), &EdgeAttrs)> {
        self.edges.iter()
    }

    /// Outgoing neighbors (all neighbors for undirected networks)
    pub fn out_neighbors(&self, id: &str) -> &[String] {
        self.outgoing.get(id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Incoming neighbors (all neighbors for undirected networks)
    pub fn in_neighbors(&self, id: &str) -> &[String] {
        if self.directed {
            self.incoming.get(id).map(|v| v.as_slice()).unwrap_or(&[])
        } else {
            self.out_neighbors(id)
        }
    }

    pub fn out_degree(&self, id: &str) -> usize {
        self.out_neighbors(id).len()
    }

    pub fn in_degree(&self, id: &str) -> usize {
        self.in_neighbors(id).len()
    }

    /// Total degree: in + out for directed networks, neighbor count otherwise
    pub fn degree(&self, id: &str) -> usize {
        if self.directed {
            self.out_degree(id) + self.in_degree(id)
        } else {
            self.out_degree(id)
        }
    }

    /// Distinct neighbors ignoring edge direction, for connectivity and
    /// clustering computations over directed networks
    pub fn undirected_neighbors(&self, id: &str) -> HashSet<&str> {
        let mut set: HashSet<&str> = self.out_neighbors(id).iter().map(String::as_str).collect();
        if self.directed {
            set.extend(self.in_neighbors(id).iter().map(String::as_str));
        }
        set
    }
}
