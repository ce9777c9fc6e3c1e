//! Network export
//!
//! Serializes a built network to a JSON node-link document or to a pair of
//! CSV files (`<path>_nodes.csv`, `<path>_edges.csv`). Output ordering is
//! deterministic: nodes by id, edges by (source, target).

use crate::graph::{Network, NodeKind};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Json,
    Csv,
}

impl std::str::FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(ExportError::UnsupportedFormat {
                format: other.to_string(),
            }),
        }
    }
}

/// Export error types
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Unsupported export format: {format}")]
    UnsupportedFormat { format: String },

    #[error("Network not built: {kind}")]
    NetworkNotBuilt { kind: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Node entry of the node-link schema
#[derive(Debug, Serialize, Deserialize)]
pub struct NodeLinkNode {
    pub id: String,
    pub label: String,
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

/// Link entry of the node-link schema
#[derive(Debug, Serialize, Deserialize)]
pub struct NodeLinkLink {
    pub source: String,
    pub target: String,
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

/// JSON node-link document: `{"directed": ..., "nodes": [...], "links": [...]}`
#[derive(Debug, Serialize, Deserialize)]
pub struct NodeLinkDocument {
    pub directed: bool,
    pub nodes: Vec<NodeLinkNode>,
    pub links: Vec<NodeLinkLink>,
}

impl NodeLinkDocument {
    pub fn from_network(network: &Network) -> Self {
        let mut nodes: Vec<NodeLinkNode> = network
            .nodes()
            .map(|(id, attrs)| NodeLinkNode {
                id: id.clone(),
                label: attrs.label.clone(),
                kind: attrs.kind,
                year: attrs.year,
            })
            .collect();
        nodes.sort_by(|a, b| a.id.cmp(&b.id));

        let mut links: Vec<NodeLinkLink> = network
            .edges()
            .map(|((source, target), attrs)| NodeLinkLink {
                source: source.clone(),
                target: target.clone(),
                weight: attrs.weight,
                year: attrs.year,
                context: attrs.context.clone(),
            })
            .collect();
        links.sort_by(|a, b| (&a.source, &a.target).cmp(&(&b.source, &b.target)));

        Self {
            directed: network.is_directed(),
            nodes,
            links,
        }
    }
}

fn node_kind_str(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Paper => "paper",
        NodeKind::Author => "author",
        NodeKind::Keyword => "keyword",
    }
}

fn write_json(network: &Network, path: &Path) -> Result<(), ExportError> {
    let document = NodeLinkDocument::from_network(network);
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &document)?;
    writer.flush()?;
    Ok(())
}

/// Derive the paired CSV paths from the caller-provided stem
fn csv_paths(path: &Path) -> (PathBuf, PathBuf) {
    let stem = path.with_extension("");
    let nodes = PathBuf::from(format!("{}_nodes.csv", stem.display()));
    let edges = PathBuf::from(format!("{}_edges.csv", stem.display()));
    (nodes, edges)
}

fn write_csv(network: &Network, path: &Path) -> Result<(), ExportError> {
    let document = NodeLinkDocument::from_network(network);
    let (nodes_path, edges_path) = csv_paths(path);

    let mut nodes = csv::Writer::from_path(&nodes_path)?;
    nodes.write_record(["id", "label", "kind", "year"])?;
    for node in &document.nodes {
        nodes.write_record([
            node.id.as_str(),
            node.label.as_str(),
            node_kind_str(node.kind),
            &node.year.map(|y| y.to_string()).unwrap_or_default(),
        ])?;
    }
    nodes.flush()?;

    let mut edges = csv::Writer::from_path(&edges_path)?;
    edges.write_record(["source", "target", "weight", "year", "context"])?;
    for link in &document.links {
        edges.write_record([
            link.source.as_str(),
            link.target.as_str(),
            &link.weight.to_string(),
            &link.year.map(|y| y.to_string()).unwrap_or_default(),
            link.context.as_deref().unwrap_or_default(),
        ])?;
    }
    edges.flush()?;

    Ok(())
}

/// Write a network to disk in the requested format
pub fn export_network_to_path(
    network: &Network,
    path: &Path,
    format: ExportFormat,
) -> Result<(), ExportError> {
    match format {
        ExportFormat::Json => write_json(network, path)?,
        ExportFormat::Csv => write_csv(network, path)?,
    }

    info!(
        path = %path.display(),
        format = ?format,
        nodes = network.node_count(),
        edges = network.edge_count(),
        "Network exported"
    );
    Ok(())
}
