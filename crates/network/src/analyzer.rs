//! Analysis orchestration
//!
//! `NetworkAnalyzer` owns one analysis session: configuration, the
//! normalized corpus, and the built networks. Instances are constructed
//! explicitly and never shared; concurrent analyses each create their own.
//!
//! The top-level `analyze` entry point never propagates an error: a bad
//! corpus yields a structurally valid report with `processing_status` set to
//! `Failed` and zero-valued statistics, so one broken corpus cannot take
//! down a batch run.

use crate::authors::{analyze_author_metrics, AuthorMetrics};
use crate::builder;
use crate::centrality::{
    calculate_centrality_metrics, CentralityConfig, CentralityKind,
};
use crate::export::{export_network_to_path, ExportFormat};
use crate::graph::{Network, NetworkKind};
use crate::influence::{analyze_citation_influence, CitationInfluence, InfluenceConfig};
use crate::matcher::{resolve_citations, HeuristicMatcher, PaperMatcher};
use crate::metrics::{calculate_network_metrics, NetworkMetrics};
use chrono::Utc;
use paperscope_common::config::AnalysisConfig;
use paperscope_common::errors::{AnalysisError, Result};
use paperscope_common::normalize::normalize_papers;
use paperscope_common::records::{PaperRecord, RawPaper};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Terminal state of one analysis run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingStatus {
    Completed,
    Failed,
}

/// Per-network section of the report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkReport {
    pub basic_metrics: NetworkMetrics,
}

/// Human-oriented summary of one network
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkSummary {
    pub network_type: NetworkKind,
    pub basic_metrics: NetworkMetrics,
    pub recommendations: Vec<String>,
}

/// Full results envelope of one analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub run_id: Uuid,

    pub networks: BTreeMap<NetworkKind, NetworkReport>,

    /// Keyed by normalized author name
    pub author_analysis: BTreeMap<String, AuthorMetrics>,

    /// Keyed by paper identifier
    pub influence_analysis: BTreeMap<String, CitationInfluence>,

    pub total_papers_analyzed: usize,

    /// ISO-8601 timestamp of the run
    pub analysis_timestamp: String,

    pub processing_status: ProcessingStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalysisReport {
    /// Structurally valid zero-valued report for a failed run
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            networks: BTreeMap::new(),
            author_analysis: BTreeMap::new(),
            influence_analysis: BTreeMap::new(),
            total_papers_analyzed: 0,
            analysis_timestamp: Utc::now().to_rfc3339(),
            processing_status: ProcessingStatus::Failed,
            error: Some(message.into()),
        }
    }
}

/// One citation network analysis session
pub struct NetworkAnalyzer {
    config: AnalysisConfig,
    matcher: Box<dyn PaperMatcher>,
    papers: Vec<PaperRecord>,
    networks: HashMap<NetworkKind, Network>,
}

impl NetworkAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            matcher: Box::new(HeuristicMatcher),
            papers: Vec::new(),
            networks: HashMap::new(),
        }
    }

    /// Swap the citation resolution policy (e.g. `ExactDoiMatcher` for
    /// precision-sensitive corpora)
    pub fn with_matcher(mut self, matcher: Box<dyn PaperMatcher>) -> Self {
        self.matcher = matcher;
        self
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Thresholds are read at build time only: mutating them affects the
    /// next `build_networks` call, never already-built networks.
    pub fn config_mut(&mut self) -> &mut AnalysisConfig {
        &mut self.config
    }

    pub fn papers(&self) -> &[PaperRecord] {
        &self.papers
    }

    pub fn network(&self, kind: NetworkKind) -> Option<&Network> {
        self.networks.get(&kind)
    }

    fn centrality_config(&self) -> CentralityConfig {
        CentralityConfig {
            damping: self.config.pagerank_damping,
            max_iterations: self.config.pagerank_max_iterations,
            epsilon: self.config.pagerank_epsilon,
        }
    }

    fn influence_config(&self) -> InfluenceConfig {
        InfluenceConfig {
            decay: self.config.influence_decay,
            max_generations: self.config.max_generations,
        }
    }

    /// Normalize the raw corpus and resolve its citations
    pub fn ingest(&mut self, raw: &[RawPaper]) -> Result<()> {
        let mut papers = normalize_papers(raw);
        if papers.is_empty() {
            return Err(AnalysisError::EmptyCorpus);
        }

        resolve_citations(&mut papers, self.matcher.as_ref());
        info!(papers = papers.len(), "Corpus ingested");
        self.papers = papers;
        Ok(())
    }

    /// Build all five networks from the ingested corpus
    pub fn build_networks(&mut self) {
        let citation = builder::build_citation_network(&self.papers);

        self.networks.insert(
            NetworkKind::Cocitation,
            builder::build_cocitation_network(&citation, self.config.cocitation_threshold),
        );
        self.networks.insert(
            NetworkKind::BibliographicCoupling,
            builder::build_coupling_network(&citation, self.config.coupling_threshold),
        );
        self.networks.insert(
            NetworkKind::AuthorCollaboration,
            builder::build_collaboration_network(&self.papers, self.config.collaboration_threshold),
        );
        self.networks.insert(
            NetworkKind::KeywordCooccurrence,
            builder::build_keyword_network(&self.papers),
        );
        self.networks.insert(NetworkKind::Citation, citation);
    }

    fn require_network(&self, kind: NetworkKind) -> Result<&Network> {
        self.networks
            .get(&kind)
            .ok_or_else(|| AnalysisError::NetworkNotBuilt {
                kind: kind.as_str().to_string(),
            })
    }

    /// Structural metrics for one built network
    pub fn network_metrics(&self, kind: NetworkKind) -> Result<NetworkMetrics> {
        let network = self.require_network(kind)?;
        Ok(calculate_network_metrics(
            network,
            kind,
            self.config.most_cited_limit,
        ))
    }

    /// Centrality scores for one built network
    pub fn centrality_metrics(
        &self,
        kind: NetworkKind,
        measures: &[CentralityKind],
    ) -> Result<HashMap<CentralityKind, HashMap<String, f64>>> {
        let network = self.require_network(kind)?;
        Ok(calculate_centrality_metrics(
            network,
            measures,
            &self.centrality_config(),
        ))
    }

    /// Bibliometric profile of every author in the corpus
    pub fn author_metrics(&self) -> Result<BTreeMap<String, AuthorMetrics>> {
        let citation = self.require_network(NetworkKind::Citation)?;
        Ok(analyze_author_metrics(
            &self.papers,
            citation,
            self.config.top_keywords,
        ))
    }

    /// Generational influence profile of every paper
    pub fn citation_influence(&self) -> Result<BTreeMap<String, CitationInfluence>> {
        let citation = self.require_network(NetworkKind::Citation)?;
        let influence = analyze_citation_influence(citation, &self.influence_config());
        Ok(influence.into_iter().collect())
    }

    /// Basic metrics plus tuning recommendations for one network
    pub fn network_summary(&self, kind: NetworkKind) -> Result<NetworkSummary> {
        let basic_metrics = self.network_metrics(kind)?;

        let mut recommendations = Vec::new();
        if basic_metrics.num_nodes == 0 {
            recommendations.push("Network is empty; check citation resolution".to_string());
        } else {
            if basic_metrics.num_nodes < 10 {
                recommendations
                    .push("Corpus is small; metrics may not be representative".to_string());
            }
            if basic_metrics.num_components > 1 {
                recommendations.push(format!(
                    "Network is fragmented into {} components",
                    basic_metrics.num_components
                ));
            }
            if basic_metrics.num_edges > 0 && basic_metrics.density < 0.01 {
                recommendations.push(
                    "Network is sparse; consider lowering edge thresholds".to_string(),
                );
            }
        }

        Ok(NetworkSummary {
            network_type: kind,
            basic_metrics,
            recommendations,
        })
    }

    /// Export a built network; failures are logged and reported as `false`
    pub fn export_network(&self, kind: NetworkKind, path: &Path, format: ExportFormat) -> bool {
        let network = match self.require_network(kind) {
            Ok(network) => network,
            Err(e) => {
                error!(error = %e, "Export failed");
                return false;
            }
        };

        match export_network_to_path(network, path, format) {
            Ok(()) => true,
            Err(e) => {
                error!(
                    error = %e,
                    kind = %kind,
                    path = %path.display(),
                    "Export failed"
                );
                false
            }
        }
    }

    fn run_analysis(&mut self, raw: &[RawPaper]) -> Result<AnalysisReport> {
        self.ingest(raw)?;
        self.build_networks();

        let mut networks = BTreeMap::new();
        for kind in NetworkKind::ALL {
            networks.insert(
                kind,
                NetworkReport {
                    basic_metrics: self.network_metrics(kind)?,
                },
            );
        }

        Ok(AnalysisReport {
            run_id: Uuid::new_v4(),
            networks,
            author_analysis: self.author_metrics()?,
            influence_analysis: self.citation_influence()?,
            total_papers_analyzed: self.papers.len(),
            analysis_timestamp: Utc::now().to_rfc3339(),
            processing_status: ProcessingStatus::Completed,
            error: None,
        })
    }

    /// Run the full pipeline. Never fails: catastrophic problems produce a
    /// `Failed` report with an error message and zero statistics.
    pub fn analyze(&mut self, raw: &[RawPaper]) -> AnalysisReport {
        match self.run_analysis(raw) {
            Ok(report) => {
                info!(
                    run_id = %report.run_id,
                    papers = report.total_papers_analyzed,
                    "Citation network analysis completed"
                );
                report
            }
            Err(e) => {
                warn!(error = %e, "Citation network analysis failed");
                AnalysisReport::failed(e.to_string())
            }
        }
    }
}

impl Default for NetworkAnalyzer {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

/// Run a full analysis with default configuration
pub fn analyze_citation_networks(raw: &[RawPaper]) -> AnalysisReport {
    NetworkAnalyzer::default().analyze(raw)
}

/// Build just the citation network with default configuration
pub fn build_citation_network(raw: &[RawPaper]) -> Network {
    let mut papers = normalize_papers(raw);
    resolve_citations(&mut papers, &HeuristicMatcher);
    builder::build_citation_network(&papers)
}
