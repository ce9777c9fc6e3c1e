//! Configuration management for PaperScope
//!
//! Supports loading configuration from:
//! - Environment variables (prefixed with APP__)
//! - Configuration files (config.toml, config.yaml)
//! - Default values
//!
//! Threshold and tuning values are instance-scoped: every analyzer owns its
//! own copy, so concurrent analyses cannot race on shared configuration.

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Network construction and bibliometric tuning
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Export configuration
    #[serde(default)]
    pub export: ExportConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Tuning knobs for network construction and bibliometric analysis
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalysisConfig {
    /// Minimum shared-citing-paper count for a co-citation edge
    #[serde(default = "default_cocitation_threshold")]
    pub cocitation_threshold: u32,

    /// Minimum shared-reference count for a bibliographic-coupling edge
    #[serde(default = "default_coupling_threshold")]
    pub coupling_threshold: u32,

    /// Minimum co-authored-paper count for a collaboration edge
    #[serde(default = "default_collaboration_threshold")]
    pub collaboration_threshold: u32,

    /// Per-generation decay applied to citation influence
    #[serde(default = "default_influence_decay")]
    pub influence_decay: f64,

    /// Deepest citation generation followed during influence analysis
    #[serde(default = "default_max_generations")]
    pub max_generations: usize,

    /// Number of keywords reported as an author's research areas
    #[serde(default = "default_top_keywords")]
    pub top_keywords: usize,

    /// Number of papers reported in the most-cited ranking
    #[serde(default = "default_most_cited_limit")]
    pub most_cited_limit: usize,

    /// PageRank damping factor
    #[serde(default = "default_pagerank_damping")]
    pub pagerank_damping: f64,

    /// PageRank iteration cap
    #[serde(default = "default_pagerank_iterations")]
    pub pagerank_max_iterations: usize,

    /// PageRank convergence threshold
    #[serde(default = "default_pagerank_epsilon")]
    pub pagerank_epsilon: f64,
}

/// Export configuration for the batch entry point
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExportConfig {
    /// Directory where network exports are written (disabled when unset)
    pub directory: Option<String>,

    /// Export format: json or csv
    #[serde(default = "default_export_format")]
    pub format: String,
}

/// Observability configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level (debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default = "default_json_logging")]
    pub json_logging: bool,

    /// Service name for tracing
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

// Default value functions
fn default_cocitation_threshold() -> u32 { 2 }
fn default_coupling_threshold() -> u32 { 2 }
fn default_collaboration_threshold() -> u32 { 1 }
fn default_influence_decay() -> f64 { 0.5 }
fn default_max_generations() -> usize { 5 }
fn default_top_keywords() -> usize { 5 }
fn default_most_cited_limit() -> usize { 10 }
fn default_pagerank_damping() -> f64 { 0.85 }
fn default_pagerank_iterations() -> usize { 100 }
fn default_pagerank_epsilon() -> f64 { 1e-6 }
fn default_export_format() -> String { "json".to_string() }
fn default_log_level() -> String { "info".to_string() }
fn default_json_logging() -> bool { false }
fn default_service_name() -> String { "paperscope".to_string() }

impl AppConfig {
    /// Load configuration from environment and files
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            // Start with defaults
            .set_default("analysis.cocitation_threshold", 2)?
            .set_default("analysis.coupling_threshold", 2)?
            .set_default("analysis.collaboration_threshold", 1)?

            // Load base config file
            .add_source(File::with_name("config/default").required(false))

            // Load environment-specific config
            .add_source(File::with_name(&format!("config/{}", env)).required(false))

            // Load local overrides
            .add_source(File::with_name("config/local").required(false))

            // Load from environment variables with APP__ prefix
            // e.g., APP__ANALYSIS__COCITATION_THRESHOLD=3
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true)
            )

            .build()?;

        config.try_deserialize()
    }

    /// Load from a specific TOML file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name(path))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true)
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            cocitation_threshold: default_cocitation_threshold(),
            coupling_threshold: default_coupling_threshold(),
            collaboration_threshold: default_collaboration_threshold(),
            influence_decay: default_influence_decay(),
            max_generations: default_max_generations(),
            top_keywords: default_top_keywords(),
            most_cited_limit: default_most_cited_limit(),
            pagerank_damping: default_pagerank_damping(),
            pagerank_max_iterations: default_pagerank_iterations(),
            pagerank_epsilon: default_pagerank_epsilon(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: None,
            format: default_export_format(),
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logging: default_json_logging(),
            service_name: default_service_name(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            analysis: AnalysisConfig::default(),
            export: ExportConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.analysis.cocitation_threshold, 2);
        assert_eq!(config.analysis.coupling_threshold, 2);
        assert_eq!(config.analysis.collaboration_threshold, 1);
        assert_eq!(config.analysis.max_generations, 5);
    }

    #[test]
    fn test_influence_defaults() {
        let config = AnalysisConfig::default();
        assert!((config.influence_decay - 0.5).abs() < f64::EPSILON);
        assert!((config.pagerank_damping - 0.85).abs() < f64::EPSILON);
    }

    #[test]
    fn test_export_defaults() {
        let config = ExportConfig::default();
        assert!(config.directory.is_none());
        assert_eq!(config.format, "json");
    }
}
