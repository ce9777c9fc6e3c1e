//! PaperScope Batch Analyzer
//!
//! Runs the citation network analysis over a paper dump:
//! 1. Loads raw paper records from a JSON file
//! 2. Normalizes records and resolves citations
//! 3. Builds the five networks and computes metrics
//! 4. Writes the analysis report and optional network exports

mod errors;
mod input;

use paperscope_common::{config::AppConfig, VERSION};
use paperscope_network::{ExportFormat, NetworkAnalyzer, NetworkKind, ProcessingStatus};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

struct CliArgs {
    input: PathBuf,
    out: Option<PathBuf>,
}

fn parse_args() -> Option<CliArgs> {
    let mut args = std::env::args().skip(1);
    let mut input = None;
    let mut out = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--out" => out = args.next().map(PathBuf::from),
            _ => input = Some(PathBuf::from(arg)),
        }
    }

    input.map(|input| CliArgs { input, out })
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.observability.log_level));

    if config.observability.json_logging {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}

fn export_networks(analyzer: &NetworkAnalyzer, directory: &Path, format: ExportFormat) {
    if let Err(e) = std::fs::create_dir_all(directory) {
        warn!(error = %e, dir = %directory.display(), "Could not create export directory");
        return;
    }

    for kind in NetworkKind::ALL {
        let extension = match format {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        };
        let path = directory.join(format!("{}.{}", kind.as_str(), extension));
        if analyzer.export_network(kind, &path, format) {
            info!(kind = %kind, path = %path.display(), "Network written");
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration ({}), using defaults", e);
        AppConfig::default()
    });

    init_tracing(&config);

    info!("Starting PaperScope Analyzer v{}", VERSION);

    let Some(args) = parse_args() else {
        eprintln!("Usage: analyzer <papers.json> [--out report.json]");
        std::process::exit(2);
    };

    // Load the paper dump
    let papers = input::load_papers(&args.input)?;

    // Run the analysis
    let mut analyzer = NetworkAnalyzer::new(config.analysis.clone());
    let report = analyzer.analyze(&papers);

    // Export networks when configured
    if let Some(directory) = &config.export.directory {
        let format = match config.export.format.parse::<ExportFormat>() {
            Ok(format) => format,
            Err(e) => {
                warn!(error = %e, "Falling back to JSON export");
                ExportFormat::Json
            }
        };
        export_networks(&analyzer, Path::new(directory), format);
    }

    // Write the report
    let rendered = serde_json::to_string_pretty(&report)?;
    match &args.out {
        Some(path) => {
            std::fs::write(path, &rendered)?;
            info!(path = %path.display(), "Report written");
        }
        None => println!("{}", rendered),
    }

    if report.processing_status == ProcessingStatus::Failed {
        warn!(error = ?report.error, "Analysis did not complete");
        std::process::exit(1);
    }

    Ok(())
}
