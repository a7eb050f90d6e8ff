//! Spotgate CLI
//!
//! Runs candidate spot selection over one document and prints the retained
//! surface form occurrences as JSON.
//!
//! The document is read from `--input` (or stdin) and must carry the text,
//! the spotted occurrences and, optionally, the tagger output.

use anyhow::{Context as _, Result};
use clap::Parser;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::PathBuf;
use tokio::io::AsyncReadExt;
use tracing::{debug, info};

use spotgate_selector::CoOccurrenceSelector;

mod config;
mod document;

use document::{DocumentInput, SelectedOccurrence};

#[derive(Parser, Debug)]
#[command(name = "spotgate")]
#[command(about = "Candidate spot selection for entity linking", long_about = None)]
struct Cli {
    /// Selector configuration file path
    #[arg(short, long, default_value = "selector.yaml")]
    config: PathBuf,

    /// Input document (JSON); reads stdin when omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Classifier id for single-token candidates
    #[arg(long)]
    unigram_classifier: Option<String>,

    /// Classifier id for multi-token candidates
    #[arg(long)]
    ngram_classifier: Option<String>,

    /// Occurrence statistics snapshot file
    #[arg(short, long)]
    statistics: Option<PathBuf>,

    /// Score occurrences concurrently
    #[arg(long)]
    concurrent: bool,

    /// Print every occurrence with its decision instead of the retained ones
    #[arg(short, long)]
    explain: bool,

    /// Print Prometheus metrics to stderr after selection
    #[arg(short, long)]
    metrics: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let metrics_handle = if cli.metrics {
        Some(init_metrics()?)
    } else {
        None
    };

    let config = config::load(&cli)?;
    info!(
        "Configuration loaded (unigram: {}, ngram: {})",
        config.unigram_classifier.id, config.ngram_classifier.id
    );

    let selector = CoOccurrenceSelector::from_config(&config)
        .await
        .context("Failed to initialize selector")?;

    let document = read_document(cli.input.as_ref()).await?;
    let occurrences = document.into_occurrences()?;
    info!("Selecting among {} occurrences", occurrences.len());

    let output: Vec<SelectedOccurrence> = if cli.explain {
        selector
            .select_with_decisions(occurrences)
            .await
            .iter()
            .map(|(occurrence, decision)| SelectedOccurrence::explained(occurrence, decision))
            .collect()
    } else {
        let selected = if cli.concurrent {
            selector.select_concurrent(occurrences).await
        } else {
            selector.select(occurrences).await
        };
        selected.iter().map(SelectedOccurrence::from).collect()
    };

    println!("{}", serde_json::to_string_pretty(&output)?);

    if let Some(handle) = metrics_handle {
        eprintln!("{}", handle.render());
    }

    Ok(())
}

/// Read the input document from a file, or stdin
async fn read_document(path: Option<&PathBuf>) -> Result<DocumentInput> {
    let content = match path {
        Some(path) => {
            debug!("Reading document from {}", path.display());
            tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?
        }
        None => {
            debug!("Reading document from stdin");
            let mut content = String::new();
            tokio::io::stdin()
                .read_to_string(&mut content)
                .await
                .context("Failed to read stdin")?;
            content
        }
    };

    serde_json::from_str(&content).context("Invalid input document")
}

/// Initialize tracing/logging; stdout is reserved for the selection output
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("spotgate=debug,spotgate_selector=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("spotgate=info,spotgate_selector=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Initialize metrics recorder and return handle for rendering
fn init_metrics() -> Result<PrometheusHandle> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics: {}", e))?;

    metrics::describe_counter!(
        "spotgate_selector_decisions_total",
        "Selection decisions by outcome and reason"
    );
    metrics::describe_counter!(
        "spotgate_classifier_errors_total",
        "Classifier failures by termsize"
    );

    debug!("Metrics recorder initialized");
    Ok(handle)
}
