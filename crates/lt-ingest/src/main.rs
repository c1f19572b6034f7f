//! logtriage: parse uploaded log files into normalized, severity-tagged
//! records and append them as JSON lines.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use lt_ingest::{FileLogSource, FileValidator, IngestConfig, Ingestor, JsonLinesSink};
use lt_parser::ParsePipeline;

#[derive(Parser)]
#[command(name = "logtriage")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Normalize and classify application log files", long_about = None)]
struct Cli {
    /// TOML config file (defaults apply when omitted)
    #[arg(short, long)]
    config: Option<String>,

    /// Append records to this JSON-lines file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Provenance label attached to every batch
    #[arg(short, long)]
    source: Option<String>,

    /// Print the registered parsers in detection order and exit
    #[arg(long)]
    list_parsers: bool,

    /// Log files to ingest
    #[arg(required_unless_present = "list_parsers")]
    files: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();

    let pipeline = ParsePipeline::with_defaults();
    if cli.list_parsers {
        for name in pipeline.available_parsers() {
            println!("{name}");
        }
        return Ok(());
    }

    // ── Load config ─────────────────────────────────────────────
    let mut config = match cli.config.as_deref() {
        Some(path) => IngestConfig::from_file(path)?,
        None => IngestConfig::default(),
    };
    if let Some(label) = cli.source {
        config.source_label = label;
    }
    if let Some(path) = cli.output {
        config.output.path = Some(path);
    }
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        batch_size = config.batch_size,
        source = %config.source_label,
        "logtriage starting"
    );

    // ── Wire source, sink, ingestor ─────────────────────────────
    let source = FileLogSource::new(FileValidator::from_config(&config));
    let sink = match config.output.path.as_deref() {
        Some(path) => JsonLinesSink::append_to(path).await?,
        None => JsonLinesSink::stdout(),
    };
    let ingestor = Ingestor::new(pipeline, &config);

    // ── Ingest files in order ───────────────────────────────────
    let mut failed = 0usize;
    for path in &cli.files {
        match ingestor.ingest(path, &source, &sink).await {
            Ok(summary) => {
                eprintln!("{}", serde_json::to_string(&summary)?);
            }
            Err(e) => {
                failed += 1;
                tracing::error!(path = %path, error = %e, "ingestion failed");
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{failed} of {} file(s) failed to ingest", cli.files.len());
    }
    Ok(())
}
