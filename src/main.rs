use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::{error, info};

use brandprobe::ingestion::{build_catalog_from_csv, load_keyword_table};
use brandprobe::{RunConfig, runner};

#[derive(Debug, Parser)]
#[command(
    name = "brandprobe",
    disable_help_subcommand = true,
    about = "Adaptive search-query discovery for brand catalogs",
    long_about = "Discover per-brand estimator queries by probing an external quantity-estimating \
                  service and refining optional keywords against observed result URLs."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run query discovery over a catalog against an estimator endpoint.
    Discover(DiscoverArgs),
    /// Assemble a taxonomy catalog from a brand listing and keyword table.
    BuildCatalog(BuildCatalogArgs),
}

#[derive(Debug, clap::Args)]
struct DiscoverArgs {
    #[arg(long, value_name = "URL", help = "Estimator endpoint receiving query POSTs")]
    endpoint: String,
    #[arg(
        long,
        value_name = "PATH",
        default_value = "alcohols.json",
        help = "Catalog input document"
    )]
    catalog: PathBuf,
    #[arg(
        long = "evidence-dir",
        value_name = "DIR",
        default_value = "output",
        help = "Directory for per-brand evidence files (cleared at start)"
    )]
    evidence_dir: PathBuf,
    #[arg(
        long,
        value_name = "PATH",
        default_value = "queries.json",
        help = "Path of the final results document"
    )]
    results: PathBuf,
    #[arg(
        long = "timeout-secs",
        default_value_t = 30,
        help = "Per-probe timeout in seconds; timeouts are transport failures"
    )]
    timeout_secs: u64,
}

#[derive(Debug, clap::Args)]
struct BuildCatalogArgs {
    #[arg(long, value_name = "PATH", help = "CSV brand listing with Brand,Type columns")]
    brands: PathBuf,
    #[arg(long, value_name = "PATH", help = "Keyword table JSON keyed by category and type")]
    keywords: PathBuf,
    #[arg(
        long,
        value_name = "PATH",
        default_value = "alcohols.json",
        help = "Catalog output path"
    )]
    out: PathBuf,
}

fn main() -> ExitCode {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let cli = Cli::parse();
    let outcome = match cli.command {
        Command::Discover(args) => discover(args),
        Command::BuildCatalog(args) => build_catalog(args),
    };
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("[brandprobe] run failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn discover(args: DiscoverArgs) -> Result<(), brandprobe::ProbeError> {
    let config = RunConfig::new(args.endpoint)
        .with_timeout(Duration::from_secs(args.timeout_secs))
        .with_catalog_path(args.catalog)
        .with_evidence_dir(args.evidence_dir)
        .with_results_path(args.results);
    let summary = runner::run(&config)?;
    info!(
        "[brandprobe] wrote {} record(s); {}",
        summary.records_written,
        summary.metrics.summary_line()
    );
    Ok(())
}

fn build_catalog(args: BuildCatalogArgs) -> Result<(), brandprobe::ProbeError> {
    let keywords = load_keyword_table(&args.keywords)?;
    let catalog = build_catalog_from_csv(&args.brands, &keywords)?;
    let raw = serde_json::to_vec_pretty(&catalog)
        .map_err(|err| brandprobe::ProbeError::Catalog(format!("failed encoding catalog: {err}")))?;
    std::fs::write(&args.out, raw)?;
    info!(
        "[brandprobe] wrote catalog with {} categor(ies) to {}",
        catalog.len(),
        args.out.display()
    );
    Ok(())
}
