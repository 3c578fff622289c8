//! CLI entry point for the sample fetcher.

use anyhow::{Context, Result};
use sample_fetcher_core::{
    DownloadEngine, FetchConfig, ManifestFetcher, SampleClient, ensure_output_dir, sanitized_name,
};
use tracing::{debug, info};

mod cli;
mod output;

use cli::Args;
use output::{StdoutProgress, summary_line};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse_from_env();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");

    let config = args.fetch_config();
    if args.dry_run {
        return run_dry_run(&config).await;
    }
    run(&config).await
}

async fn run(config: &FetchConfig) -> Result<()> {
    info!(
        output_dir = %config.output_dir().display(),
        manifest = config.manifest_url(),
        "sample fetcher starting"
    );

    ensure_output_dir(config.output_dir())
        .await
        .context("failed to prepare output directory")?;

    let fetcher = ManifestFetcher::new().context("failed to build manifest HTTP client")?;
    let manifest = fetcher
        .fetch(config.manifest_url())
        .await
        .context("failed to load sample manifest")?;

    let client = SampleClient::from_config(config).context("failed to build sample HTTP client")?;
    let engine = DownloadEngine::new(client);

    let report = engine
        .process_manifest(&manifest, config.output_dir(), &mut StdoutProgress)
        .await;

    println!("{}", summary_line(&report));
    Ok(())
}

async fn run_dry_run(config: &FetchConfig) -> Result<()> {
    let fetcher = ManifestFetcher::new().context("failed to build manifest HTTP client")?;
    let manifest = fetcher
        .fetch(config.manifest_url())
        .await
        .context("failed to load sample manifest")?;

    println!(
        "Dry run - {} sample(s) for {}, no files downloaded",
        manifest.len(),
        config.output_dir().display()
    );
    for sample in manifest.samples() {
        println!("- {} -> {}", sanitized_name(&sample.name), sample.download);
    }
    Ok(())
}
