mod args;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{error::ErrorKind, Parser};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tuplefetch_core::{
    load_config, load_config_from_env, validate_config, DownloadOrchestrator, Fetcher,
    HttpFetcher, RngSource, Searcher, WebSearcher,
};

use args::Cli;

/// Exit code for a malformed command line.
const USAGE_EXIT_CODE: i32 = 2;

#[tokio::main]
async fn main() {
    // Initialize logging; stdout is reserved for the startup line
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            println!("Try again with correct number of inputs");
            println!("{}", e.render());
            std::process::exit(USAGE_EXIT_CODE);
        }
    };

    println!(
        "Called with download folder: {}, {}",
        cli.download_folder.display(),
        cli.tuple_filename.display()
    );

    if let Err(e) = run(cli).await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    // Load configuration
    let mut config = match &cli.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            load_config(path).with_context(|| format!("Failed to load config from {:?}", path))?
        }
        None => load_config_from_env().context("Failed to load config from environment")?,
    };
    cli.apply_overrides(&mut config.run);

    validate_config(&config).context("Configuration validation failed")?;

    info!(
        max_documents = config.run.max_documents,
        max_downloads = config.run.max_downloads,
        max_tuple_searches = config.run.max_tuple_searches,
        endpoint = %config.search.endpoint,
        "Configuration loaded"
    );

    let searcher: Arc<dyn Searcher> = Arc::new(WebSearcher::new(config.search.clone()));
    let fetcher: Arc<dyn Fetcher> = Arc::new(HttpFetcher::new(&config.fetch));
    info!("Using searcher: {}, fetcher: {}", searcher.name(), fetcher.name());

    let orchestrator =
        DownloadOrchestrator::new(config.run.clone(), searcher, fetcher, &cli.download_folder);

    let report = orchestrator
        .run_from_file(&cli.tuple_filename, RngSource::from_seed_option(config.run.seed))
        .await
        .context("Run aborted")?;

    info!(
        duration_ms = report.duration_ms,
        searches_failed = report.searches_failed,
        downloads_succeeded = report.downloads_succeeded,
        downloads_failed = report.downloads_failed,
        "Run finished"
    );
    match serde_json::to_string(&report) {
        Ok(json) => info!(report = %json, "Run report"),
        Err(e) => error!(error = %e, "Failed to serialize run report"),
    }

    Ok(())
}
