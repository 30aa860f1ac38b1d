use std::path::PathBuf;

use clap::Parser;
use tuplefetch_core::RunConfig;

/// Search the web for each tuple, rank result URLs by how often they recur,
/// and download the most frequent documents.
#[derive(Debug, Parser)]
#[command(name = "download-files", version)]
pub struct Cli {
    /// Folder to download documents into (created if missing)
    pub download_folder: PathBuf,

    /// File with one search tuple per line
    pub tuple_filename: PathBuf,

    /// Number of top-ranked documents to download [default: 10]
    pub max_documents: Option<usize>,

    /// Result limit requested for each search [default: 10]
    pub max_downloads: Option<u32>,

    /// Number of tuples sampled (with replacement) for searching [default: 50]
    pub max_tuple_searches: Option<usize>,

    /// TOML configuration file
    #[arg(long, env = "TUPLEFETCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Seed for tuple sampling, for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Searches in flight at once
    #[arg(long)]
    pub search_concurrency: Option<usize>,

    /// Downloads in flight at once
    #[arg(long)]
    pub download_concurrency: Option<usize>,
}

impl Cli {
    /// Apply values given on the command line over `run`.
    pub fn apply_overrides(&self, run: &mut RunConfig) {
        if let Some(n) = self.max_documents {
            run.max_documents = n;
        }
        if let Some(n) = self.max_downloads {
            run.max_downloads = n;
        }
        if let Some(n) = self.max_tuple_searches {
            run.max_tuple_searches = n;
        }
        if let Some(n) = self.search_concurrency {
            run.search_concurrency = n;
        }
        if let Some(n) = self.download_concurrency {
            run.download_concurrency = n;
        }
        if self.seed.is_some() {
            run.seed = self.seed;
        }
    }
}
