pub mod candidates;
pub mod config;
pub mod fetcher;
pub mod orchestrator;
pub mod sampler;
pub mod searcher;
pub mod testing;

pub use candidates::{is_valid_document, CandidateStore, RankedCandidate};
pub use config::{
    load_config, load_config_from_env, load_config_from_str, validate_config, Config,
    ConfigError, FetchConfig, RunConfig, SearchConfig,
};
pub use fetcher::{derive_filename, DownloadTarget, FetchError, Fetcher, HttpFetcher};
pub use orchestrator::{DownloadOrchestrator, OrchestratorError, RunReport};
pub use sampler::{load_tuples, RandomSource, RngSource, SamplerError, TupleSampler};
pub use searcher::{SearchError, Searcher, WebSearcher};
