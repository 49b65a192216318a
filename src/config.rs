use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Runtime settings for a scrape run.
#[derive(Clone, Debug)]
pub struct Config {
    /// Number of concurrent workers draining the job queue.
    pub workers: usize,
    /// Pause each worker takes between jobs. Aggregate request rate is
    /// roughly `workers / job_delay`.
    pub job_delay: Duration,
    /// Path of the job-list metadata file written by the discovery crawl.
    pub metadata_path: PathBuf,
    /// Directory receiving one artifact per captured game.
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workers: 3,
            job_delay: Duration::from_secs(2),
            metadata_path: PathBuf::from("_metadata.json"),
            output_dir: PathBuf::from("output"),
        }
    }
}

impl Config {
    /// Defaults overridden by `SCRAPER_WORKERS`, `SCRAPER_DELAY_SECS`,
    /// `SCRAPER_METADATA`, and `SCRAPER_OUTPUT_DIR`.
    pub fn from_env() -> Self {
        let mut config = Config::default();
        if let Some(workers) = parse_env("SCRAPER_WORKERS") {
            config.workers = workers;
        }
        if let Some(secs) = parse_env("SCRAPER_DELAY_SECS") {
            config.job_delay = Duration::from_secs(secs);
        }
        if let Ok(path) = env::var("SCRAPER_METADATA") {
            config.metadata_path = PathBuf::from(path);
        }
        if let Ok(path) = env::var("SCRAPER_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(path);
        }
        config.workers = config.workers.clamp(1, 32);
        config
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|value| value.parse().ok())
}
