use std::process::ExitCode;
use std::sync::Arc;

use log::{error, info};

use trivia_scraper_lib::{
    input_loader, logger, resume, Config, JobQueue, PageExtractor, RecordStore, WorkerPool,
};

fn main() -> ExitCode {
    logger::init();
    let config = Config::from_env();
    info!("Starting trivia archive scraper...");

    // No job list means nothing can run at all
    let metadata = match input_loader::load_metadata(&config.metadata_path) {
        Ok(metadata) => metadata,
        Err(e) => {
            error!(
                "Failed to load job list from {:?}: {}",
                config.metadata_path, e
            );
            return ExitCode::FAILURE;
        }
    };
    let jobs = input_loader::jobs_from_metadata(&metadata);

    let store = match RecordStore::new(&config.output_dir) {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to open output store {:?}: {}", config.output_dir, e);
            return ExitCode::FAILURE;
        }
    };
    let captured = match store.captured_game_ids() {
        Ok(captured) => captured,
        Err(e) => {
            error!("Failed to scan output store {:?}: {}", config.output_dir, e);
            return ExitCode::FAILURE;
        }
    };

    let pending = resume::pending_jobs(jobs, &captured);
    if pending.is_empty() {
        info!("Nothing to do: every game is already captured.");
        return ExitCode::SUCCESS;
    }

    let queue = Arc::new(JobQueue::new(pending));
    let pool = WorkerPool::new(config.workers, config.job_delay);
    let summary = pool.run(queue, Arc::new(PageExtractor::new()), Arc::new(store));

    info!(
        "Run complete: {} games captured, {} failed.",
        summary.processed, summary.failed
    );
    if summary.failed > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
