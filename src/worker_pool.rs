use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use log::{error, info};

use crate::errors::ScrapeError;
use crate::extractor::PageExtractor;
use crate::fetcher::PageFetcher;
use crate::input_loader::Job;
use crate::record_store::RecordStore;

/// FIFO of pending jobs shared across workers. The pop is a single locked
/// operation, so two workers can never take the same job.
pub struct JobQueue {
    jobs: Mutex<VecDeque<Job>>,
}

impl JobQueue {
    pub fn new(jobs: Vec<Job>) -> Self {
        JobQueue {
            jobs: Mutex::new(jobs.into()),
        }
    }

    pub fn take(&self) -> Option<Job> {
        self.jobs.lock().unwrap().pop_front()
    }

    pub fn len(&self) -> usize {
        self.jobs.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Outcome counts for one pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: usize,
    pub failed: usize,
}

/// Fixed pool of workers draining the queue. Each worker fetches,
/// extracts, and persists one job at a time, pausing between jobs to bound
/// the aggregate request rate, and terminates when the queue is empty.
pub struct WorkerPool {
    workers: usize,
    job_delay: Duration,
}

impl WorkerPool {
    pub fn new(workers: usize, job_delay: Duration) -> Self {
        WorkerPool {
            workers: workers.clamp(1, 32),
            job_delay,
        }
    }

    pub fn run(
        &self,
        queue: Arc<JobQueue>,
        extractor: Arc<PageExtractor>,
        store: Arc<RecordStore>,
    ) -> RunSummary {
        info!(
            "Starting {} workers for {} queued games",
            self.workers,
            queue.len()
        );

        let mut handles = Vec::with_capacity(self.workers);
        for worker_id in 0..self.workers {
            let queue = Arc::clone(&queue);
            let extractor = Arc::clone(&extractor);
            let store = Arc::clone(&store);
            let delay = self.job_delay;

            handles.push(thread::spawn(move || {
                let fetcher = PageFetcher::new();
                let mut summary = RunSummary::default();

                while let Some(job) = queue.take() {
                    info!("Worker {} fetching game {}: {}", worker_id, job.game_id, job.url);
                    // A bad page fails this job only; the worker keeps
                    // draining the queue.
                    match process_job(&fetcher, &extractor, &store, &job) {
                        Ok(count) => {
                            info!(
                                "Worker {} captured game {} ({} clues)",
                                worker_id, job.game_id, count
                            );
                            summary.processed += 1;
                        }
                        Err(e) => {
                            error!("Worker {} failed game {}: {}", worker_id, job.game_id, e);
                            summary.failed += 1;
                        }
                    }
                    thread::sleep(delay);
                }

                info!("Worker {} finished: queue drained", worker_id);
                summary
            }));
        }

        let mut total = RunSummary::default();
        for handle in handles {
            if let Ok(summary) = handle.join() {
                total.processed += summary.processed;
                total.failed += summary.failed;
            }
        }
        total
    }
}

fn process_job(
    fetcher: &PageFetcher,
    extractor: &PageExtractor,
    store: &RecordStore,
    job: &Job,
) -> Result<usize, ScrapeError> {
    let (html, resolved_url) = fetcher.fetch(&job.url)?;
    let game = extractor.extract_game(&html, &resolved_url)?;
    store.persist(job, &game)?;
    Ok(game.clues.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn job(game_id: &str) -> Job {
        Job {
            game_id: game_id.to_string(),
            season_title: "Season 1".to_string(),
            url: format!("https://example.com/showgame.php?game_id={game_id}"),
        }
    }

    #[test]
    fn take_is_fifo() {
        let queue = JobQueue::new(vec![job("1"), job("2")]);
        assert_eq!(queue.take().unwrap().game_id, "1");
        assert_eq!(queue.take().unwrap().game_id, "2");
        assert!(queue.take().is_none());
    }

    #[test]
    fn concurrent_draining_hands_out_each_job_once() {
        let jobs: Vec<Job> = (0..100).map(|i| job(&i.to_string())).collect();
        let queue = Arc::new(JobQueue::new(jobs));

        let mut handles = Vec::new();
        for _ in 0..4 {
            let queue = Arc::clone(&queue);
            handles.push(thread::spawn(move || {
                let mut taken = Vec::new();
                while let Some(job) = queue.take() {
                    taken.push(job.game_id);
                }
                taken
            }));
        }

        let mut seen = Vec::new();
        for handle in handles {
            seen.extend(handle.join().unwrap());
        }

        assert_eq!(seen.len(), 100);
        let unique: HashSet<&String> = seen.iter().collect();
        assert_eq!(unique.len(), 100);
        assert!(queue.is_empty());
    }
}
