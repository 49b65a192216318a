use std::collections::HashSet;

use log::info;

use crate::input_loader::Job;

/// Jobs whose game is not yet in the store, in the original job order.
/// Re-running against a fully captured store yields an empty set.
pub fn pending_jobs(all: Vec<Job>, captured: &HashSet<String>) -> Vec<Job> {
    let total = all.len();
    let pending: Vec<Job> = all
        .into_iter()
        .filter(|job| !captured.contains(&job.game_id))
        .collect();
    info!(
        "{} of {} games already captured, {} pending",
        total - pending.len(),
        total,
        pending.len()
    );
    pending
}
