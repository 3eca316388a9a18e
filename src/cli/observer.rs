use indicatif::ProgressBar;
use std::path::Path;
use tracing::debug;

use super::output::Output;
use crate::parallel::{RunObserver, RunReport};
use crate::texture::{Action, Warning};

/// Renders a run on the console: one progress bar for all workers.
///
/// Created per run and dropped when the run ends.
pub struct ConsoleObserver {
    progress: ProgressBar,
}

impl ConsoleObserver {
    pub fn new(output: &Output) -> Self {
        Self {
            progress: output.progress_bar(0),
        }
    }
}

impl RunObserver for ConsoleObserver {
    fn run_started(&self, total: usize, workers: usize) {
        self.progress.set_length(total as u64);
        self.progress.set_message(format!("({workers} workers)"));
    }

    fn item_completed(&self, _worker_id: usize, file: &Path, action: Action) {
        debug!("{:?}: {}", action, file.display());
        self.progress.inc(1);
    }

    fn batch_completed(&self, worker_id: usize, count: usize, warnings: &[Warning]) {
        debug!(
            "worker-{} done: {} files, {} warnings",
            worker_id,
            count,
            warnings.len()
        );
    }

    fn fatal(&self, _message: &str) {
        self.progress.abandon();
    }

    fn run_finished(&self, _report: &RunReport) {
        self.progress.finish_and_clear();
    }
}
