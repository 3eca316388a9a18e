use std::path::{Path, PathBuf};

use super::coordinator::RunReport;
use crate::texture::{Action, Warning};

/// Message sent from a worker to the coordinator
#[derive(Debug, Clone, PartialEq)]
pub enum WorkerEvent {
    /// One file of the batch is done
    ItemCompleted {
        worker_id: usize,
        file: PathBuf,
        action: Action,
    },
    /// The whole batch is done; always the last event of a successful worker
    BatchCompleted {
        worker_id: usize,
        count: usize,
        warnings: Vec<Warning>,
    },
    /// The worker hit a fatal error and stopped
    Error {
        worker_id: usize,
        file: Option<PathBuf>,
        message: String,
    },
}

/// Receives run progress from the coordinator.
///
/// An observer is created for a single run. All calls come from the
/// coordinator thread, in the order the coordinator handles worker events.
pub trait RunObserver {
    /// Discovery finished; `total` textures will be spread over `workers` workers
    fn run_started(&self, _total: usize, _workers: usize) {}

    /// A worker finished one file
    fn item_completed(&self, _worker_id: usize, _file: &Path, _action: Action) {}

    /// A worker finished its whole batch
    fn batch_completed(&self, _worker_id: usize, _count: usize, _warnings: &[Warning]) {}

    /// A worker failed and the run is being torn down
    fn fatal(&self, _message: &str) {}

    /// Every worker completed
    fn run_finished(&self, _report: &RunReport) {}
}

/// Observer that ignores everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl RunObserver for NullObserver {}
