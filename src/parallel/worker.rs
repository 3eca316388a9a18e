use anyhow::{Context, Result, bail};
use crossbeam::channel::Sender;
use std::fs;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, trace};

use super::events::WorkerEvent;
use super::partition::Job;
use crate::texture::{
    Action, Classification, FileEntry, ImageTransform, ProcessOutcome, TextureProcessor, Warning,
    classify,
};

/// Processes one [`Job`] on its own thread.
///
/// Files are handled strictly in batch order and each file's full pipeline
/// (read, identify, decide, write) finishes before the next one starts. The
/// worker talks to the coordinator only through its event channel.
pub struct Worker {
    worker_id: usize,
    batch: Vec<FileEntry>,
    processor: TextureProcessor,
}

impl Worker {
    pub fn new(job: Job, transform: Arc<dyn ImageTransform>) -> Self {
        Self {
            worker_id: job.worker_id,
            processor: TextureProcessor::new(job.output_dir, job.target_scale, transform),
            batch: job.batch,
        }
    }

    /// Run the batch to completion, reporting over `events`.
    ///
    /// Ends with exactly one `BatchCompleted` or `Error` event, unless
    /// `cancel` is raised or the receiver hangs up first, in which case the
    /// worker stops quietly after the file in progress.
    pub fn run(self, events: &Sender<WorkerEvent>, cancel: &AtomicBool) {
        let worker_id = self.worker_id;
        debug!("worker-{} starting with {} files", worker_id, self.batch.len());

        let mut count = 0;
        let mut warnings: Vec<Warning> = Vec::new();

        for entry in &self.batch {
            if cancel.load(Ordering::Relaxed) {
                debug!("worker-{} cancelled", worker_id);
                return;
            }

            let outcome = match self.process_entry(entry) {
                Ok(outcome) => outcome,
                Err(e) => {
                    let _ = events.send(WorkerEvent::Error {
                        worker_id,
                        file: Some(entry.path.clone()),
                        message: format!("{e:#}"),
                    });
                    return;
                }
            };

            trace!("worker-{} {:?} {}", worker_id, outcome.action, entry.name);
            if outcome.action != Action::Skipped {
                count += 1;
            }
            warnings.extend(outcome.warnings);

            let completed = WorkerEvent::ItemCompleted {
                worker_id,
                file: entry.path.clone(),
                action: outcome.action,
            };
            if events.send(completed).is_err() {
                return; // Coordinator gone
            }
        }

        let _ = events.send(WorkerEvent::BatchCompleted {
            worker_id,
            count,
            warnings,
        });
    }

    fn process_entry(&self, entry: &FileEntry) -> Result<ProcessOutcome> {
        // Only classifier-accepted files are ever batched
        let classification = classify(&entry.name);
        if classification == Classification::NotATexture {
            bail!("BUG: discovered file {} is not a texture", entry.path.display());
        }

        let data = fs::read(&entry.path)
            .with_context(|| format!("Failed to read {}", entry.path.display()))?;
        self.processor.process(entry, classification, &data)
    }
}
