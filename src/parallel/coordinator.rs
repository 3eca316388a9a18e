use anyhow::{Result, anyhow, bail};
use crossbeam::channel::{Receiver, bounded};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use super::events::{RunObserver, WorkerEvent};
use super::partition::{Job, partition, resolve_worker_count};
use super::worker::Worker;
use crate::discovery::{discover_textures, resolve_directory};
use crate::texture::{ImageTransform, Warning};

/// Settings for a single run
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub source: PathBuf,
    pub output: PathBuf,
    /// Number of workers, 0 = one per CPU core
    pub workers: usize,
    pub target_scale: f64,
    pub follow_symlinks: bool,
}

/// Warnings raised by one worker, kept together for reporting
#[derive(Debug, Clone, PartialEq)]
pub struct WorkerWarnings {
    pub worker_id: usize,
    pub warnings: Vec<Warning>,
}

/// Summary of a completed run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub total_files: usize,
    pub workers: usize,
    pub elapsed: Duration,
    pub worker_warnings: Vec<WorkerWarnings>,
}

impl RunReport {
    /// All warnings, grouped by worker in worker order
    pub fn warnings(&self) -> impl Iterator<Item = &Warning> {
        self.worker_warnings.iter().flat_map(|group| group.warnings.iter())
    }

    pub fn warning_count(&self) -> usize {
        self.worker_warnings.iter().map(|group| group.warnings.len()).sum()
    }
}

/// Drives a full run: discovery, partitioning, the worker pool, aggregation.
///
/// Workers never share state with each other or with the coordinator;
/// progress and warnings reach the coordinator only as [`WorkerEvent`]s and
/// are forwarded to the run's [`RunObserver`]. The first worker error
/// cancels the remaining workers and fails the run.
pub struct Coordinator {
    config: RunConfig,
    transform: Arc<dyn ImageTransform>,
}

impl Coordinator {
    pub fn new(config: RunConfig, transform: Arc<dyn ImageTransform>) -> Self {
        Self { config, transform }
    }

    pub fn run(&self, observer: &dyn RunObserver) -> Result<RunReport> {
        let start_time = Instant::now();

        let source = resolve_directory(&self.config.source)?;
        let output = resolve_directory(&self.config.output)?;
        info!("source: {}", source.display());
        info!("output: {}", output.display());

        let files = discover_textures(&source, self.config.follow_symlinks)?;
        let total_files = files.len();
        let worker_count = resolve_worker_count(self.config.workers);
        let jobs = partition(files, worker_count, output, self.config.target_scale);

        observer.run_started(total_files, jobs.len());
        debug!("{} textures across {} workers", total_files, jobs.len());

        let worker_warnings = self.execute(jobs, observer)?;
        let report = RunReport {
            total_files: worker_warnings.iter().map(|(count, _)| count).sum(),
            workers: worker_warnings.len(),
            elapsed: start_time.elapsed(),
            worker_warnings: worker_warnings.into_iter().map(|(_, group)| group).collect(),
        };

        info!(
            "{} files processed in {:.2}s",
            report.total_files,
            report.elapsed.as_secs_f64()
        );
        observer.run_finished(&report);
        Ok(report)
    }

    /// Run one worker thread per job and collect each worker's count and warnings
    fn execute(
        &self,
        jobs: Vec<Job>,
        observer: &dyn RunObserver,
    ) -> Result<Vec<(usize, WorkerWarnings)>> {
        if jobs.is_empty() {
            return Ok(Vec::new());
        }

        let worker_count = jobs.len();
        let (event_tx, event_rx) = bounded(worker_count * 4);
        let cancel = AtomicBool::new(false);

        crossbeam::thread::scope(|s| {
            for job in jobs {
                let event_tx = event_tx.clone();
                let cancel = &cancel;
                let worker = Worker::new(job, self.transform.clone());
                s.spawn(move |_| worker.run(&event_tx, cancel));
            }

            // Workers hold the only senders now, so the channel closes when they all exit
            drop(event_tx);

            let collected = Self::collect_events(event_rx, worker_count, observer);
            if collected.is_err() {
                cancel.store(true, Ordering::Relaxed);
            }
            collected
        })
        .map_err(|_| anyhow!("Thread panic occurred during processing"))?
    }

    /// Consume worker events until every worker completed or one failed.
    ///
    /// Takes the receiver by value so that returning early hangs up on any
    /// worker still trying to send.
    fn collect_events(
        event_rx: Receiver<WorkerEvent>,
        worker_count: usize,
        observer: &dyn RunObserver,
    ) -> Result<Vec<(usize, WorkerWarnings)>> {
        let mut completed = Vec::with_capacity(worker_count);

        while completed.len() < worker_count {
            let Ok(event) = event_rx.recv() else {
                bail!(
                    "Workers exited early: {} of {} batches completed",
                    completed.len(),
                    worker_count
                );
            };

            match event {
                WorkerEvent::ItemCompleted {
                    worker_id,
                    file,
                    action,
                } => observer.item_completed(worker_id, &file, action),
                WorkerEvent::BatchCompleted {
                    worker_id,
                    count,
                    warnings,
                } => {
                    debug!("worker-{} finished {} files", worker_id, count);
                    observer.batch_completed(worker_id, count, &warnings);
                    completed.push((
                        count,
                        WorkerWarnings {
                            worker_id,
                            warnings,
                        },
                    ));
                }
                WorkerEvent::Error {
                    worker_id,
                    file,
                    message,
                } => {
                    let message = match file {
                        Some(file) => format!("{}: {}", file.display(), message),
                        None => message,
                    };
                    observer.fatal(&message);
                    bail!("worker-{} failed: {}", worker_id, message);
                }
            }
        }

        completed.sort_by_key(|(_, group)| group.worker_id);
        Ok(completed)
    }
}
