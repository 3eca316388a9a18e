use std::path::PathBuf;

use crate::texture::FileEntry;

/// A contiguous slice of the discovered files, owned by one worker
#[derive(Debug, Clone)]
pub struct Job {
    pub worker_id: usize,
    pub batch: Vec<FileEntry>,
    pub output_dir: PathBuf,
    pub target_scale: f64,
}

/// Resolve the configured worker count (0 = one per available CPU core)
pub fn resolve_worker_count(configured: usize) -> usize {
    if configured > 0 {
        configured
    } else {
        std::cmp::max(1, num_cpus::get())
    }
}

/// Split `files` into at most `worker_count` order-preserving batches.
///
/// Every batch holds `ceil(len / worker_count)` files except possibly the
/// last, so fewer jobs than workers come back when there are few files.
/// No files means no jobs.
pub fn partition(
    files: Vec<FileEntry>,
    worker_count: usize,
    output_dir: PathBuf,
    target_scale: f64,
) -> Vec<Job> {
    if files.is_empty() {
        return Vec::new();
    }

    let worker_count = worker_count.max(1);
    let batch_size = files.len().div_ceil(worker_count);

    let mut jobs = Vec::with_capacity(worker_count);
    let mut remaining = files.into_iter().peekable();
    while remaining.peek().is_some() {
        jobs.push(Job {
            worker_id: jobs.len(),
            batch: remaining.by_ref().take(batch_size).collect(),
            output_dir: output_dir.clone(),
            target_scale,
        });
    }
    jobs
}
