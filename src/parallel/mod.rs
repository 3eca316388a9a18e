//! Work distribution across a pool of worker threads
//!
//! A run is split into contiguous batches, one per worker. Each worker owns
//! its batch outright and reports back over a channel; nothing is shared
//! between workers, so the processing path needs no locking.
//!
//! ```text
//! ┌──────────────┐   Job    ┌──────────┐  WorkerEvent  ┌──────────────┐
//! │ Coordinator  │ ───────▶ │ Worker 0 │ ────────────▶ │ Coordinator  │
//! │              │ ───────▶ │ Worker 1 │ ────────────▶ │              │
//! │ • discovery  │ ───────▶ │ Worker N │ ────────────▶ │ • progress   │
//! │ • partition  │          └──────────┘               │ • warnings   │
//! └──────────────┘                                     │ • exit state │
//!                                                      └──────────────┘
//! ```
//!
//! Each worker emits one [`WorkerEvent::ItemCompleted`] per file, in batch
//! order, then a single [`WorkerEvent::BatchCompleted`] carrying its warnings.
//! A worker that fails sends [`WorkerEvent::Error`] instead and stops; the
//! coordinator then cancels the rest of the pool and fails the run. There
//! are no retries and no partial results.
//!
//! # Example
//!
//! ```rust
//! use resize_pack::parallel::partition;
//! use resize_pack::texture::FileEntry;
//! use std::path::PathBuf;
//!
//! let files: Vec<FileEntry> = (0..10)
//!     .map(|i| FileEntry::new(PathBuf::from(format!("/pack/tex1_8x8_{i}.png")), format!("tex1_8x8_{i}.png")))
//!     .collect();
//!
//! let jobs = partition(files, 4, PathBuf::from("/out"), 3.0);
//! let sizes: Vec<usize> = jobs.iter().map(|job| job.batch.len()).collect();
//! assert_eq!(sizes, vec![3, 3, 3, 1]);
//! ```

pub mod coordinator;
pub mod events;
pub mod partition;
pub mod worker;

pub use coordinator::{Coordinator, RunConfig, RunReport, WorkerWarnings};
pub use events::{NullObserver, RunObserver, WorkerEvent};
pub use partition::{Job, partition, resolve_worker_count};
pub use worker::Worker;
