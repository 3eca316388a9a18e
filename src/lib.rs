//! # resize-pack - downscale oversized custom texture packs
//!
//! Custom texture packs for the Dolphin emulator name every texture
//! `tex1_<width>x<height>_<hash>.<ext>`, where `<width>x<height>` is the
//! texture's native in-game size. Packs are often authored at 4x, 6x or 8x
//! that size; resize-pack brings every texture down to a chosen multiple
//! (3x by default) and copies the rest through untouched.
//!
//! ## Features
//!
//! - **Parallel**: the pack is split into batches processed on a worker pool
//! - **Careful**: normal maps and mipmaps are never re-encoded, and odd
//!   scale factors are reported as warnings
//! - **Fail-fast**: one unreadable texture aborts the whole run
//!
//! ## Quick Start
//!
//! ```bash
//! # Downscale everything above 3x into ./out
//! resize-pack ~/Dolphin/Load/Textures/GALE01 ./out
//!
//! # 2x target, 8 workers
//! resize-pack --target-scale 2 --workers 8 ./pack ./out
//! ```

pub mod cli;
pub mod config;
pub mod discovery;
pub mod parallel;
pub mod texture;

#[cfg(test)]
mod test_support;

pub use cli::{Cli, Output};
pub use config::ResizeConfig;
pub use parallel::{Coordinator, RunConfig, RunReport};

/// Result type alias for resize-pack operations
pub type Result<T> = anyhow::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
