//! Command-line interface for resize-pack
//!
//! Parses arguments with clap, layers them over the configuration files,
//! runs the coordinator with a console observer and prints the report.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

mod observer;
mod output;
mod report;

pub use observer::ConsoleObserver;
pub use output::Output;

use crate::config::{ConfigOverrides, ResizeConfig};
use crate::discovery::resolve_directory;
use crate::parallel::{Coordinator, RunConfig};
use crate::texture::{ImageCrateTransform, ResizeFilter};

/// Downscale oversized textures in a custom texture pack
#[derive(Parser, Debug)]
#[command(name = "resize-pack", author, version, about, long_about = None)]
pub struct Cli {
    /// Texture pack directory to read from
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Existing directory the processed textures are written into
    #[arg(value_name = "DESTINATION")]
    pub destination: PathBuf,

    /// Number of worker threads [default: number of CPU cores]
    #[arg(short = 'j', long, value_name = "N")]
    pub workers: Option<usize>,

    /// Downscale textures larger than this multiple of their declared size [default: 3]
    #[arg(short = 's', long, value_name = "SCALE")]
    pub target_scale: Option<f64>,

    /// Resampling filter used when downscaling [default: lanczos3]
    #[arg(long, value_enum)]
    pub filter: Option<ResizeFilter>,

    /// Descend into symlinked directories
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Use custom configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON document on stdout
    Json,
}

impl Cli {
    /// Execute the run described by the arguments
    pub fn run(self) -> Result<()> {
        setup_logging(self.verbose, self.quiet);

        let overrides = ConfigOverrides {
            workers: self.workers,
            target_scale: self.target_scale,
            filter: self.filter,
            follow_symlinks: self.follow_symlinks.then_some(true),
        };
        let config = ResizeConfig::load(self.config.as_deref(), &overrides)?;
        debug!("configuration: {:?}", config);

        // JSON output owns stdout
        let output = Output::new(
            self.verbose > 0,
            self.quiet || self.format == OutputFormat::Json,
        );
        let source = resolve_directory(&self.source)?;
        let destination = resolve_directory(&self.destination)?;
        output.info(&format!("Directory: {}", source.display()));
        output.info(&format!("Output: {}", destination.display()));

        let coordinator = Coordinator::new(
            RunConfig {
                source,
                output: destination,
                workers: config.workers,
                target_scale: config.target_scale,
                follow_symlinks: config.follow_symlinks,
            },
            Arc::new(ImageCrateTransform::new(config.filter)),
        );

        let observer = ConsoleObserver::new(&output);
        let report = coordinator.run(&observer)?;

        match self.format {
            OutputFormat::Text => report::print_text_report(&output, &report),
            OutputFormat::Json => report::print_json_report(&report)?,
        }
        Ok(())
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info,ignore=warn"),
            2 => tracing_subscriber::EnvFilter::new("debug,ignore=warn,globset=warn"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
