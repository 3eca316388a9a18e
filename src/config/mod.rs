//! Configuration management for resize-pack
//!
//! Settings are layered with figment, later layers winning:
//!
//! 1. Built-in defaults (`default-config.toml`, embedded at compile time)
//! 2. `resize-pack.toml` in the working directory, or the file given with `--config`
//! 3. `RESIZE_PACK_*` environment variables
//! 4. Command-line flags

use anyhow::{Context, Result, bail};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::texture::ResizeFilter;

const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

/// File picked up from the working directory when no `--config` is given
pub const LOCAL_CONFIG_FILE: &str = "resize-pack.toml";

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "RESIZE_PACK_";

/// Resolved settings for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResizeConfig {
    /// Worker threads (0 = one per CPU core)
    pub workers: usize,
    /// Upper bound on texture size, as a multiple of the declared size
    pub target_scale: f64,
    /// Resampling filter used when downscaling
    pub filter: ResizeFilter,
    /// Descend into symlinked directories during discovery
    pub follow_symlinks: bool,
}

/// Values given on the command line; unset fields leave lower layers alone
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workers: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_scale: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<ResizeFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_symlinks: Option<bool>,
}

impl ResizeConfig {
    /// Load the layered configuration and apply command-line overrides
    pub fn load(custom_config: Option<&Path>, overrides: &ConfigOverrides) -> Result<Self> {
        let mut figment = Figment::new().merge(Toml::string(DEFAULT_CONFIG));

        figment = match custom_config {
            Some(path) => {
                if !path.is_file() {
                    bail!("Config file not found: {}", path.display());
                }
                figment.merge(Toml::file(path))
            }
            None => figment.merge(Toml::file(LOCAL_CONFIG_FILE)),
        };

        let config: ResizeConfig = figment
            .merge(Env::prefixed(ENV_PREFIX))
            .merge(Serialized::defaults(overrides))
            .extract()
            .context("Invalid configuration")?;

        config.validate()?;
        Ok(config)
    }

    /// Reject settings no run could use
    pub fn validate(&self) -> Result<()> {
        if !self.target_scale.is_finite() || self.target_scale <= 0.0 {
            bail!(
                "target_scale must be a positive number, got {}",
                self.target_scale
            );
        }
        Ok(())
    }
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            workers: 0,
            target_scale: 3.0,
            filter: ResizeFilter::default(),
            follow_symlinks: false,
        }
    }
}
