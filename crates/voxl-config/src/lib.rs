//! Configuration for the voxl toolchain.
//!
//! Runtime-configurable settings that persist to disk as RON files, with
//! CLI overrides via clap, hot-reload detection, and forward/backward
//! compatible serialization.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{Config, LogConfig, MeshConfig, PipelineConfig, WorldConfig};
pub use error::ConfigError;

use std::path::PathBuf;

/// Default config directory: platform config dir + `voxl`, falling back to
/// the working directory.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("voxl"))
        .unwrap_or_else(|| PathBuf::from("."))
}
