//! Command-line overrides shared by the tool binaries.

use std::path::PathBuf;

use clap::Args;

use crate::Config;

/// CLI values that override settings loaded from `config.ron`.
#[derive(Args, Debug, Default)]
pub struct CliArgs {
    /// Terrain seed.
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Directory where region files are written.
    #[arg(long, global = true)]
    pub world_dir: Option<PathBuf>,

    /// Worker thread count (0 = one per logical CPU).
    #[arg(long, global = true)]
    pub threads: Option<usize>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(seed) = args.seed {
            self.world.seed = seed;
        }
        if let Some(ref dir) = args.world_dir {
            self.world.world_dir = dir.clone();
        }
        if let Some(threads) = args.threads {
            self.pipeline.worker_threads = threads;
        }
        if let Some(ref level) = args.log_level {
            self.log.level = level.clone();
        }
    }
}
