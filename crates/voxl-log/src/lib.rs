//! Structured logging for the voxl toolchain.
//!
//! Span-based, filterable logging via the `tracing` ecosystem: console
//! output with timestamps and module paths, plus optional JSON file logging
//! for post-mortem analysis. Integrates with the configuration system for
//! runtime log level control.

use std::path::Path;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use voxl_config::Config;

/// Initialize the tracing subscriber.
///
/// Console output gets timestamps, module paths, and thread names. When the
/// config enables `json_file`, a JSON log file is also written under
/// `log_dir` (or the config's `log.log_dir` when `None`). `RUST_LOG` wins
/// over the configured level.
pub fn init_logging(log_dir: Option<&Path>, config: Option<&Config>) {
    let filter_str = match config {
        Some(config) if !config.log.level.is_empty() => config.log.level.clone(),
        _ => "info".to_string(),
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(true) // generation workers are named
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    let json_enabled = config.map(|c| c.log.json_file).unwrap_or(false);
    let dir = log_dir
        .map(Path::to_path_buf)
        .or_else(|| config.map(|c| c.log.log_dir.clone()));

    if json_enabled
        && let Some(dir) = dir
        && std::fs::create_dir_all(&dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(dir.join("voxl.log"))
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        subscriber.with(file_layer).init();
        return;
    }

    subscriber.init();
}

/// Create an `EnvFilter` with the default filter string.
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new("info")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_level() {
        let filter = default_env_filter();
        assert!(format!("{}", filter).contains("info"));
    }

    #[test]
    fn test_subsystem_filter() {
        let filter = EnvFilter::new("info,voxl_terrain=debug");
        let filter_str = format!("{}", filter);
        assert!(filter_str.contains("voxl_terrain=debug"));
        assert!(filter_str.contains("info"));
    }

    #[test]
    fn test_env_filter_parsing() {
        let valid_filters = [
            "info",
            "debug,voxl_region=trace",
            "warn,voxl_terrain=debug,voxl_voxel=trace",
            "error",
        ];
        for filter_str in &valid_filters {
            let result = EnvFilter::try_from(*filter_str);
            assert!(result.is_ok(), "Failed to parse filter: {}", filter_str);
        }
    }

    #[test]
    fn test_file_logger_creation() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_file_path = temp_dir.path().join("voxl.log");
        assert_eq!(log_file_path.file_name().unwrap(), "voxl.log");
    }
}
