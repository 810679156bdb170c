//! Tracing subscriber setup.

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use super::config::AppConfig;

/// Installs the global subscriber: `RUST_LOG` if set, otherwise the
/// configured level, written to the configured or default log file.
///
/// Returns `Ok(false)` if a subscriber was already installed.
///
/// # Errors
/// Returns error if the log file cannot be created.
pub fn init_logging(config: &AppConfig) -> Result<bool> {
    let filter = EnvFilter::builder()
        .with_default_directive(
            LevelFilter::from_level(config.log_level.to_tracing_level()).into(),
        )
        .from_env_lossy();

    let Some(log_path) = config.effective_log_path() else {
        return Ok(tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true))
            .try_init()
            .is_ok());
    };

    let file = open_log_file(&log_path)?;
    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false);

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .is_ok();

    if installed {
        info!(path = %log_path.display(), "Logging initialized");
    }
    Ok(installed)
}

fn open_log_file(path: &Path) -> Result<std::fs::File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .wrap_err_with(|| format!("Failed to create log directory {}", parent.display()))?;
    }

    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .wrap_err_with(|| format!("Failed to open log file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_second_init_is_reported_not_fatal() {
        let dir = tempdir().unwrap();
        let config = AppConfig {
            log_path: Some(dir.path().join("logs").join("wardrobe.log")),
            ..AppConfig::default()
        };

        let first = init_logging(&config).unwrap();
        let second = init_logging(&config).unwrap();

        assert!(!second || !first);
        assert!(dir.path().join("logs").join("wardrobe.log").exists());
    }
}
