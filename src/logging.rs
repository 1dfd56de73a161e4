use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use tracing::level_filters::LevelFilter;

use crate::config::AppConfig;
use crate::error::{AppError, Result};

/// Send `tracing` output to the configured log file. The terminal is owned by
/// the UI, so nothing is logged when no file location is known.
pub fn init(config: &AppConfig) -> Result<()> {
    let level = config.log_level();
    if level == LevelFilter::OFF {
        return Ok(());
    }
    let Some(path) = config.log_file() else {
        return Ok(());
    };
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| AppError::Config(format!("cannot install logger: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogConfig;

    #[test]
    fn off_level_installs_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("triumf.log");
        let config = AppConfig {
            log: LogConfig {
                level: Some("off".into()),
                file: Some(path.display().to_string()),
            },
            ..Default::default()
        };
        init(&config).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn creates_log_file_and_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("triumf.log");
        let config = AppConfig {
            log: LogConfig {
                level: Some("debug".into()),
                file: Some(path.display().to_string()),
            },
            ..Default::default()
        };
        // A subscriber may already be installed by another test; the file is
        // still created before that is detected.
        let _ = init(&config);
        assert!(path.exists());
    }
}
