use anyhow::{Context, Result};
use std::fs::OpenOptions;

use crate::config::Config;

/// Route `log` output to the log file; the terminal belongs to the UI.
pub fn init(config: &Config) -> Result<()> {
    let path = config.log_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    env_logger::Builder::new()
        .parse_filters(&config.log_level)
        .parse_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("Logger already initialized")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_unwritable_log_dir_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();
        let config = Config {
            log_file: Some(blocker.join("resume-builder.log")),
            ..Config::default()
        };

        let err = init(&config).unwrap_err();
        assert!(err.to_string().contains("Failed to create log directory"));
    }

    #[test]
    fn test_log_file_that_is_a_directory_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            log_file: Some(PathBuf::from(dir.path())),
            ..Config::default()
        };

        let err = init(&config).unwrap_err();
        assert!(err.to_string().contains("Failed to open log file"));
    }
}
