use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Send tracing output to a file.
///
/// The terminal UI owns stderr, so without a log file no subscriber is
/// installed and events are dropped. `RUST_LOG` overrides the default filter.
pub fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Ignore a second init, e.g. when called from several tests
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .compact()
        .try_init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_log_file_is_noop() {
        assert!(init_tracing(None).is_ok());
    }

    #[test]
    fn test_creates_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snake.log");

        init_tracing(Some(&path)).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_unwritable_log_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("snake.log");
        assert!(init_tracing(Some(&path)).is_err());
    }
}
