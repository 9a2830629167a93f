use std::path::PathBuf;

/// Errors raised by the game core and its configuration
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// Grid dimensions must both lie in 1..=MAX_GRID_DIM
    #[error("invalid grid {rows}x{cols}: rows and cols must both be between 1 and 65535")]
    InvalidGrid { rows: i64, cols: i64 },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("failed to read config file {path}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
