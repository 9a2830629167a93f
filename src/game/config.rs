use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::error::GameError;

/// Largest row or column count a grid may have
pub const MAX_GRID_DIM: usize = u16::MAX as usize;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of grid rows when the grid is not fitted to the terminal
    pub rows: usize,
    /// Number of grid columns when the grid is not fitted to the terminal
    pub cols: usize,
    /// Derive the grid from the terminal size, re-deriving it on every resize
    pub fit_to_terminal: bool,
    /// Period of the game tick in milliseconds
    pub tick_interval_ms: u64,
    /// Period of the elapsed-time clock in milliseconds
    pub clock_interval_ms: u64,
    /// Score awarded for each food eaten
    pub food_reward: u32,
    /// Fixed RNG seed for food placement; random when unset
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: 12,
            cols: 20,
            fit_to_terminal: true,
            tick_interval_ms: 200,
            clock_interval_ms: 1000,
            food_reward: 10,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a fixed-size configuration
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            fit_to_terminal: false,
            ..Default::default()
        }
    }

    /// Create a small fixed grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Load a configuration from a TOML file. Missing keys take defaults.
    pub fn load(path: &Path) -> Result<Self, GameError> {
        let text = std::fs::read_to_string(path).map_err(|source| GameError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&text).map_err(|source| GameError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        let in_range = |n: usize| (1..=MAX_GRID_DIM).contains(&n);
        if !in_range(self.rows) || !in_range(self.cols) {
            return Err(GameError::InvalidGrid {
                rows: i64::try_from(self.rows).unwrap_or(i64::MAX),
                cols: i64::try_from(self.cols).unwrap_or(i64::MAX),
            });
        }
        if self.tick_interval_ms == 0 {
            return Err(GameError::InvalidConfig(
                "tick_interval_ms must be greater than zero".into(),
            ));
        }
        if self.clock_interval_ms == 0 {
            return Err(GameError::InvalidConfig(
                "clock_interval_ms must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn clock_interval(&self) -> Duration {
        Duration::from_millis(self.clock_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.tick_interval_ms, 200);
        assert_eq!(config.clock_interval_ms, 1000);
        assert_eq!(config.food_reward, 10);
        assert!(config.fit_to_terminal);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15, 30);
        assert_eq!(config.rows, 15);
        assert_eq!(config.cols, 30);
        assert!(!config.fit_to_terminal);
    }

    #[test]
    fn test_validate_rejects_empty_grid() {
        let config = GameConfig::new(0, 10);
        assert!(matches!(
            config.validate(),
            Err(GameError::InvalidGrid { rows: 0, cols: 10 })
        ));
    }

    #[test]
    fn test_validate_rejects_oversized_grid() {
        assert!(GameConfig::new(MAX_GRID_DIM, MAX_GRID_DIM).validate().is_ok());

        let too_tall = GameConfig::new(2_147_483_648, 1);
        assert!(matches!(
            too_tall.validate(),
            Err(GameError::InvalidGrid {
                rows: 2_147_483_648,
                cols: 1
            })
        ));
        assert!(GameConfig::new(1, MAX_GRID_DIM + 1).validate().is_err());
        assert!(GameConfig::new(3_000_000_000, 1).validate().is_err());
    }

    #[test]
    fn test_load_rejects_oversized_grid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "rows = 3000000000").unwrap();
        writeln!(file, "cols = 10").unwrap();

        let result = GameConfig::load(file.path());
        assert!(matches!(result, Err(GameError::InvalidGrid { .. })));
    }

    #[test]
    fn test_validate_rejects_zero_tick() {
        let config = GameConfig {
            tick_interval_ms: 0,
            ..GameConfig::small()
        };
        assert!(matches!(
            config.validate(),
            Err(GameError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "rows = 8").unwrap();
        writeln!(file, "cols = 16").unwrap();
        writeln!(file, "tick_interval_ms = 150").unwrap();

        let config = GameConfig::load(file.path()).unwrap();
        assert_eq!(config.rows, 8);
        assert_eq!(config.cols, 16);
        assert_eq!(config.tick_interval_ms, 150);
        assert_eq!(config.food_reward, 10);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = GameConfig::load(&dir.path().join("missing.toml"));
        assert!(matches!(result, Err(GameError::ConfigIo { .. })));
    }

    #[test]
    fn test_load_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "rows = \"many\"").unwrap();

        let result = GameConfig::load(file.path());
        assert!(matches!(result, Err(GameError::ConfigParse { .. })));
    }
}
