//! Game configuration
//!
//! Built once at startup (defaults or a JSON file) and passed by reference into
//! the simulation. Never mutated after validation.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// How the scroll handler treats elapsed time worth more than one interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScrollPolicy {
    /// Emit at most one row per update and carry the remainder forward
    #[default]
    SingleRow,
    /// Emit one row for every full interval accumulated
    CatchUp,
}

impl ScrollPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScrollPolicy::SingleRow => "single_row",
            ScrollPolicy::CatchUp => "catch_up",
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cell size must be non-zero")]
    ZeroCellSize,
    #[error("column count must be non-zero")]
    NoColumns,
    #[error("screen holds {rows} rows, need at least 2")]
    TooFewRows { rows: usize },
    #[error("fps must be non-zero")]
    ZeroFps,
    #[error("{name} must be a positive number of milliseconds, got {value}")]
    BadInterval { name: &'static str, value: f64 },
    #[error("pattern table is empty")]
    EmptyPatternTable,
    #[error("pattern {index} is {found} cells wide, expected {expected}")]
    PatternWidth {
        index: usize,
        expected: usize,
        found: usize,
    },
}

/// Fixed game constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Viewport width in pixels (hosts only)
    pub screen_width: u32,
    /// Viewport height in pixels; together with `cell_size` decides the row count
    pub screen_height: u32,
    pub cell_size: u32,
    /// Lane width in cells
    pub cols: usize,
    /// Target frame rate. Advisory: the core is driven by elapsed time.
    pub fps: u32,
    /// Time to emit one course row (ms)
    pub scroll_interval_ms: f64,
    /// Minimum time between two accepted lateral moves (ms)
    pub key_repeat_delay_ms: f64,
    pub scroll_policy: ScrollPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            screen_width: 360,
            screen_height: 600,
            cell_size: 40,
            cols: 9,
            fps: 60,
            // 10 frames at 60 fps
            scroll_interval_ms: 166.67,
            // 5 frames at 60 fps
            key_repeat_delay_ms: 83.33,
            scroll_policy: ScrollPolicy::SingleRow,
        }
    }
}

impl Config {
    /// Number of visible course rows (also the row window cap)
    pub fn rows(&self) -> usize {
        if self.cell_size == 0 {
            return 0;
        }
        (self.screen_height / self.cell_size) as usize
    }

    /// Row the player sits on, two up from the bottom
    pub fn player_row(&self) -> usize {
        self.rows().saturating_sub(2)
    }

    /// Host tick length for a fixed-rate loop (ms)
    pub fn tick_ms(&self) -> f64 {
        1000.0 / f64::from(self.fps.max(1))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        if self.cols == 0 {
            return Err(ConfigError::NoColumns);
        }
        let rows = self.rows();
        if rows < 2 {
            return Err(ConfigError::TooFewRows { rows });
        }
        if self.fps == 0 {
            return Err(ConfigError::ZeroFps);
        }
        if !self.scroll_interval_ms.is_finite() || self.scroll_interval_ms <= 0.0 {
            return Err(ConfigError::BadInterval {
                name: "scroll_interval_ms",
                value: self.scroll_interval_ms,
            });
        }
        if !self.key_repeat_delay_ms.is_finite() || self.key_repeat_delay_ms < 0.0 {
            return Err(ConfigError::BadInterval {
                name: "key_repeat_delay_ms",
                value: self.key_repeat_delay_ms,
            });
        }
        Ok(())
    }

    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!(
            "Loaded config from {} ({} cols x {} rows, scroll {} ms, policy {})",
            path.display(),
            config.cols,
            config.rows(),
            config.scroll_interval_ms,
            config.scroll_policy.as_str()
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_values() {
        let config = Config::default();
        assert_eq!(config.screen_width, 360);
        assert_eq!(config.screen_height, 600);
        assert_eq!(config.cell_size, 40);
        assert_eq!(config.cols, 9);
        assert_eq!(config.fps, 60);
        assert_eq!(config.rows(), 15);
        assert_eq!(config.player_row(), 13);
        assert_eq!(config.scroll_policy, ScrollPolicy::SingleRow);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = Config::from_json_str(r#"{ "cols": 7, "scroll_policy": "catch_up" }"#)
            .expect("valid config");
        assert_eq!(config.cols, 7);
        assert_eq!(config.scroll_policy, ScrollPolicy::CatchUp);
        assert_eq!(config.screen_height, 600);
    }

    #[test]
    fn test_validation_errors() {
        let config = Config {
            cell_size: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroCellSize)));

        let config = Config {
            screen_height: 40,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TooFewRows { rows: 1 })
        ));

        let config = Config {
            scroll_interval_ms: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::BadInterval { name: "scroll_interval_ms", .. })
        ));

        assert!(matches!(
            Config::from_json_str("{ not json"),
            Err(ConfigError::Json(_))
        ));
    }
}
