//! Validated configuration plus the decoded pattern table

use super::course::PatternTable;
use crate::config::{Config, ConfigError};

/// Everything the update function needs besides the state itself
#[derive(Debug, Clone, PartialEq)]
pub struct Rules {
    config: Config,
    patterns: PatternTable,
    rows: usize,
}

impl Rules {
    /// Validate `config` and pair it with the standard pattern table
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        Self::with_patterns(config, PatternTable::standard())
    }

    pub fn with_patterns(config: Config, patterns: PatternTable) -> Result<Self, ConfigError> {
        config.validate()?;
        if patterns.is_empty() {
            return Err(ConfigError::EmptyPatternTable);
        }
        if patterns.width() != config.cols {
            return Err(ConfigError::PatternWidth {
                index: 0,
                expected: config.cols,
                found: patterns.width(),
            });
        }
        let rows = config.rows();
        Ok(Self {
            config,
            patterns,
            rows,
        })
    }

    /// Reference configuration and table
    pub fn standard() -> Self {
        let config = Config::default();
        let rows = config.rows();
        Self {
            config,
            patterns: PatternTable::standard(),
            rows,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn patterns(&self) -> &PatternTable {
        &self.patterns
    }

    /// Row window cap
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.config.cols
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_rules_validate() {
        let standard = Rules::standard();
        let checked = Rules::new(Config::default()).expect("reference config is valid");
        assert_eq!(standard, checked);
        assert_eq!(standard.rows(), 15);
        assert_eq!(standard.cols(), 9);
    }

    #[test]
    fn test_column_mismatch_rejected() {
        let config = Config {
            cols: 8,
            ..Default::default()
        };
        assert!(matches!(
            Rules::new(config),
            Err(ConfigError::PatternWidth {
                expected: 8,
                found: 9,
                ..
            })
        ));
    }
}
