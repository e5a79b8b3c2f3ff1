//! Editor configuration

use crate::document::StyleSnapshot;
use crate::layout::{CapacityConfig, LayoutConstraints, PaginationConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Quiescence window for keystrokes
pub const INPUT_DEBOUNCE_MS: u64 = 300;

/// Quiescence window for resize events
pub const RESIZE_DEBOUNCE_MS: u64 = 250;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Everything the editor needs to lay out pages. Missing JSON fields take
/// their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    pub capacity: CapacityConfig,
    pub pagination: PaginationConfig,
    pub input_debounce_ms: u64,
    pub resize_debounce_ms: u64,
    pub constraints: LayoutConstraints,
    /// Initial global style
    pub style: StyleSnapshot,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            capacity: CapacityConfig::default(),
            pagination: PaginationConfig::default(),
            input_debounce_ms: INPUT_DEBOUNCE_MS,
            resize_debounce_ms: RESIZE_DEBOUNCE_MS,
            constraints: LayoutConstraints::default(),
            style: StyleSnapshot::default(),
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let capacity = &self.capacity;
        for (name, value) in [
            ("lineHeightFactor", capacity.line_height_factor),
            ("avgCharWidthFactor", capacity.avg_char_width_factor),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!("{} must be positive", name)));
            }
        }
        if !(capacity.safety_factor > 0.0 && capacity.safety_factor <= 1.0) {
            return Err(ConfigError::Invalid(
                "safetyFactor must be within (0, 1]".to_string(),
            ));
        }
        if capacity.min_capacity == 0 {
            return Err(ConfigError::Invalid("minCapacity must be at least 1".to_string()));
        }

        let pagination = &self.pagination;
        for (name, value) in [
            ("paragraphThreshold", pagination.paragraph_threshold),
            ("lineThreshold", pagination.line_threshold),
            ("sentenceThreshold", pagination.sentence_threshold),
            ("clauseThreshold", pagination.clause_threshold),
            ("wordThreshold", pagination.word_threshold),
            ("minProgress", pagination.min_progress),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be within (0, 1]",
                    name
                )));
            }
        }
        if pagination.max_iterations == 0 {
            return Err(ConfigError::Invalid(
                "maxIterations must be at least 1".to_string(),
            ));
        }

        self.constraints.validate().map_err(ConfigError::Invalid)?;

        if !(self.style.font_size.is_finite() && self.style.font_size > 0.0) {
            return Err(ConfigError::Invalid("fontSize must be positive".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.input_debounce_ms, 300);
        assert_eq!(config.resize_debounce_ms, 250);
        assert_eq!(config.pagination.max_iterations, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let config = EditorConfig::from_json(
            r#"{"inputDebounceMs": 120, "capacity": {"lineHeightFactor": 2.0}, "style": {"showMargin": false}}"#,
        )
        .unwrap();
        assert_eq!(config.input_debounce_ms, 120);
        assert_eq!(config.capacity.line_height_factor, 2.0);
        assert_eq!(config.capacity.min_capacity, 100);
        assert!(!config.style.show_margin);
        assert_eq!(config.constraints, LayoutConstraints::default());
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = EditorConfig::from_json(r#"{"pagination": {"wordThreshold": 1.5}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = EditorConfig::from_json(r#"{"capacity": {"safetyFactor": 0}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = EditorConfig::from_json(r#"{"pagination": {"maxIterations": 0}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = EditorConfig::from_json(r#"{"constraints": {"pageHeight": 0}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = EditorConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_json_round_trip() {
        let config = EditorConfig::default();
        let json = config.to_json().unwrap();
        assert_eq!(EditorConfig::from_json(&json).unwrap(), config);
    }
}
