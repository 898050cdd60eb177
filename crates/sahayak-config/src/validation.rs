// SPDX-FileCopyrightText: 2026 Sahayak Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as similarity ranges and non-empty paths.

use crate::diagnostic::ConfigError;
use crate::model::SahayakConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &SahayakConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !LOG_LEVELS.contains(&config.agent.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "agent.log_level must be one of {}, got `{}`",
                LOG_LEVELS.join(", "),
                config.agent.log_level
            ),
        });
    }

    if config.classifier.model_name.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "classifier.model_name must not be empty".to_string(),
        });
    }

    let threshold = config.classifier.intent_threshold;
    if !(0.0..=1.0).contains(&threshold) {
        errors.push(ConfigError::Validation {
            message: format!(
                "classifier.intent_threshold must be within 0.0-1.0, got {threshold}"
            ),
        });
    }

    if let Some(floor) = config.classifier.type_confidence_floor
        && !(0.0..=1.0).contains(&floor)
    {
        errors.push(ConfigError::Validation {
            message: format!(
                "classifier.type_confidence_floor must be within 0.0-1.0, got {floor}"
            ),
        });
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&SahayakConfig::default()).is_ok());
    }

    #[test]
    fn threshold_out_of_range_rejected() {
        let mut config = SahayakConfig::default();
        config.classifier.intent_threshold = 1.5;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("intent_threshold"));
    }

    #[test]
    fn negative_floor_rejected() {
        let mut config = SahayakConfig::default();
        config.classifier.type_confidence_floor = Some(-0.1);
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn bad_log_level_rejected() {
        let mut config = SahayakConfig::default();
        config.agent.log_level = "loud".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn empty_database_path_rejected() {
        let mut config = SahayakConfig::default();
        config.storage.database_path = "  ".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn multiple_errors_collected() {
        let mut config = SahayakConfig::default();
        config.agent.log_level = "loud".to_string();
        config.classifier.intent_threshold = -2.0;
        config.storage.database_path = String::new();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
