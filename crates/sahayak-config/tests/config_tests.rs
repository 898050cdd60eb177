// SPDX-FileCopyrightText: 2026 Sahayak Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Sahayak configuration system.

use sahayak_config::diagnostic::{ConfigError, suggest_key};
use sahayak_config::model::SahayakConfig;
use sahayak_config::{load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_sahayak_config() {
    let toml = r#"
[agent]
name = "helpline"
log_level = "debug"

[classifier]
model_name = "paraphrase-MiniLM-L6-v2"
model_dir = "/var/lib/sahayak/models"
intent_threshold = 0.3
type_confidence_floor = 0.2

[storage]
database_path = "/tmp/tickets.db"
wal_mode = false
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.agent.name, "helpline");
    assert_eq!(config.agent.log_level, "debug");
    assert_eq!(config.classifier.model_name, "paraphrase-MiniLM-L6-v2");
    assert_eq!(
        config.classifier.model_dir.as_deref(),
        Some("/var/lib/sahayak/models")
    );
    assert!((config.classifier.intent_threshold - 0.3).abs() < f64::EPSILON);
    assert_eq!(config.classifier.type_confidence_floor, Some(0.2));
    assert_eq!(config.storage.database_path, "/tmp/tickets.db");
    assert!(!config.storage.wal_mode);
}

/// Missing optional sections use defaults without error.
#[test]
fn missing_optional_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert_eq!(config.agent.name, "sahayak");
    assert_eq!(config.agent.log_level, "info");
    assert_eq!(config.classifier.model_name, "all-MiniLM-L6-v2");
    assert!(config.classifier.model_dir.is_none());
    assert!((config.classifier.intent_threshold - 0.25).abs() < f64::EPSILON);
    assert!(
        config.classifier.type_confidence_floor.is_none(),
        "type resolution has no confidence floor by default"
    );
    assert_eq!(config.storage.database_path, "sahayak.db");
    assert!(config.storage.wal_mode);
}

/// Unknown field in [classifier] section is rejected by deny_unknown_fields.
#[test]
fn unknown_field_in_classifier_produces_error() {
    let toml = r#"
[classifier]
intent_treshold = 0.3
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("intent_treshold"),
        "error should mention the bad key, got: {err_str}"
    );
}

/// Unexpected top-level section is rejected by deny_unknown_fields.
#[test]
fn deny_unknown_fields_at_top_level() {
    let toml = r#"
[database]
path = "x.db"
"#;

    let err =
        load_config_from_str(toml).expect_err("unknown top-level section should be rejected");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("database"),
        "error should mention unknown field, got: {err_str}"
    );
}

/// Dot-notation overrides (the form env vars map into) take precedence over TOML.
#[test]
fn dotted_override_beats_toml_value() {
    use figment::{
        Figment,
        providers::{Format, Serialized, Toml},
    };

    let toml_content = r#"
[classifier]
intent_threshold = 0.4
"#;

    // Simulates SAHAYAK_CLASSIFIER_INTENT_THRESHOLD mapping to the dotted key.
    let config: SahayakConfig = Figment::new()
        .merge(Serialized::defaults(SahayakConfig::default()))
        .merge(Toml::string(toml_content))
        .merge(("classifier.intent_threshold", 0.5))
        .extract()
        .expect("should merge override");

    assert!((config.classifier.intent_threshold - 0.5).abs() < f64::EPSILON);
}

/// Missing config files are silently skipped (Figment's Toml::file() behavior).
#[test]
fn missing_config_files_silently_skipped() {
    use figment::{
        Figment,
        providers::{Format, Serialized, Toml},
    };

    let config: SahayakConfig = Figment::new()
        .merge(Serialized::defaults(SahayakConfig::default()))
        .merge(Toml::file("/nonexistent/path/sahayak.toml"))
        .extract()
        .expect("missing file should be silently skipped");

    assert_eq!(config.agent.name, "sahayak");
}

/// Unknown key with a close valid key produces a "did you mean" suggestion.
#[test]
fn diagnostic_error_includes_suggestion_and_valid_keys() {
    let toml = r#"
[classifier]
intent_treshold = 0.3
"#;

    let errors = load_and_validate_str(toml).expect_err("should produce errors");
    assert!(!errors.is_empty());

    let has_unknown_key = errors.iter().any(|e| {
        matches!(e, ConfigError::UnknownKey { key, suggestion, valid_keys, .. } if {
            key == "intent_treshold"
                && suggestion.as_deref() == Some("intent_threshold")
                && valid_keys.contains("model_name")
        })
    });
    assert!(
        has_unknown_key,
        "should have UnknownKey error with suggestion, got: {errors:?}"
    );
}

/// No suggestion is offered for a typo with no close match.
#[test]
fn diagnostic_no_suggestion_for_distant_typo() {
    let valid_keys = &["model_name", "model_dir", "intent_threshold"];
    assert!(suggest_key("qqqqqq", valid_keys).is_none());
}

/// Invalid type (string where number expected) produces a clear message.
#[test]
fn diagnostic_invalid_type_message() {
    let toml = r#"
[classifier]
intent_threshold = "high"
"#;

    let err = load_config_from_str(toml).expect_err("should reject invalid type");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("invalid type") || err_str.contains("intent_threshold"),
        "error should mention type mismatch, got: {err_str}"
    );
}

/// ConfigError implements miette::Diagnostic and renders with the suggestion.
#[test]
fn config_error_renders_with_miette() {
    use miette::{Diagnostic, GraphicalReportHandler};

    let error = ConfigError::UnknownKey {
        key: "intent_treshold".to_string(),
        suggestion: Some("intent_threshold".to_string()),
        valid_keys: "model_name, model_dir, intent_threshold, type_confidence_floor".to_string(),
        span: None,
        src: None,
    };

    assert!(error.code().is_some(), "should have diagnostic code");
    let help = error.help().expect("should have help text").to_string();
    assert!(help.contains("did you mean `intent_threshold`"));

    let handler = GraphicalReportHandler::new();
    let mut buf = String::new();
    handler
        .render_report(&mut buf, &error)
        .expect("should render without error");
    assert!(buf.contains("intent_treshold"));
}

/// Validation catches an out-of-range threshold from TOML.
#[test]
fn validation_catches_out_of_range_threshold() {
    let toml = r#"
[classifier]
intent_threshold = 2.0
"#;

    let errors = load_and_validate_str(toml).expect_err("out-of-range threshold should fail");
    let has_validation_error = errors.iter().any(|e| {
        matches!(e, ConfigError::Validation { message } if message.contains("intent_threshold"))
    });
    assert!(has_validation_error, "should flag intent_threshold range");
}

/// load_and_validate_str with valid TOML returns Ok config.
#[test]
fn load_and_validate_valid_toml() {
    let toml = r#"
[agent]
name = "test"
"#;

    let config = load_and_validate_str(toml).expect("valid TOML should validate");
    assert_eq!(config.agent.name, "test");
}
