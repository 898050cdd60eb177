// SPDX-FileCopyrightText: 2026 Sahayak Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Sahayak triage engine.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Sahayak configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SahayakConfig {
    /// Service identity and logging settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Classification engine settings.
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Ticket lifecycle store settings.
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Service identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the service.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "sahayak".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Classification engine configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ClassifierConfig {
    /// Name of the sentence-embedding model to use.
    #[serde(default = "default_model_name")]
    pub model_name: String,

    /// Directory holding `model.onnx` and `tokenizer.json`. `None` resolves
    /// to the per-user data directory (models are downloaded on first run).
    #[serde(default)]
    pub model_dir: Option<String>,

    /// Minimum cosine similarity for an intent label to be surfaced (0.0-1.0).
    /// Below this, the label is not reported at all; an utterance may carry
    /// zero, one, or many labels.
    #[serde(default = "default_intent_threshold")]
    pub intent_threshold: f64,

    /// Optional minimum similarity for type resolution (0.0-1.0). When unset,
    /// every utterance is assigned its nearest catalog type regardless of
    /// absolute similarity; when set, best matches below the floor fall back
    /// to the generic unclassified type.
    #[serde(default)]
    pub type_confidence_floor: Option<f64>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            model_name: default_model_name(),
            model_dir: None,
            intent_threshold: default_intent_threshold(),
            type_confidence_floor: None,
        }
    }
}

fn default_model_name() -> String {
    "all-MiniLM-L6-v2".to_string()
}

fn default_intent_threshold() -> f64 {
    0.25
}

/// Ticket lifecycle store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL journal mode (recommended; disable only for network mounts).
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    "sahayak.db".to_string()
}

fn default_wal_mode() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = SahayakConfig::default();
        assert_eq!(config.agent.name, "sahayak");
        assert_eq!(config.agent.log_level, "info");
        assert_eq!(config.classifier.model_name, "all-MiniLM-L6-v2");
        assert!((config.classifier.intent_threshold - 0.25).abs() < f64::EPSILON);
        assert!(config.classifier.type_confidence_floor.is_none());
        assert_eq!(config.storage.database_path, "sahayak.db");
        assert!(config.storage.wal_mode);
    }
}
