// SPDX-FileCopyrightText: 2026 Sahayak Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./sahayak.toml` > `~/.config/sahayak/sahayak.toml`
//! > `/etc/sahayak/sahayak.toml` with environment variable overrides via the
//! `SAHAYAK_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::SahayakConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/sahayak/sahayak.toml` (system-wide)
/// 3. `~/.config/sahayak/sahayak.toml` (user XDG config)
/// 4. `./sahayak.toml` (local directory)
/// 5. `SAHAYAK_*` environment variables
pub fn load_config() -> Result<SahayakConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and for callers that supply their own TOML.
pub fn load_config_from_str(toml_content: &str) -> Result<SahayakConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SahayakConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<SahayakConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SahayakConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for config loading (exposed for diagnostic use).
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(SahayakConfig::default()))
        .merge(Toml::file("/etc/sahayak/sahayak.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("sahayak/sahayak.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("sahayak.toml"))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `SAHAYAK_CLASSIFIER_INTENT_THRESHOLD`
/// must map to `classifier.intent_threshold`, not `classifier.intent.threshold`.
fn env_provider() -> Env {
    Env::prefixed("SAHAYAK_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        let mapped = key
            .as_str()
            .replacen("agent_", "agent.", 1)
            .replacen("classifier_", "classifier.", 1)
            .replacen("storage_", "storage.", 1);
        mapped.into()
    })
}
