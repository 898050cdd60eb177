// SPDX-FileCopyrightText: 2026 Sahayak Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Sahayak triage engine.

use thiserror::Error;

/// The primary error type used across all Sahayak crates.
#[derive(Debug, Error)]
pub enum SahayakError {
    /// Configuration errors (invalid TOML, missing required fields, bad ranges).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (connection, query failure, constraint violation).
    ///
    /// Surfaced verbatim from the persistence layer; the classification
    /// path never produces this variant.
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Embedding inference errors (tokenization, ONNX session, tensor shape).
    #[error("embedding error: {message}")]
    Embedding {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Embedding model or tokenizer failed to load or download.
    ///
    /// Fatal at startup: the classifier must be considered unavailable and
    /// callers should disable classification-dependent features rather than
    /// retry per-request.
    #[error("model error: {0}")]
    Model(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
