// SPDX-FileCopyrightText: 2026 Sahayak Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Sahayak triage engine.
//!
//! Provides the shared error type, the domain types flowing between the
//! classifier and the ticket lifecycle store, and the embedding trait the
//! classifier is built against.

pub mod embedding;
pub mod error;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use embedding::{TextEmbedder, cosine_similarity, l2_normalize};
pub use error::SahayakError;
pub use types::{
    Category, ClassificationResult, Conversation, EntityBag, EntityKind, Grievance,
    GrievanceStatus, IntentScore, QueryRecord, QueryStatus, RecordId, RoutingDestination,
    Severity, UNKNOWN_INTENT,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_variants_construct() {
        let _config = SahayakError::Config("bad".into());
        let _storage = SahayakError::Storage {
            source: Box::new(std::io::Error::other("down")),
        };
        let _embedding = SahayakError::Embedding {
            message: "tokenize".into(),
            source: None,
        };
        let _model = SahayakError::Model("missing tokenizer.json".into());
        let _internal = SahayakError::Internal("unexpected".into());
    }

    #[test]
    fn category_display_matches_wire_string() {
        assert_eq!(Category::Grievance.to_string(), "GRIEVANCE");
        assert_eq!(
            "QUERY".parse::<Category>().expect("should parse"),
            Category::Query
        );
    }
}
