// SPDX-FileCopyrightText: 2026 Sahayak Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Zero-shot ticket classification engine for the Sahayak triage system.
//!
//! Turns a free-text (or transcribed-voice) customer utterance into a
//! structured, routable classification with no supervised training data:
//!
//! - **OnnxEmbedder**: local all-MiniLM-L6-v2 inference (384-dim)
//! - **ModelManager**: first-run model download from HuggingFace
//! - **IntentCatalog / IntentIndex**: multi-label intent detection over
//!   embedded label descriptions
//! - **TypeCatalog / TypeIndex**: query/grievance type resolution by
//!   nearest catalog entry
//! - **EntityExtractor**: deterministic regex entity extraction
//! - **TicketClassifier**: the orchestrator combining all of the above
//!
//! All catalog embeddings are computed once at startup; classification is
//! pure computation afterwards and safe to run concurrently.

pub mod catalog;
pub mod classifier;
pub mod embedder;
pub mod entities;
pub mod intents;
pub mod model_manager;

#[cfg(test)]
pub(crate) mod testing;

pub use catalog::{TicketType, TypeCatalog, TypeIndex, TypeMatch, UNCLASSIFIED_TYPE_KEY};
pub use classifier::{ClassifierSettings, TicketClassifier};
pub use embedder::{EMBEDDING_DIM, OnnxEmbedder};
pub use entities::EntityExtractor;
pub use intents::{DEFAULT_INTENT_THRESHOLD, IntentCatalog, IntentIndex, IntentLabel};
pub use model_manager::{DEFAULT_MODEL_NAME, ModelManager};
