// SPDX-FileCopyrightText: 2026 Sahayak Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Classification orchestrator.
//!
//! Combines the embedding provider, both catalogs, and the entity extractor
//! into one classification per utterance. Stateless after construction: the
//! catalog indexes are read-only, so `classify` is re-entrant and safe to
//! call from any number of threads behind an `Arc`. Embedding is the only
//! potentially slow step; treat `classify` as blocking and offload it to a
//! worker pool from async callers.

use std::sync::Arc;

use tracing::debug;

use sahayak_config::model::ClassifierConfig;
use sahayak_core::embedding::{TextEmbedder, l2_normalize};
use sahayak_core::error::SahayakError;
use sahayak_core::types::{ClassificationResult, RoutingDestination, UNKNOWN_INTENT};

use crate::catalog::{TypeCatalog, TypeIndex};
use crate::entities::EntityExtractor;
use crate::intents::{DEFAULT_INTENT_THRESHOLD, IntentCatalog, IntentIndex};

/// Tunables for the classification pipeline.
#[derive(Debug, Clone)]
pub struct ClassifierSettings {
    /// Minimum similarity for an intent label to be surfaced.
    pub intent_threshold: f32,
    /// Optional minimum similarity for type resolution; `None` preserves
    /// the always-assign behavior.
    pub type_confidence_floor: Option<f32>,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            intent_threshold: DEFAULT_INTENT_THRESHOLD,
            type_confidence_floor: None,
        }
    }
}

impl From<&ClassifierConfig> for ClassifierSettings {
    fn from(config: &ClassifierConfig) -> Self {
        Self {
            intent_threshold: config.intent_threshold as f32,
            type_confidence_floor: config.type_confidence_floor.map(|f| f as f32),
        }
    }
}

/// Map a primary intent to the team or system that should handle it.
///
/// Unmapped intents (including [`UNKNOWN_INTENT`]) fall through to general
/// support.
fn route_for_intent(primary_intent: &str) -> RoutingDestination {
    match primary_intent {
        "NETWORK_ISSUE" | "TECHNICAL_SUPPORT" => RoutingDestination::TechnicalSupport,
        "BILLING_COMPLAINT" => RoutingDestination::BillingTeam,
        "RECHARGE_REQUEST" | "BALANCE_QUERY" => RoutingDestination::AutomatedSystem,
        "PLAN_CHANGE" | "OFFER_INQUIRY" => RoutingDestination::SalesTeam,
        "SUPPORT_REQUEST" => RoutingDestination::CustomerSupport,
        _ => RoutingDestination::GeneralSupport,
    }
}

/// Zero-shot ticket classifier.
///
/// Construction embeds every catalog entry; a failure there is fatal and the
/// classifier must be considered unavailable (callers disable
/// classification-dependent features rather than retry per request).
pub struct TicketClassifier {
    embedder: Arc<dyn TextEmbedder>,
    intents: IntentIndex,
    types: TypeIndex,
    extractor: EntityExtractor,
    settings: ClassifierSettings,
}

impl TicketClassifier {
    /// Build a classifier over the given catalogs.
    pub fn new(
        embedder: Arc<dyn TextEmbedder>,
        intent_catalog: &IntentCatalog,
        type_catalog: TypeCatalog,
        settings: ClassifierSettings,
    ) -> Result<Self, SahayakError> {
        let intents = IntentIndex::build(embedder.as_ref(), intent_catalog)?;
        let types = TypeIndex::build(embedder.as_ref(), type_catalog)?;
        let extractor = EntityExtractor::new()?;

        Ok(Self {
            embedder,
            intents,
            types,
            extractor,
            settings,
        })
    }

    /// Build a classifier over the production catalogs.
    pub fn with_builtin_catalogs(
        embedder: Arc<dyn TextEmbedder>,
        settings: ClassifierSettings,
    ) -> Result<Self, SahayakError> {
        Self::new(
            embedder,
            &IntentCatalog::builtin(),
            TypeCatalog::builtin(),
            settings,
        )
    }

    /// Classify one utterance into intents, entities, type, and routing.
    ///
    /// Deterministic for a given query and unchanged catalogs; no side
    /// effects, no external I/O.
    pub fn classify(&self, query: &str) -> Result<ClassificationResult, SahayakError> {
        let query_vec = l2_normalize(&self.embedder.embed(query)?);

        let intents = self.intents.detect(&query_vec, self.settings.intent_threshold);
        let entities = self.extractor.extract(query);
        let type_match = self
            .types
            .resolve(&query_vec, self.settings.type_confidence_floor);

        let primary_intent = intents
            .first()
            .map(|i| i.label.clone())
            .unwrap_or_else(|| UNKNOWN_INTENT.to_string());
        let tags: Vec<String> = intents.iter().map(|i| i.label.clone()).collect();
        let routing = route_for_intent(&primary_intent);

        debug!(
            category = type_match.ticket_type.category.as_str(),
            ticket_type = type_match.ticket_type.key.as_str(),
            department = type_match.ticket_type.department.as_str(),
            primary_intent = primary_intent.as_str(),
            "classified utterance"
        );

        Ok(ClassificationResult {
            intents,
            entities,
            category: type_match.ticket_type.category,
            type_key: type_match.ticket_type.key.clone(),
            type_name: type_match.ticket_type.name.clone(),
            department: type_match.ticket_type.department.clone(),
            confidence: type_match.confidence,
            tags,
            routing,
            primary_intent,
            original_query: query.to_string(),
        })
    }
}
