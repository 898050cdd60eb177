// SPDX-FileCopyrightText: 2026 Sahayak Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Intent catalog and zero-shot multi-label intent detection.
//!
//! Each intent carries a natural-language description; descriptions are
//! embedded and normalized once at startup, and detection is a cosine
//! comparison of the query vector against that read-only index. An
//! utterance may surface zero, one, or many labels.

use sahayak_core::embedding::{TextEmbedder, cosine_similarity, l2_normalize};
use sahayak_core::error::SahayakError;
use sahayak_core::types::IntentScore;

/// Default minimum similarity for an intent to be surfaced.
pub const DEFAULT_INTENT_THRESHOLD: f32 = 0.25;

/// A coarse intent label with its zero-shot description.
#[derive(Debug, Clone)]
pub struct IntentLabel {
    pub key: String,
    pub description: String,
}

impl IntentLabel {
    pub fn new(key: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            description: description.into(),
        }
    }
}

/// The fixed set of intents known to the classifier.
///
/// Injected into the orchestrator rather than held as ambient global state,
/// so tests can run with smaller catalogs.
#[derive(Debug, Clone)]
pub struct IntentCatalog {
    labels: Vec<IntentLabel>,
}

impl IntentCatalog {
    pub fn new(labels: Vec<IntentLabel>) -> Self {
        Self { labels }
    }

    /// The production intent set for the telecom support domain.
    pub fn builtin() -> Self {
        Self::new(vec![
            IntentLabel::new(
                "BALANCE_QUERY",
                "User wants to check data balance, remaining quota, or how much data is left",
            ),
            IntentLabel::new(
                "NETWORK_ISSUE",
                "User experiencing slow internet, connection problems, network down, poor signal",
            ),
            IntentLabel::new(
                "RECHARGE_REQUEST",
                "User wants to recharge, top-up, buy a plan, or inquire about recharge options",
            ),
            IntentLabel::new(
                "BILLING_COMPLAINT",
                "User has billing issues, wrong charges, unexpected deductions, refund requests",
            ),
            IntentLabel::new(
                "SUPPORT_REQUEST",
                "User needs help, wants to talk to customer care, has a general complaint",
            ),
            IntentLabel::new(
                "OFFER_INQUIRY",
                "User asking about discounts, cashback, promotional offers, deals",
            ),
            IntentLabel::new(
                "PLAN_CHANGE",
                "User wants to upgrade, downgrade, switch plans, or modify their subscription",
            ),
            IntentLabel::new(
                "TECHNICAL_SUPPORT",
                "User has technical issues like SIM problems, app not working, configuration issues",
            ),
        ])
    }

    pub fn labels(&self) -> &[IntentLabel] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Precomputed, normalized intent embeddings.
///
/// Read-only after construction and safe to share across concurrent
/// classification calls.
pub struct IntentIndex {
    entries: Vec<(String, Vec<f32>)>,
}

impl IntentIndex {
    /// Embed and normalize every catalog description once.
    pub fn build(
        embedder: &dyn TextEmbedder,
        catalog: &IntentCatalog,
    ) -> Result<Self, SahayakError> {
        let mut entries = Vec::with_capacity(catalog.len());
        for label in catalog.labels() {
            let embedding = l2_normalize(&embedder.embed(&label.description)?);
            entries.push((label.key.clone(), embedding));
        }
        Ok(Self { entries })
    }

    /// Detect every intent whose similarity against the (normalized) query
    /// vector clears `threshold`, sorted by confidence descending.
    ///
    /// Confidence is the similarity rounded to 2 decimals. The sort is
    /// stable, so ties keep catalog declaration order.
    pub fn detect(&self, query_vec: &[f32], threshold: f32) -> Vec<IntentScore> {
        let mut results: Vec<IntentScore> = self
            .entries
            .iter()
            .filter_map(|(key, embedding)| {
                let similarity = cosine_similarity(query_vec, embedding);
                if similarity >= threshold {
                    Some(IntentScore {
                        label: key.clone(),
                        confidence: round2(similarity),
                    })
                } else {
                    None
                }
            })
            .collect();

        results.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        results
    }
}

/// Round a similarity to 2 decimals for reporting.
fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::AxisEmbedder;

    fn test_catalog() -> IntentCatalog {
        IntentCatalog::new(vec![
            IntentLabel::new("NETWORK_ISSUE", "network slow"),
            IntentLabel::new("RECHARGE_REQUEST", "recharge"),
            IntentLabel::new("BALANCE_QUERY", "balance"),
        ])
    }

    #[test]
    fn detect_surfaces_only_above_threshold() {
        let embedder = AxisEmbedder::telecom();
        let index = IntentIndex::build(&embedder, &test_catalog()).unwrap();

        let query = l2_normalize(&embedder.embed("network slow recharge").unwrap());
        let detected = index.detect(&query, DEFAULT_INTENT_THRESHOLD);

        let labels: Vec<&str> = detected.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, vec!["NETWORK_ISSUE", "RECHARGE_REQUEST"]);
        assert!(detected[0].confidence > detected[1].confidence);
        assert!(detected.iter().all(|i| i.confidence >= 0.25));
    }

    #[test]
    fn detect_returns_empty_when_nothing_matches() {
        let embedder = AxisEmbedder::telecom();
        let index = IntentIndex::build(&embedder, &test_catalog()).unwrap();

        let query = l2_normalize(&embedder.embed("unrelated gibberish").unwrap());
        assert!(index.detect(&query, DEFAULT_INTENT_THRESHOLD).is_empty());
    }

    #[test]
    fn detect_is_deterministic() {
        let embedder = AxisEmbedder::telecom();
        let index = IntentIndex::build(&embedder, &test_catalog()).unwrap();

        let query = l2_normalize(&embedder.embed("network slow").unwrap());
        let first = index.detect(&query, DEFAULT_INTENT_THRESHOLD);
        let second = index.detect(&query, DEFAULT_INTENT_THRESHOLD);
        assert_eq!(first, second);
    }

    #[test]
    fn ties_keep_catalog_order() {
        let embedder = AxisEmbedder::telecom();
        // Two intents with identical descriptions score identically.
        let catalog = IntentCatalog::new(vec![
            IntentLabel::new("FIRST", "network"),
            IntentLabel::new("SECOND", "network"),
        ]);
        let index = IntentIndex::build(&embedder, &catalog).unwrap();

        let query = l2_normalize(&embedder.embed("network").unwrap());
        let detected = index.detect(&query, 0.0);
        assert_eq!(detected[0].label, "FIRST");
        assert_eq!(detected[1].label, "SECOND");
    }

    #[test]
    fn confidence_is_rounded_to_two_decimals() {
        let embedder = AxisEmbedder::telecom();
        let index = IntentIndex::build(&embedder, &test_catalog()).unwrap();

        let query = l2_normalize(&embedder.embed("network slow recharge").unwrap());
        for intent in index.detect(&query, 0.0) {
            let scaled = intent.confidence * 100.0;
            assert!(
                (scaled - scaled.round()).abs() < 1e-4,
                "confidence {} should have at most 2 decimals",
                intent.confidence
            );
        }
    }

    #[test]
    fn builtin_catalog_has_eight_intents() {
        assert_eq!(IntentCatalog::builtin().len(), 8);
    }
}
