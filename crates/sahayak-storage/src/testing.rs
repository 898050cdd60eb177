// SPDX-FileCopyrightText: 2026 Sahayak Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared fixtures for storage tests.

use tempfile::TempDir;

use sahayak_core::types::{
    Category, ClassificationResult, EntityBag, EntityKind, IntentScore, RoutingDestination,
};

use crate::database::Database;

/// Open a migrated database in a fresh temp directory.
pub async fn setup_db() -> (Database, TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let db_path = dir.path().join("test.db");
    let db = Database::open(db_path.to_str().expect("utf-8 path"))
        .await
        .expect("open test db");
    (db, dir)
}

/// A grievance-category classification as the classifier would emit it.
pub fn grievance_classification() -> ClassificationResult {
    let mut entities = EntityBag::new();
    entities.insert_first(EntityKind::Service, "internet");
    entities.insert_first(EntityKind::Issue, "slow");

    ClassificationResult {
        intents: vec![IntentScore {
            label: "NETWORK_ISSUE".to_string(),
            confidence: 0.82,
        }],
        entities,
        category: Category::Grievance,
        type_key: "SLOW_INTERNET".to_string(),
        type_name: "Slow Internet Speed".to_string(),
        department: "Network Operations".to_string(),
        confidence: 0.71,
        tags: vec!["NETWORK_ISSUE".to_string()],
        routing: RoutingDestination::TechnicalSupport,
        primary_intent: "NETWORK_ISSUE".to_string(),
        original_query: "internet bahut slow hai".to_string(),
    }
}

/// A query-category classification as the classifier would emit it.
pub fn query_classification() -> ClassificationResult {
    ClassificationResult {
        intents: vec![IntentScore {
            label: "BALANCE_QUERY".to_string(),
            confidence: 0.77,
        }],
        entities: EntityBag::new(),
        category: Category::Query,
        type_key: "BALANCE_CHECK".to_string(),
        type_name: "Balance Check".to_string(),
        department: "Customer Support".to_string(),
        confidence: 0.66,
        tags: vec!["BALANCE_QUERY".to_string()],
        routing: RoutingDestination::AutomatedSystem,
        primary_intent: "BALANCE_QUERY".to_string(),
        original_query: "kitna data bacha hai".to_string(),
    }
}
