// SPDX-FileCopyrightText: 2026 Sahayak Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation persistence.
//!
//! One row per user turn, immutable after insert. The classification
//! metadata (intents, entities) is stored as JSON text columns, which is
//! the durable shape reporting tooling reads.

use rusqlite::params;

use sahayak_core::types::{Category, ClassificationResult, Conversation, RoutingDestination};
use sahayak_core::SahayakError;

use crate::database::{Database, map_tr_err};

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, SahayakError> {
    serde_json::to_string(value)
        .map_err(|e| SahayakError::Internal(format!("failed to serialize column value: {e}")))
}

/// Insert one conversation row and return its assigned id.
///
/// A single INSERT, hence a single transaction; storage failures (including
/// constraint violations) surface verbatim.
pub async fn save_conversation(
    db: &Database,
    user_id: i64,
    phone: &str,
    query: &str,
    response: &str,
    classification: &ClassificationResult,
) -> Result<i64, SahayakError> {
    let phone = phone.to_string();
    let query = query.to_string();
    let response = response.to_string();
    let primary_intent = classification.primary_intent.clone();
    let intent_tags = to_json(&classification.intents)?;
    let entities = to_json(&classification.entities)?;
    let category = classification.category.as_str();
    let routing = classification.routing.as_str();

    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO conversations
                 (user_id, phone, query_text, response_text, primary_intent,
                  intent_tags, entities, category, routing)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    user_id,
                    phone,
                    query,
                    response,
                    primary_intent,
                    intent_tags,
                    entities,
                    category,
                    routing,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(map_tr_err)
}

/// Get a conversation by id.
pub async fn get_conversation(
    db: &Database,
    id: i64,
) -> Result<Option<Conversation>, SahayakError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT conversation_id, user_id, phone, query_text, response_text,
                        primary_intent, intent_tags, entities, category, routing, created_at
                 FROM conversations WHERE conversation_id = ?1",
            )?;
            let result = stmt.query_row(params![id], |row| {
                let intent_tags: String = row.get(6)?;
                let entities: String = row.get(7)?;
                let category: String = row.get(8)?;
                let routing: String = row.get(9)?;
                Ok(Conversation {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    phone: row.get(2)?,
                    query_text: row.get(3)?,
                    response_text: row.get(4)?,
                    primary_intent: row.get(5)?,
                    intent_tags: serde_json::from_str(&intent_tags).unwrap_or_default(),
                    entities: serde_json::from_str(&entities).unwrap_or_default(),
                    category: Category::from_str_value(&category),
                    routing: RoutingDestination::from_str_value(&routing),
                    created_at: row.get(10)?,
                })
            });
            match result {
                Ok(conversation) => Ok(Some(conversation)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(map_tr_err)
}
