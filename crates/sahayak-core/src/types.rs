// SPDX-FileCopyrightText: 2026 Sahayak Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the Sahayak workspace.
//!
//! The classification result shape and the `queries`/`grievances` row types
//! are a durable schema contract consumed by reporting and summary tooling;
//! field names and wire strings here must stay stable.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Primary intent label used when no intent clears the detection threshold.
pub const UNKNOWN_INTENT: &str = "UNKNOWN";

/// Super-category of a ticket type: informational vs. actionable.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    /// Informational or transactional request, auto-resolved at creation.
    Query,
    /// A problem requiring resolution action, opened for follow-up.
    Grievance,
}

impl Category {
    /// Wire string stored in the `conversations.category` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Query => "QUERY",
            Category::Grievance => "GRIEVANCE",
        }
    }

    /// Parse from a SQLite string, defaulting to `Query` for unknown values.
    pub fn from_str_value(s: &str) -> Self {
        match s {
            "GRIEVANCE" => Category::Grievance,
            _ => Category::Query,
        }
    }
}

/// Severity assigned to grievance ticket types for triage ordering.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    High,
    Medium,
    Low,
}

/// Logical destination that should next handle a classified interaction.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RoutingDestination {
    TechnicalSupport,
    BillingTeam,
    SalesTeam,
    AutomatedSystem,
    CustomerSupport,
    /// Fallback when the primary intent is UNKNOWN or unmapped.
    GeneralSupport,
}

impl RoutingDestination {
    /// Wire string stored in the `conversations.routing` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            RoutingDestination::TechnicalSupport => "technical_support",
            RoutingDestination::BillingTeam => "billing_team",
            RoutingDestination::SalesTeam => "sales_team",
            RoutingDestination::AutomatedSystem => "automated_system",
            RoutingDestination::CustomerSupport => "customer_support",
            RoutingDestination::GeneralSupport => "general_support",
        }
    }

    /// Parse from a SQLite string, defaulting to `GeneralSupport`.
    pub fn from_str_value(s: &str) -> Self {
        match s {
            "technical_support" => RoutingDestination::TechnicalSupport,
            "billing_team" => RoutingDestination::BillingTeam,
            "sales_team" => RoutingDestination::SalesTeam,
            "automated_system" => RoutingDestination::AutomatedSystem,
            "customer_support" => RoutingDestination::CustomerSupport,
            _ => RoutingDestination::GeneralSupport,
        }
    }
}

/// Kind of structured field the entity extractor can pull from raw text.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Amount,
    Service,
    Issue,
    PlanName,
    Timeframe,
}

/// Extracted entities keyed by kind; at most one value per kind.
///
/// Serializes as a flat JSON object (`{"amount":"500","service":"internet"}`),
/// which is the form persisted in the `entities` columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityBag(BTreeMap<EntityKind, String>);

impl EntityBag {
    /// Create an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a value for a kind. First match wins; later inserts for the
    /// same kind are ignored.
    pub fn insert_first(&mut self, kind: EntityKind, value: impl Into<String>) {
        self.0.entry(kind).or_insert_with(|| value.into());
    }

    /// Look up the value extracted for a kind, if any.
    pub fn get(&self, kind: EntityKind) -> Option<&str> {
        self.0.get(&kind).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over (kind, value) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (EntityKind, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

/// A detected intent with its similarity-derived confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentScore {
    /// Intent catalog key, e.g. `NETWORK_ISSUE`.
    pub label: String,
    /// Cosine similarity against the intent description, rounded to 2 decimals.
    pub confidence: f32,
}

/// The full classification of one utterance.
///
/// Produced fresh per query and never mutated afterwards; ownership passes
/// to the caller, which attaches it to a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Detected intents, sorted by confidence descending.
    pub intents: Vec<IntentScore>,
    /// Entities extracted from the raw query text.
    pub entities: EntityBag,
    /// Super-category of the resolved ticket type.
    pub category: Category,
    /// Resolved ticket type key, always a valid catalog key.
    #[serde(rename = "type")]
    pub type_key: String,
    /// Human-readable name of the resolved type.
    pub type_name: String,
    /// Department owning the resolved type.
    pub department: String,
    /// Similarity score of the winning type, in [0, 1] for well-formed input.
    pub confidence: f32,
    /// Intent labels in detection order (mirror of `intents`).
    pub tags: Vec<String>,
    /// Destination derived from the primary intent.
    pub routing: RoutingDestination,
    /// Highest-confidence intent label, or [`UNKNOWN_INTENT`].
    pub primary_intent: String,
    /// The raw utterance this classification was produced from.
    pub original_query: String,
}

/// Lifecycle status of a query record. Queries are informational and are
/// considered handled at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryStatus {
    Pending,
    Resolved,
}

impl QueryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryStatus::Pending => "pending",
            QueryStatus::Resolved => "resolved",
        }
    }

    pub fn from_str_value(s: &str) -> Self {
        match s {
            "pending" => QueryStatus::Pending,
            _ => QueryStatus::Resolved,
        }
    }
}

/// Lifecycle status of a grievance. Transitions after creation are driven
/// by operator action, not by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrievanceStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl GrievanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GrievanceStatus::Open => "open",
            GrievanceStatus::InProgress => "in_progress",
            GrievanceStatus::Resolved => "resolved",
            GrievanceStatus::Closed => "closed",
        }
    }

    pub fn from_str_value(s: &str) -> Self {
        match s {
            "in_progress" => GrievanceStatus::InProgress,
            "resolved" => GrievanceStatus::Resolved,
            "closed" => GrievanceStatus::Closed,
            _ => GrievanceStatus::Open,
        }
    }
}

/// One persisted user turn with its classification metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    /// Row id assigned on insert.
    pub id: i64,
    pub user_id: i64,
    pub phone: String,
    pub query_text: String,
    pub response_text: String,
    pub primary_intent: String,
    /// Detected intents as stored (JSON column round-trip).
    pub intent_tags: Vec<IntentScore>,
    pub entities: EntityBag,
    pub category: Category,
    pub routing: RoutingDestination,
    /// ISO 8601 creation timestamp.
    pub created_at: String,
}

/// An informational request record, resolved at creation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRecord {
    pub id: i64,
    pub conversation_id: Option<i64>,
    pub user_id: i64,
    pub phone: String,
    /// Human-readable type name, e.g. "Balance Check".
    pub type_name: String,
    pub department: String,
    pub description: String,
    pub entities: EntityBag,
    pub status: QueryStatus,
    pub created_at: String,
}

/// A problem record with an open/in-progress/resolved/closed lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grievance {
    pub id: i64,
    pub conversation_id: Option<i64>,
    pub user_id: i64,
    pub phone: String,
    pub type_name: String,
    pub department: String,
    pub description: String,
    pub entities: EntityBag,
    pub status: GrievanceStatus,
    pub created_at: String,
    /// Set when the grievance reaches a terminal status.
    pub resolved_at: Option<String>,
}

/// Identifier of the record created for a classified interaction.
///
/// Every conversation produces exactly one of these; the branch is fully
/// determined by [`ClassificationResult::category`] at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordId {
    Query(i64),
    Grievance(i64),
}

impl RecordId {
    /// The underlying row id regardless of which table it lives in.
    pub fn id(&self) -> i64 {
        match self {
            RecordId::Query(id) | RecordId::Grievance(id) => *id,
        }
    }
}
