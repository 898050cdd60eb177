// SPDX-FileCopyrightText: 2026 Sahayak Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite ticket lifecycle store for the Sahayak triage engine.
//!
//! Provides WAL-mode SQLite storage with embedded migrations, a
//! single-writer concurrency model via `tokio-rusqlite`, and typed
//! operations for conversations and the two record lifecycles
//! (resolved-at-creation queries, open-until-operator-action grievances).
//!
//! Saving a conversation and creating its record are two independent
//! single-statement transactions; a failure between them leaves an
//! orphaned conversation with no record, which callers accept.

pub mod database;
pub mod migrations;
pub mod models;
pub mod queries;

#[cfg(test)]
pub(crate) mod testing;

pub use database::Database;
pub use models::*;
pub use queries::conversations::{get_conversation, save_conversation};
pub use queries::records::{
    create_record, get_grievance_department_counts, get_grievance_stats, get_grievances,
    get_queries, get_query_stats, update_grievance_status,
};
