// SPDX-FileCopyrightText: 2026 Sahayak Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ticket record creation, filtered reads, and aggregates.
//!
//! Every classified interaction becomes exactly one record: a resolved
//! query or an open grievance, chosen by the classification's category at
//! creation time and never re-derived later. Reads take optional
//! conjunctive filters and come back newest-first.

use rusqlite::params;

use sahayak_core::SahayakError;
use sahayak_core::types::{
    Category, ClassificationResult, Grievance, GrievanceStatus, QueryRecord, QueryStatus,
    RecordId,
};

use crate::database::{Database, map_tr_err};
use crate::models::{GrievanceStats, QueryStats, RecordFilter};

/// Create the query or grievance record for a classified interaction.
///
/// Branches on `classification.category`: queries are inserted with status
/// `resolved`, grievances with status `open`. Exactly one row is written,
/// in its own transaction, and a record is always produced regardless of
/// which intents were detected.
pub async fn create_record(
    db: &Database,
    conversation_id: i64,
    user_id: i64,
    phone: &str,
    classification: &ClassificationResult,
) -> Result<RecordId, SahayakError> {
    let phone = phone.to_string();
    let type_name = classification.type_name.clone();
    let department = classification.department.clone();
    let description = classification.original_query.clone();
    let entities = serde_json::to_string(&classification.entities)
        .map_err(|e| SahayakError::Internal(format!("failed to serialize entities: {e}")))?;
    let category = classification.category;

    db.connection()
        .call(move |conn| {
            let (sql, status) = match category {
                Category::Query => (
                    "INSERT INTO queries
                     (conversation_id, user_id, phone, type, department, description,
                      extracted_entities, status)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                    QueryStatus::Resolved.as_str(),
                ),
                Category::Grievance => (
                    "INSERT INTO grievances
                     (conversation_id, user_id, phone, type, department, description,
                      extracted_entities, status)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                    GrievanceStatus::Open.as_str(),
                ),
            };
            conn.execute(
                sql,
                params![
                    conversation_id,
                    user_id,
                    phone,
                    type_name,
                    department,
                    description,
                    entities,
                    status,
                ],
            )?;
            let id = conn.last_insert_rowid();
            Ok(match category {
                Category::Query => RecordId::Query(id),
                Category::Grievance => RecordId::Grievance(id),
            })
        })
        .await
        .map_err(map_tr_err)
}

/// Append optional filter clauses and their parameter values.
fn push_filters(
    sql: &mut String,
    args: &mut Vec<String>,
    filter: &RecordFilter,
    status: Option<&str>,
) {
    if let Some(department) = &filter.department {
        sql.push_str(" AND department = ?");
        args.push(department.clone());
    }
    if let Some(start) = &filter.start_date {
        sql.push_str(" AND created_at >= ?");
        args.push(start.clone());
    }
    if let Some(end) = &filter.end_date {
        sql.push_str(" AND created_at <= ?");
        args.push(end.clone());
    }
    if let Some(status) = status {
        sql.push_str(" AND status = ?");
        args.push(status.to_string());
    }
}

/// Fetch query records matching all given filters, newest first.
pub async fn get_queries(
    db: &Database,
    filter: &RecordFilter,
    status: Option<QueryStatus>,
) -> Result<Vec<QueryRecord>, SahayakError> {
    let mut sql = String::from(
        "SELECT query_id, conversation_id, user_id, phone, type, department,
                description, extracted_entities, status, created_at
         FROM queries WHERE 1=1",
    );
    let mut args = Vec::new();
    push_filters(&mut sql, &mut args, filter, status.map(|s| s.as_str()));
    sql.push_str(" ORDER BY created_at DESC, query_id DESC");

    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&sql)?;
            let records = stmt
                .query_map(rusqlite::params_from_iter(args.iter()), |row| {
                    let entities: String = row.get(7)?;
                    let status: String = row.get(8)?;
                    Ok(QueryRecord {
                        id: row.get(0)?,
                        conversation_id: row.get(1)?,
                        user_id: row.get(2)?,
                        phone: row.get(3)?,
                        type_name: row.get(4)?,
                        department: row.get(5)?,
                        description: row.get(6)?,
                        entities: serde_json::from_str(&entities).unwrap_or_default(),
                        status: QueryStatus::from_str_value(&status),
                        created_at: row.get(9)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(records)
        })
        .await
        .map_err(map_tr_err)
}

/// Fetch grievances matching all given filters, newest first.
pub async fn get_grievances(
    db: &Database,
    filter: &RecordFilter,
    status: Option<GrievanceStatus>,
) -> Result<Vec<Grievance>, SahayakError> {
    let mut sql = String::from(
        "SELECT grievance_id, conversation_id, user_id, phone, type, department,
                description, extracted_entities, status, created_at, resolved_at
         FROM grievances WHERE 1=1",
    );
    let mut args = Vec::new();
    push_filters(&mut sql, &mut args, filter, status.map(|s| s.as_str()));
    sql.push_str(" ORDER BY created_at DESC, grievance_id DESC");

    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&sql)?;
            let records = stmt
                .query_map(rusqlite::params_from_iter(args.iter()), |row| {
                    let entities: String = row.get(7)?;
                    let status: String = row.get(8)?;
                    Ok(Grievance {
                        id: row.get(0)?,
                        conversation_id: row.get(1)?,
                        user_id: row.get(2)?,
                        phone: row.get(3)?,
                        type_name: row.get(4)?,
                        department: row.get(5)?,
                        description: row.get(6)?,
                        entities: serde_json::from_str(&entities).unwrap_or_default(),
                        status: GrievanceStatus::from_str_value(&status),
                        created_at: row.get(9)?,
                        resolved_at: row.get(10)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(records)
        })
        .await
        .map_err(map_tr_err)
}

/// Aggregate query counts by status, scoped by the same optional filters.
pub async fn get_query_stats(
    db: &Database,
    filter: &RecordFilter,
) -> Result<QueryStats, SahayakError> {
    let mut sql = String::from(
        "SELECT COUNT(*),
                SUM(CASE WHEN status = 'pending' THEN 1 ELSE 0 END),
                SUM(CASE WHEN status = 'resolved' THEN 1 ELSE 0 END)
         FROM queries WHERE 1=1",
    );
    let mut args = Vec::new();
    push_filters(&mut sql, &mut args, filter, None);

    db.connection()
        .call(move |conn| {
            let stats = conn.query_row(&sql, rusqlite::params_from_iter(args.iter()), |row| {
                Ok(QueryStats {
                    total: row.get(0)?,
                    pending: row.get::<_, Option<i64>>(1)?.unwrap_or(0),
                    resolved: row.get::<_, Option<i64>>(2)?.unwrap_or(0),
                })
            })?;
            Ok(stats)
        })
        .await
        .map_err(map_tr_err)
}

/// Aggregate grievance counts by status, scoped by the same optional filters.
pub async fn get_grievance_stats(
    db: &Database,
    filter: &RecordFilter,
) -> Result<GrievanceStats, SahayakError> {
    let mut sql = String::from(
        "SELECT COUNT(*),
                SUM(CASE WHEN status = 'open' THEN 1 ELSE 0 END),
                SUM(CASE WHEN status = 'in_progress' THEN 1 ELSE 0 END),
                SUM(CASE WHEN status = 'resolved' THEN 1 ELSE 0 END),
                SUM(CASE WHEN status = 'closed' THEN 1 ELSE 0 END)
         FROM grievances WHERE 1=1",
    );
    let mut args = Vec::new();
    push_filters(&mut sql, &mut args, filter, None);

    db.connection()
        .call(move |conn| {
            let stats = conn.query_row(&sql, rusqlite::params_from_iter(args.iter()), |row| {
                Ok(GrievanceStats {
                    total: row.get(0)?,
                    open: row.get::<_, Option<i64>>(1)?.unwrap_or(0),
                    in_progress: row.get::<_, Option<i64>>(2)?.unwrap_or(0),
                    resolved: row.get::<_, Option<i64>>(3)?.unwrap_or(0),
                    closed: row.get::<_, Option<i64>>(4)?.unwrap_or(0),
                })
            })?;
            Ok(stats)
        })
        .await
        .map_err(map_tr_err)
}

/// Grievance counts grouped by department, highest first.
pub async fn get_grievance_department_counts(
    db: &Database,
    filter: &RecordFilter,
) -> Result<Vec<(String, i64)>, SahayakError> {
    let mut sql = String::from(
        "SELECT department, COUNT(*) AS count FROM grievances WHERE 1=1",
    );
    let mut args = Vec::new();
    push_filters(&mut sql, &mut args, filter, None);
    sql.push_str(" GROUP BY department ORDER BY count DESC, department ASC");

    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&sql)?;
            let counts = stmt
                .query_map(rusqlite::params_from_iter(args.iter()), |row| {
                    Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(counts)
        })
        .await
        .map_err(map_tr_err)
}

/// Update a grievance's lifecycle status (operator action).
///
/// `resolved_at` is stamped when the grievance reaches a terminal status
/// and cleared when it is reopened.
pub async fn update_grievance_status(
    db: &Database,
    id: i64,
    status: GrievanceStatus,
) -> Result<(), SahayakError> {
    let terminal = matches!(
        status,
        GrievanceStatus::Resolved | GrievanceStatus::Closed
    );
    let status = status.as_str();

    db.connection()
        .call(move |conn| {
            let changed = if terminal {
                conn.execute(
                    "UPDATE grievances
                     SET status = ?1,
                         resolved_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                     WHERE grievance_id = ?2",
                    params![status, id],
                )?
            } else {
                conn.execute(
                    "UPDATE grievances SET status = ?1, resolved_at = NULL
                     WHERE grievance_id = ?2",
                    params![status, id],
                )?
            };
            if changed == 0 {
                return Err(rusqlite::Error::QueryReturnedNoRows);
            }
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}
