// SPDX-FileCopyrightText: 2026 Sahayak Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain model types for storage entities plus read-side filter and
//! aggregate shapes.
//!
//! The canonical row types live in `sahayak-core::types` so the classifier
//! and reporting surfaces share them; this module re-exports them for
//! convenience within the storage crate.

pub use sahayak_core::types::{
    Conversation, Grievance, GrievanceStatus, QueryRecord, QueryStatus, RecordId,
};

use serde::Serialize;

/// Optional, conjunctive filters for record reads and aggregates.
///
/// Dates are inclusive ISO 8601 strings; lexicographic comparison on the
/// stored `created_at` text is chronological for that format.
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    pub department: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl RecordFilter {
    /// Filter by department only.
    pub fn department(department: impl Into<String>) -> Self {
        Self {
            department: Some(department.into()),
            ..Self::default()
        }
    }
}

/// Aggregate counts over the `queries` table, grouped by status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryStats {
    pub total: i64,
    pub pending: i64,
    pub resolved: i64,
}

/// Aggregate counts over the `grievances` table, grouped by status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GrievanceStats {
    pub total: i64,
    pub open: i64,
    pub in_progress: i64,
    pub resolved: i64,
    pub closed: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn department_filter_shorthand() {
        let filter = RecordFilter::department("Network Operations");
        assert_eq!(filter.department.as_deref(), Some("Network Operations"));
        assert!(filter.start_date.is_none());
        assert!(filter.end_date.is_none());
    }

    #[test]
    fn stats_default_to_zero() {
        assert_eq!(GrievanceStats::default().open, 0);
        assert_eq!(QueryStats::default().total, 0);
    }
}
