// SPDX-FileCopyrightText: 2026 Sahayak Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deterministic pattern-based entity extraction.
//!
//! Pulls structured fields (amount, service, issue, plan name, timeframe)
//! out of the raw, un-normalized query text with case-insensitive patterns.
//! Extraction never fails on well-formed string input; a pattern that does
//! not match simply omits its key. Fully independent of intent and type
//! resolution.

use regex::{Regex, RegexBuilder};

use sahayak_core::error::SahayakError;
use sahayak_core::types::{EntityBag, EntityKind};

/// Currency amount patterns, tried in order; the first hit wins.
/// Covers `₹500`, `500 rupees`, `Rs 500` / `Rs. 500`, and `500 rs`.
const AMOUNT_PATTERNS: &[&str] = &[
    r"₹\s*(\d+)",
    r"(\d+)\s*rupees?",
    r"rs\.?\s*(\d+)",
    r"(\d+)\s*rs\b",
];

const SERVICE_PATTERN: &str = r"\b(data|internet|call|sms|roaming|network|hotspot|wifi)\b";

/// Problem keywords, including transliterated Hindi equivalents.
const ISSUE_PATTERN: &str =
    r"\b(slow|not working|stopped|failed|down|problem|issue|nahi chal raha|band)\b";

/// Carrier name optionally followed by a tier word.
const PLAN_PATTERN: &str = r"\b(jio|airtel|vi|vodafone|bsnl)\s*(basic|smart|premium|value|max|super)?\b";

/// Relative time expressions, including transliterated equivalents.
const TIMEFRAME_PATTERN: &str =
    r"\b(today|yesterday|last week|since morning|this month|aaj|kal)\b";

fn compile(pattern: &str) -> Result<Regex, SahayakError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| SahayakError::Internal(format!("invalid entity pattern `{pattern}`: {e}")))
}

/// Compiled entity patterns, built once and shared read-only afterwards.
pub struct EntityExtractor {
    amount: Vec<Regex>,
    service: Regex,
    issue: Regex,
    plan: Regex,
    timeframe: Regex,
}

impl EntityExtractor {
    pub fn new() -> Result<Self, SahayakError> {
        Ok(Self {
            amount: AMOUNT_PATTERNS
                .iter()
                .map(|p| compile(p))
                .collect::<Result<Vec<_>, _>>()?,
            service: compile(SERVICE_PATTERN)?,
            issue: compile(ISSUE_PATTERN)?,
            plan: compile(PLAN_PATTERN)?,
            timeframe: compile(TIMEFRAME_PATTERN)?,
        })
    }

    /// Extract all recognizable entities from the raw query text.
    ///
    /// At most one value per kind; the first match for a kind wins.
    pub fn extract(&self, query: &str) -> EntityBag {
        let mut entities = EntityBag::new();

        for pattern in &self.amount {
            if let Some(caps) = pattern.captures(query)
                && let Some(amount) = caps.get(1)
            {
                entities.insert_first(EntityKind::Amount, amount.as_str());
                break;
            }
        }

        if let Some(caps) = self.service.captures(query)
            && let Some(service) = caps.get(1)
        {
            entities.insert_first(EntityKind::Service, service.as_str().to_lowercase());
        }

        if let Some(caps) = self.issue.captures(query)
            && let Some(issue) = caps.get(1)
        {
            entities.insert_first(EntityKind::Issue, issue.as_str().to_lowercase());
        }

        // Plan names keep their matched casing (carrier + optional tier).
        if let Some(m) = self.plan.find(query) {
            entities.insert_first(EntityKind::PlanName, m.as_str().trim_end());
        }

        if let Some(caps) = self.timeframe.captures(query)
            && let Some(timeframe) = caps.get(1)
        {
            entities.insert_first(EntityKind::Timeframe, timeframe.as_str().to_lowercase());
        }

        entities
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> EntityExtractor {
        EntityExtractor::new().expect("patterns should compile")
    }

    #[test]
    fn extracts_rupee_symbol_amount() {
        let entities = extractor().extract("₹500 ka recharge");
        assert_eq!(entities.get(EntityKind::Amount), Some("500"));
    }

    #[test]
    fn extracts_amount_word_forms() {
        let e = extractor();
        assert_eq!(
            e.extract("recharge of 500 rupees").get(EntityKind::Amount),
            Some("500")
        );
        assert_eq!(e.extract("Rs 299 plan").get(EntityKind::Amount), Some("299"));
        assert_eq!(e.extract("Rs. 299 plan").get(EntityKind::Amount), Some("299"));
        assert_eq!(e.extract("paid 150 rs").get(EntityKind::Amount), Some("150"));
    }

    #[test]
    fn first_amount_pattern_wins() {
        // Both the symbol form and the word form appear; symbol pattern is
        // tried first and its capture is kept.
        let entities = extractor().extract("₹500 matlab 300 rupees nahi");
        assert_eq!(entities.get(EntityKind::Amount), Some("500"));
    }

    #[test]
    fn extracts_service_and_issue_hinglish() {
        let entities = extractor().extract("internet nahi chal raha");
        assert_eq!(entities.get(EntityKind::Service), Some("internet"));
        assert_eq!(entities.get(EntityKind::Issue), Some("nahi chal raha"));
    }

    #[test]
    fn extracts_issue_case_insensitively() {
        let entities = extractor().extract("My DATA is SLOW since MORNING");
        assert_eq!(entities.get(EntityKind::Service), Some("data"));
        assert_eq!(entities.get(EntityKind::Issue), Some("slow"));
        assert_eq!(entities.get(EntityKind::Timeframe), Some("since morning"));
    }

    #[test]
    fn extracts_plan_name_with_tier() {
        let entities = extractor().extract("I want to upgrade to Jio Premium");
        assert_eq!(entities.get(EntityKind::PlanName), Some("Jio Premium"));
    }

    #[test]
    fn extracts_bare_carrier_as_plan_name() {
        let entities = extractor().extract("switch to airtel please");
        assert_eq!(entities.get(EntityKind::PlanName), Some("airtel"));
    }

    #[test]
    fn extracts_transliterated_timeframe() {
        let entities = extractor().extract("kal se network band hai");
        assert_eq!(entities.get(EntityKind::Timeframe), Some("kal"));
        assert_eq!(entities.get(EntityKind::Issue), Some("band"));
        assert_eq!(entities.get(EntityKind::Service), Some("network"));
    }

    #[test]
    fn no_match_yields_empty_bag() {
        let entities = extractor().extract("hello, good morning");
        assert!(entities.is_empty());
    }

    #[test]
    fn mixed_query_extracts_multiple_kinds() {
        let entities =
            extractor().extract("Mera internet bahut slow hai aur 500 rupees ka recharge bhi nahi ho raha");
        assert_eq!(entities.get(EntityKind::Amount), Some("500"));
        assert_eq!(entities.get(EntityKind::Service), Some("internet"));
        assert_eq!(entities.get(EntityKind::Issue), Some("slow"));
    }
}
