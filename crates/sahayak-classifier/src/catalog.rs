// SPDX-FileCopyrightText: 2026 Sahayak Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ticket type taxonomy and best-type resolution.
//!
//! The catalog splits into informational query types (auto-resolved at
//! creation) and grievance types (opened for follow-up). Each entry's
//! embedding is computed once from a synthesized description string; type
//! resolution is an unconditional arg-max over the catalog unless a
//! confidence floor is configured.

use sahayak_core::embedding::{TextEmbedder, cosine_similarity, l2_normalize};
use sahayak_core::error::SahayakError;
use sahayak_core::types::{Category, Severity};

/// Key of the fallback type used when a confidence floor is configured and
/// no catalog entry clears it.
pub const UNCLASSIFIED_TYPE_KEY: &str = "UNCLASSIFIED";

/// One entry of the ticket type taxonomy.
#[derive(Debug, Clone)]
pub struct TicketType {
    pub key: String,
    /// Human-readable name persisted on records, e.g. "Balance Check".
    pub name: String,
    pub description: String,
    /// Illustrative utterances; the first three feed the embedding text.
    pub examples: Vec<String>,
    pub department: String,
    pub category: Category,
    /// Triage severity; grievance types only.
    pub severity: Option<Severity>,
}

impl TicketType {
    /// The text this type is embedded from: name, description, and up to
    /// three examples.
    pub fn embedding_text(&self) -> String {
        let mut text = format!("{}. {}", self.name, self.description);
        for example in self.examples.iter().take(3) {
            text.push_str(". ");
            text.push_str(example);
        }
        text
    }
}

fn query_type(
    key: &str,
    name: &str,
    department: &str,
    description: &str,
    examples: &[&str],
) -> TicketType {
    TicketType {
        key: key.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        examples: examples.iter().map(|e| e.to_string()).collect(),
        department: department.to_string(),
        category: Category::Query,
        severity: None,
    }
}

fn grievance_type(
    key: &str,
    name: &str,
    department: &str,
    severity: Severity,
    description: &str,
    examples: &[&str],
) -> TicketType {
    TicketType {
        key: key.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        examples: examples.iter().map(|e| e.to_string()).collect(),
        department: department.to_string(),
        category: Category::Grievance,
        severity: Some(severity),
    }
}

/// The fixed ticket type taxonomy.
///
/// Injected into the orchestrator; tests run with smaller catalogs.
#[derive(Debug, Clone)]
pub struct TypeCatalog {
    types: Vec<TicketType>,
}

impl TypeCatalog {
    pub fn new(types: Vec<TicketType>) -> Self {
        Self { types }
    }

    pub fn types(&self) -> &[TicketType] {
        &self.types
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&TicketType> {
        self.types.iter().find(|t| t.key == key)
    }

    /// The fallback type for floor-gated resolution.
    pub fn unclassified() -> TicketType {
        query_type(
            UNCLASSIFIED_TYPE_KEY,
            "Unclassified",
            "Customer Support",
            "Utterance did not match any known type with sufficient confidence; needs human review",
            &[],
        )
    }

    /// The production taxonomy for the telecom support domain: 8 query
    /// types and 12 grievance types.
    pub fn builtin() -> Self {
        Self::new(vec![
            // -- Query types: informational/transactional, auto-resolved --
            query_type(
                "BALANCE_CHECK",
                "Balance Check",
                "Customer Support",
                "User wants to check remaining data, SMS, call balance",
                &[
                    "Kitna data bacha hai?",
                    "How much data is left?",
                    "Mera balance batao",
                    "Remaining quota kitna hai",
                    "SMS balance kitna hai",
                ],
            ),
            query_type(
                "PLAN_INQUIRY",
                "Plan Information",
                "Customer Support",
                "User asking about current plan, plan details, validity",
                &[
                    "Mera current plan kya hai?",
                    "What is my active plan?",
                    "Plan details batao",
                    "Current subscription details",
                    "Mera plan konsa hai",
                ],
            ),
            query_type(
                "RECHARGE_INQUIRY",
                "Recharge Plans",
                "Sales",
                "User asking about recharge options, plan prices",
                &[
                    "500 rupees mein best plan",
                    "Recharge plans batao",
                    "300 ka plan hai kya",
                    "Cheapest plan under 200",
                    "New plan lena hai",
                ],
            ),
            query_type(
                "OFFER_INQUIRY",
                "Offers & Promotions",
                "Sales",
                "User asking about discounts, cashback, deals",
                &[
                    "Koi offer chal raha hai?",
                    "Discount available hai kya",
                    "Cashback milega kya",
                    "Promotional offers",
                    "Festive offer check",
                ],
            ),
            query_type(
                "VALIDITY_INQUIRY",
                "Validity Check",
                "Customer Support",
                "User wants to know plan expiry, validity remaining",
                &[
                    "Plan kab expire hoga?",
                    "Validity kitni baki hai",
                    "Expiry date kya hai",
                    "Kitne din aur valid hai",
                    "Recharge kab karna padega",
                ],
            ),
            query_type(
                "USAGE_INQUIRY",
                "Usage History",
                "Customer Support",
                "User asking about data usage, call history",
                &[
                    "Kitna data use ho gaya",
                    "Usage history batao",
                    "Call details chahiye",
                    "Daily usage kitna hai",
                    "Internet usage report",
                ],
            ),
            query_type(
                "CUSTOMER_CARE_INQUIRY",
                "Contact Information",
                "Customer Support",
                "User asking for helpline numbers, support channels",
                &[
                    "Customer care number kya hai",
                    "Helpline number batao",
                    "Support kaise contact kare",
                    "Toll free number",
                    "Technical support contact",
                ],
            ),
            query_type(
                "SERVICE_ACTIVATION",
                "Service Activation",
                "Technical Support",
                "User wants to activate services (roaming, DND, VAS)",
                &[
                    "Roaming activate kaise kare",
                    "DND service chahiye",
                    "International roaming",
                    "Data pack subscribe",
                    "Call forwarding setup",
                ],
            ),
            // -- Grievance types: problems requiring resolution --
            grievance_type(
                "NETWORK_CONNECTIVITY",
                "Network Connectivity Issue",
                "Network Operations",
                Severity::High,
                "No network, connection drops, signal problems",
                &[
                    "Network nahi aa raha",
                    "No signal",
                    "Network not working",
                    "Signal strength bahut weak",
                    "4G network nahi mil raha",
                    "Network coverage problem",
                ],
            ),
            grievance_type(
                "SLOW_INTERNET",
                "Slow Internet Speed",
                "Network Operations",
                Severity::Medium,
                "Internet speed issues, buffering, slow browsing",
                &[
                    "Internet bahut slow hai",
                    "Speed kam hai",
                    "Buffering ho raha hai",
                    "Download nahi ho raha",
                    "Slow browsing",
                    "Internet lag kar raha hai",
                ],
            ),
            grievance_type(
                "BILLING_DISPUTE",
                "Billing Complaint",
                "Billing Department",
                Severity::High,
                "Wrong charges, unexpected deductions, billing errors",
                &[
                    "Bill mein galat charge hai",
                    "Extra amount deduct hua",
                    "Overcharged ho gaya",
                    "Bill amount zyada hai",
                    "Refund chahiye",
                ],
            ),
            grievance_type(
                "RECHARGE_FAILURE",
                "Recharge Failed",
                "Technical Support",
                Severity::High,
                "Recharge not reflecting, payment deducted but no credit",
                &[
                    "Recharge nahi hua",
                    "Payment cut gaya par plan nahi mila",
                    "Recharge failed",
                    "Transaction failed",
                    "Recharge not reflecting",
                ],
            ),
            grievance_type(
                "CALL_DROPS",
                "Call Dropping",
                "Network Operations",
                Severity::Medium,
                "Calls getting disconnected frequently",
                &[
                    "Call bar bar disconnect ho jati hai",
                    "Call drop problem",
                    "Call automatically cut ho jata hai",
                    "Frequent call drops",
                    "Outgoing call fail",
                ],
            ),
            grievance_type(
                "DATA_NOT_WORKING",
                "Mobile Data Not Working",
                "Technical Support",
                Severity::High,
                "Mobile data not functioning despite active plan",
                &[
                    "Data nahi chal raha",
                    "Mobile data not working",
                    "Internet on nahi ho raha",
                    "4G not working",
                    "Data plan active hai par internet nahi",
                ],
            ),
            grievance_type(
                "SIM_ISSUE",
                "SIM Card Problem",
                "Technical Support",
                Severity::High,
                "SIM not detected, invalid SIM, SIM errors",
                &[
                    "SIM detect nahi ho raha",
                    "Invalid SIM error",
                    "No SIM card detected",
                    "SIM registration failed",
                    "Emergency calls only",
                ],
            ),
            grievance_type(
                "PORT_REQUEST_ISSUE",
                "Porting Problem",
                "Customer Support",
                Severity::Medium,
                "Number portability issues, port request pending/failed",
                &[
                    "Port request pending hai",
                    "Number port nahi ho raha",
                    "MNP failed",
                    "Porting delay",
                    "UPC code problem",
                ],
            ),
            grievance_type(
                "SERVICE_DEACTIVATION",
                "Unwanted Service Deactivation",
                "Technical Support",
                Severity::Medium,
                "Services stopped without request, auto-deactivation",
                &[
                    "Service apne aap band ho gaya",
                    "Auto deactivation hua",
                    "Services stopped suddenly",
                    "Data pack deactivated",
                    "Plan cancelled without permission",
                ],
            ),
            grievance_type(
                "POOR_CALL_QUALITY",
                "Voice Quality Issue",
                "Network Operations",
                Severity::Medium,
                "Echo, distortion, voice breaking in calls",
                &[
                    "Call mein echo aa raha hai",
                    "Voice quality poor",
                    "Voice break ho rahi hai",
                    "Audio breaking",
                    "Call mein noise",
                ],
            ),
            grievance_type(
                "APP_NOT_WORKING",
                "Mobile App Issue",
                "Technical Support",
                Severity::Low,
                "Company app crashing, login issues, app errors",
                &[
                    "App crash ho raha hai",
                    "Login nahi ho raha app mein",
                    "App not opening",
                    "App hang kar raha hai",
                    "App loading issue",
                ],
            ),
            grievance_type(
                "UNWANTED_CHARGES",
                "Unauthorized Charges",
                "Billing Department",
                Severity::High,
                "Unknown charges, VAS charges without consent",
                &[
                    "Unknown service ka charge",
                    "VAS charge kyu hua",
                    "Unauthorized deduction",
                    "Subscription nahi kiya tha",
                    "Premium service charge",
                ],
            ),
        ])
    }
}

/// The winning type for one utterance.
#[derive(Debug, Clone)]
pub struct TypeMatch<'a> {
    pub ticket_type: &'a TicketType,
    /// Cosine similarity of the winning entry, rounded to 2 decimals.
    pub confidence: f32,
}

/// Precomputed, normalized type embeddings plus the fallback entry.
///
/// Read-only after construction and safe to share across concurrent
/// classification calls.
pub struct TypeIndex {
    catalog: TypeCatalog,
    embeddings: Vec<Vec<f32>>,
    fallback: TicketType,
}

impl TypeIndex {
    /// Embed and normalize every catalog entry's synthesized description.
    pub fn build(embedder: &dyn TextEmbedder, catalog: TypeCatalog) -> Result<Self, SahayakError> {
        if catalog.is_empty() {
            return Err(SahayakError::Internal(
                "type catalog must not be empty".to_string(),
            ));
        }

        let mut embeddings = Vec::with_capacity(catalog.len());
        for ticket_type in catalog.types() {
            let embedding = l2_normalize(&embedder.embed(&ticket_type.embedding_text())?);
            embeddings.push(embedding);
        }

        Ok(Self {
            catalog,
            embeddings,
            fallback: TypeCatalog::unclassified(),
        })
    }

    pub fn catalog(&self) -> &TypeCatalog {
        &self.catalog
    }

    /// Resolve the single best type for a (normalized) query vector.
    ///
    /// Without a floor this is an unconditional arg-max: every query is
    /// assigned to some type even when the best similarity is low. With
    /// `floor = Some(f)`, a best score below `f` resolves to the generic
    /// unclassified type instead. Ties keep the first catalog entry.
    pub fn resolve(&self, query_vec: &[f32], floor: Option<f32>) -> TypeMatch<'_> {
        let mut best_idx = 0;
        let mut best_sim = f32::NEG_INFINITY;

        for (idx, embedding) in self.embeddings.iter().enumerate() {
            let similarity = cosine_similarity(query_vec, embedding);
            if similarity > best_sim {
                best_sim = similarity;
                best_idx = idx;
            }
        }

        if let Some(floor) = floor
            && best_sim < floor
        {
            return TypeMatch {
                ticket_type: &self.fallback,
                confidence: round2(best_sim),
            };
        }

        TypeMatch {
            ticket_type: &self.catalog.types()[best_idx],
            confidence: round2(best_sim),
        }
    }
}

fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}
