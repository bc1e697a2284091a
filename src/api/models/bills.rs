//! API request/response models for bills, shares and period summaries.

use crate::db::models::bills::{BillDBResponse, ShareDBResponse};
use crate::errors::FieldError;
use crate::types::{BillId, MemberId, RoomId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// How a bill's total is divided across the room's members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SplitRule {
    /// Even split; leftover cents go to the earliest members
    Equal,
    /// Proportional to `meta.percents`, which must sum to 100
    Percent,
    /// Proportional to `meta.weights`
    Weight,
}

impl SplitRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            SplitRule::Equal => "equal",
            SplitRule::Percent => "percent",
            SplitRule::Weight => "weight",
        }
    }
}

/// Payload for creating a bill.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct BillCreate {
    /// Bill title, 1-120 characters
    pub title: String,
    /// Total amount in currency units; converted to cents internally
    pub amount: f64,
    /// Accounting period in `YYYY-MM` form
    pub period: String,
    /// Split rule; defaults to an even split
    #[serde(default)]
    pub rule: Option<SplitRule>,
    /// Rule parameters: `{"percents": {member_id: pct}}` or
    /// `{"weights": {member_id: weight}}`, keyed by member id
    #[serde(default)]
    pub meta: Option<serde_json::Value>,
}

pub(crate) fn is_period(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 7
        && bytes[..4].iter().all(u8::is_ascii_digit)
        && bytes[4] == b'-'
        && bytes[5..].iter().all(u8::is_ascii_digit)
}

impl BillCreate {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        let title_len = self.title.chars().count();
        if title_len < 1 || title_len > 120 {
            errors.push(FieldError::new("title", "must be between 1 and 120 characters"));
        }

        if !self.amount.is_finite() || self.amount <= 0.0 {
            errors.push(FieldError::new("amount", "must be a positive number"));
        }

        if !is_period(&self.period) {
            errors.push(FieldError::new("period", "must match YYYY-MM"));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// One member's slice of a bill.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ShareResponse {
    pub member_id: MemberId,
    pub member_name: String,
    pub amount_cents: i64,
}

impl From<ShareDBResponse> for ShareResponse {
    fn from(share: ShareDBResponse) -> Self {
        Self {
            member_id: share.member_id,
            member_name: share.member_name,
            amount_cents: share.amount_cents,
        }
    }
}

/// A bill with its shares as exposed over the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BillResponse {
    pub id: BillId,
    pub room_id: RoomId,
    pub title: String,
    pub amount_cents: i64,
    pub period: String,
    pub rule: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
    pub shares: Vec<ShareResponse>,
}

impl BillResponse {
    pub fn from_parts(bill: BillDBResponse, shares: Vec<ShareDBResponse>) -> Self {
        Self {
            id: bill.id,
            room_id: bill.room_id,
            title: bill.title,
            amount_cents: bill.amount_cents,
            period: bill.period,
            rule: bill.rule,
            meta: bill.meta,
            shares: shares.into_iter().map(ShareResponse::from).collect(),
        }
    }
}

/// Per-member totals inside a period summary.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MemberSummary {
    pub name: String,
    pub cents: i64,
}

/// Period summary of a room: total billed and each member's owed cents.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SummaryResponse {
    pub period: String,
    pub total_cents: i64,
    pub per_member: BTreeMap<MemberId, MemberSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bill(period: &str, amount: f64) -> BillCreate {
        BillCreate {
            title: "Electricity".to_string(),
            amount,
            period: period.to_string(),
            rule: None,
            meta: None,
        }
    }

    #[test]
    fn valid_bill_passes() {
        assert!(bill("2026-08", 42.50).validate().is_ok());
    }

    #[test]
    fn malformed_period_is_rejected() {
        for period in ["2026-8", "202608", "2026/08", "26-08", "2026-089"] {
            let errors = bill(period, 10.0).validate().unwrap_err();
            assert_eq!(errors[0].field, "period", "period {period:?} should fail");
        }
    }

    #[test]
    fn non_positive_amount_is_rejected() {
        for amount in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let errors = bill("2026-08", amount).validate().unwrap_err();
            assert_eq!(errors[0].field, "amount");
        }
    }

    #[test]
    fn split_rule_deserializes_lowercase() {
        let create: BillCreate =
            serde_json::from_str(r#"{"title":"Water","amount":12.0,"period":"2026-08","rule":"percent"}"#).unwrap();
        assert_eq!(create.rule, Some(SplitRule::Percent));
    }
}
