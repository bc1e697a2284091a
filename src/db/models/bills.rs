//! Database models for bills and their member shares.

use crate::types::{BillId, MemberId, RoomId, ShareId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A bill row as stored in the database. Amounts are integer cents; the share
/// rows for a bill always sum to `amount_cents` exactly.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BillDBResponse {
    pub id: BillId,
    pub room_id: RoomId,
    pub title: String,
    pub amount_cents: i64,
    pub period: String,
    pub rule: String,
    pub meta: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

/// A share row joined with its member's name.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ShareDBResponse {
    pub id: ShareId,
    pub bill_id: BillId,
    pub member_id: MemberId,
    pub member_name: String,
    pub amount_cents: i64,
}

/// One member's pre-computed slice of a bill being created.
#[derive(Debug, Clone, Copy)]
pub struct ShareAllocation {
    pub member_id: MemberId,
    pub amount_cents: i64,
}

/// Request to insert a bill together with its shares. Allocations are computed
/// by the split engine before the request reaches the repository, so the
/// insert is a single transaction with no arithmetic in it.
#[derive(Debug, Clone)]
pub struct BillCreateDBRequest {
    pub room_id: RoomId,
    pub title: String,
    pub amount_cents: i64,
    pub period: String,
    pub rule: String,
    pub meta: Option<serde_json::Value>,
    pub allocations: Vec<ShareAllocation>,
}
