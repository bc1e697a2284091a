//! Database repository for bills and shares.

use crate::types::{BillId, RoomId};
use crate::db::{
    errors::Result,
    models::bills::{BillCreateDBRequest, BillDBResponse, ShareDBResponse},
};
use sqlx::{Connection, PgConnection};
use tracing::instrument;

pub struct Bills<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Bills<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Insert a bill and its pre-computed shares in one transaction. Either
    /// the bill lands with every share or nothing changes.
    #[instrument(skip(self, request), fields(room_id = request.room_id, title = %request.title), err)]
    pub async fn create(&mut self, request: &BillCreateDBRequest) -> Result<BillDBResponse> {
        let mut tx = self.db.begin().await?;

        let bill = sqlx::query_as::<_, BillDBResponse>(
            "INSERT INTO bills (room_id, title, amount_cents, period, rule, meta)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id, room_id, title, amount_cents, period, rule, meta, created_at",
        )
        .bind(request.room_id)
        .bind(&request.title)
        .bind(request.amount_cents)
        .bind(&request.period)
        .bind(&request.rule)
        .bind(&request.meta)
        .fetch_one(&mut *tx)
        .await?;

        for allocation in &request.allocations {
            sqlx::query("INSERT INTO shares (bill_id, member_id, amount_cents) VALUES ($1, $2, $3)")
                .bind(bill.id)
                .bind(allocation.member_id)
                .bind(allocation.amount_cents)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(bill)
    }

    /// Bills of a room, newest first.
    #[instrument(skip(self), err)]
    pub async fn list_for_room(&mut self, room_id: RoomId) -> Result<Vec<BillDBResponse>> {
        let bills = sqlx::query_as::<_, BillDBResponse>(
            "SELECT id, room_id, title, amount_cents, period, rule, meta, created_at
             FROM bills WHERE room_id = $1 ORDER BY id DESC",
        )
        .bind(room_id)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(bills)
    }

    /// Bills of a room restricted to one accounting period (`YYYY-MM`).
    #[instrument(skip(self), err)]
    pub async fn list_for_period(&mut self, room_id: RoomId, period: &str) -> Result<Vec<BillDBResponse>> {
        let bills = sqlx::query_as::<_, BillDBResponse>(
            "SELECT id, room_id, title, amount_cents, period, rule, meta, created_at
             FROM bills WHERE room_id = $1 AND period = $2 ORDER BY id DESC",
        )
        .bind(room_id)
        .bind(period)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(bills)
    }

    /// Shares for a set of bills, joined with member names.
    #[instrument(skip(self, bill_ids), fields(count = bill_ids.len()), err)]
    pub async fn shares_for_bills(&mut self, bill_ids: &[BillId]) -> Result<Vec<ShareDBResponse>> {
        if bill_ids.is_empty() {
            return Ok(Vec::new());
        }

        let shares = sqlx::query_as::<_, ShareDBResponse>(
            "SELECT s.id, s.bill_id, s.member_id, m.name AS member_name, s.amount_cents
             FROM shares s
             JOIN members m ON m.id = s.member_id
             WHERE s.bill_id = ANY($1)
             ORDER BY s.id ASC",
        )
        .bind(bill_ids)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(shares)
    }

    /// Delete a bill, scoped to its room so a mismatched room id cannot
    /// reach someone else's bill. Shares cascade. Returns whether a row went.
    #[instrument(skip(self), err)]
    pub async fn delete(&mut self, room_id: RoomId, bill_id: BillId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM bills WHERE id = $1 AND room_id = $2")
            .bind(bill_id)
            .bind(room_id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
