//! HTTP handlers for bills, shares and period summaries.
//!
//! Bill creation is where the split engine runs: the handler resolves the
//! room's members, computes cent-exact allocations for the requested rule and
//! hands the repository a fully-specified insert.

use crate::{
    AppState,
    api::handlers::members::ensure_room_exists,
    api::models::bills::{BillCreate, BillResponse, MemberSummary, SplitRule, SummaryResponse},
    db::{
        handlers::{Bills, Members},
        models::{
            bills::{BillCreateDBRequest, ShareDBResponse},
            members::MemberDBResponse,
        },
    },
    errors::{Error, FieldError, Result},
    split::{split_equal, split_proportional, to_cents},
    types::{BillId, MemberId, RoomId},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use std::collections::HashMap;

/// Pull per-member numbers out of `meta.percents` or `meta.weights`. Members
/// absent from the map get 0; keys that match no member and negative values
/// are rejected.
fn member_values(
    meta: Option<&serde_json::Value>,
    key: &str,
    members: &[MemberDBResponse],
) -> Result<Vec<(MemberId, f64)>> {
    let map = meta
        .and_then(|m| m.get(key))
        .and_then(|v| v.as_object())
        .ok_or_else(|| Error::BadRequest {
            message: format!("meta.{key} is required for this split rule"),
        })?;

    for id in map.keys() {
        if !members.iter().any(|m| m.id.to_string() == *id) {
            return Err(Error::BadRequest {
                message: format!("meta.{key} references unknown member {id}"),
            });
        }
    }

    members
        .iter()
        .map(|member| {
            let value = match map.get(&member.id.to_string()) {
                Some(raw) => raw.as_f64().ok_or_else(|| Error::BadRequest {
                    message: format!("meta.{key} values must be numbers"),
                })?,
                None => 0.0,
            };
            if value < 0.0 {
                return Err(Error::BadRequest {
                    message: format!("meta.{key} values must be >= 0"),
                });
            }
            Ok((member.id, value))
        })
        .collect()
}

// POST /rooms/{room_id}/bills - Create a bill and its member shares
#[tracing::instrument(skip_all)]
pub async fn create_bill(
    State(state): State<AppState>,
    Path(room_id): Path<RoomId>,
    Json(data): Json<BillCreate>,
) -> Result<(StatusCode, Json<BillResponse>)> {
    data.validate().map_err(|errors| Error::Validation { errors })?;

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    ensure_room_exists(&mut conn, room_id).await?;

    let members = Members::new(&mut conn).list_for_room(room_id).await?;
    if members.is_empty() {
        return Err(Error::BadRequest {
            message: "Room has no members to split the bill between".to_string(),
        });
    }

    let rule = data.rule.unwrap_or(SplitRule::Equal);
    let amount_cents = to_cents(data.amount);

    let allocations = match rule {
        SplitRule::Equal => {
            let member_ids: Vec<MemberId> = members.iter().map(|m| m.id).collect();
            split_equal(amount_cents, &member_ids)
        }
        SplitRule::Percent => {
            let values = member_values(data.meta.as_ref(), "percents", &members)?;
            let sum: f64 = values.iter().map(|&(_, v)| v).sum();
            if (sum - 100.0).abs() > 0.01 {
                return Err(Error::BadRequest {
                    message: format!("meta.percents must sum to 100, got {sum}"),
                });
            }
            split_proportional(amount_cents, &values)
        }
        SplitRule::Weight => {
            let values = member_values(data.meta.as_ref(), "weights", &members)?;
            split_proportional(amount_cents, &values)
        }
    };

    if allocations.is_empty() {
        return Err(Error::BadRequest {
            message: "Split produced no shares; at least one member must carry a positive part".to_string(),
        });
    }

    let mut repo = Bills::new(&mut conn);
    let bill = repo
        .create(&BillCreateDBRequest {
            room_id,
            title: data.title,
            amount_cents,
            period: data.period,
            rule: rule.as_str().to_string(),
            meta: data.meta,
            allocations,
        })
        .await?;

    let shares = repo.shares_for_bills(&[bill.id]).await?;
    Ok((StatusCode::CREATED, Json(BillResponse::from_parts(bill, shares))))
}

// GET /rooms/{room_id}/bills - List a room's bills with shares, newest first
#[tracing::instrument(skip_all)]
pub async fn list_bills(
    State(state): State<AppState>,
    Path(room_id): Path<RoomId>,
) -> Result<Json<Vec<BillResponse>>> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    ensure_room_exists(&mut conn, room_id).await?;

    let mut repo = Bills::new(&mut conn);
    let bills = repo.list_for_room(room_id).await?;
    let bill_ids: Vec<BillId> = bills.iter().map(|b| b.id).collect();
    let shares = repo.shares_for_bills(&bill_ids).await?;

    let mut by_bill: HashMap<BillId, Vec<ShareDBResponse>> = HashMap::new();
    for share in shares {
        by_bill.entry(share.bill_id).or_default().push(share);
    }

    let response = bills
        .into_iter()
        .map(|bill| {
            let shares = by_bill.remove(&bill.id).unwrap_or_default();
            BillResponse::from_parts(bill, shares)
        })
        .collect();

    Ok(Json(response))
}

// DELETE /rooms/{room_id}/bills/{bill_id} - Delete a bill; shares cascade
#[tracing::instrument(skip_all)]
pub async fn delete_bill(
    State(state): State<AppState>,
    Path((room_id, bill_id)): Path<(RoomId, BillId)>,
) -> Result<StatusCode> {
    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    ensure_room_exists(&mut conn, room_id).await?;

    let deleted = Bills::new(&mut conn).delete(room_id, bill_id).await?;
    if !deleted {
        return Err(Error::NotFound {
            resource: "Bill".to_string(),
            id: bill_id.to_string(),
        });
    }

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    period: Option<String>,
}

// GET /rooms/{room_id}/summary?period=YYYY-MM - Per-member totals for a
// period, defaulting to the current month
#[tracing::instrument(skip_all)]
pub async fn get_summary(
    State(state): State<AppState>,
    Path(room_id): Path<RoomId>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<SummaryResponse>> {
    let period = query
        .period
        .unwrap_or_else(|| chrono::Utc::now().format("%Y-%m").to_string());
    if !crate::api::models::bills::is_period(&period) {
        return Err(Error::Validation {
            errors: vec![FieldError::new("period", "must match YYYY-MM")],
        });
    }

    let mut conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    ensure_room_exists(&mut conn, room_id).await?;

    let members = Members::new(&mut conn).list_for_room(room_id).await?;

    let mut repo = Bills::new(&mut conn);
    let bills = repo.list_for_period(room_id, &period).await?;
    let bill_ids: Vec<BillId> = bills.iter().map(|b| b.id).collect();
    let shares = repo.shares_for_bills(&bill_ids).await?;

    let total_cents = bills.iter().map(|b| b.amount_cents).sum();

    // Every member appears, owed zero when nothing landed on them.
    let mut per_member = members
        .into_iter()
        .map(|m| {
            (
                m.id,
                MemberSummary {
                    name: m.name,
                    cents: 0,
                },
            )
        })
        .collect::<std::collections::BTreeMap<_, _>>();

    for share in shares {
        if let Some(summary) = per_member.get_mut(&share.member_id) {
            summary.cents += share.amount_cents;
        }
    }

    Ok(Json(SummaryResponse {
        period,
        total_cents,
        per_member,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use serde_json::json;
    use sqlx::PgPool;

    async fn room_with_members(app: &axum_test::TestServer, names: &[&str]) -> (RoomId, Vec<MemberId>) {
        let room_id = create_test_room(app, "Flat 12B").await;
        let mut member_ids = Vec::new();
        for name in names {
            let response = app
                .post(&format!("/rooms/{room_id}/members"))
                .json(&json!({"name": name}))
                .await;
            response.assert_status(StatusCode::CREATED);
            let member: crate::api::models::members::MemberResponse = response.json();
            member_ids.push(member.id);
        }
        (room_id, member_ids)
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_equal_split_hands_leftover_cents_to_earliest_members(pool: PgPool) {
        let app = create_test_app(pool).await;
        let (room_id, _) = room_with_members(&app, &["Ana", "Ben", "Cleo"]).await;

        let response = app
            .post(&format!("/rooms/{room_id}/bills"))
            .json(&json!({"title": "Rent", "amount": 100.0, "period": "2026-08"}))
            .await;
        response.assert_status(StatusCode::CREATED);

        let bill: BillResponse = response.json();
        assert_eq!(bill.amount_cents, 10000);
        assert_eq!(bill.rule, "equal");
        let cents: Vec<i64> = bill.shares.iter().map(|s| s.amount_cents).collect();
        assert_eq!(cents, vec![3334, 3333, 3333]);
        assert_eq!(cents.iter().sum::<i64>(), bill.amount_cents);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_percent_split_follows_meta(pool: PgPool) {
        let app = create_test_app(pool).await;
        let (room_id, member_ids) = room_with_members(&app, &["Ana", "Ben"]).await;

        let response = app
            .post(&format!("/rooms/{room_id}/bills"))
            .json(&json!({
                "title": "Internet",
                "amount": 50.0,
                "period": "2026-08",
                "rule": "percent",
                "meta": {"percents": {
                    member_ids[0].to_string(): 70,
                    member_ids[1].to_string(): 30,
                }},
            }))
            .await;
        response.assert_status(StatusCode::CREATED);

        let bill: BillResponse = response.json();
        let cents: Vec<i64> = bill.shares.iter().map(|s| s.amount_cents).collect();
        assert_eq!(cents, vec![3500, 1500]);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_percent_split_rejects_bad_sum(pool: PgPool) {
        let app = create_test_app(pool).await;
        let (room_id, member_ids) = room_with_members(&app, &["Ana", "Ben"]).await;

        let response = app
            .post(&format!("/rooms/{room_id}/bills"))
            .json(&json!({
                "title": "Internet",
                "amount": 50.0,
                "period": "2026-08",
                "rule": "percent",
                "meta": {"percents": {
                    member_ids[0].to_string(): 70,
                    member_ids[1].to_string(): 40,
                }},
            }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    // A negative percent can still sum to 100 with an inflated partner; both
    // rules reject negatives outright.
    #[sqlx::test]
    #[test_log::test]
    async fn test_negative_split_values_are_rejected(pool: PgPool) {
        let app = create_test_app(pool).await;
        let (room_id, member_ids) = room_with_members(&app, &["Ana", "Ben"]).await;

        let response = app
            .post(&format!("/rooms/{room_id}/bills"))
            .json(&json!({
                "title": "Internet",
                "amount": 50.0,
                "period": "2026-08",
                "rule": "percent",
                "meta": {"percents": {
                    member_ids[0].to_string(): -10,
                    member_ids[1].to_string(): 110,
                }},
            }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let response = app
            .post(&format!("/rooms/{room_id}/bills"))
            .json(&json!({
                "title": "Groceries",
                "amount": 30.0,
                "period": "2026-08",
                "rule": "weight",
                "meta": {"weights": {
                    member_ids[0].to_string(): -1,
                    member_ids[1].to_string(): 2,
                }},
            }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_weight_split_is_proportional(pool: PgPool) {
        let app = create_test_app(pool).await;
        let (room_id, member_ids) = room_with_members(&app, &["Ana", "Ben"]).await;

        let response = app
            .post(&format!("/rooms/{room_id}/bills"))
            .json(&json!({
                "title": "Groceries",
                "amount": 30.0,
                "period": "2026-08",
                "rule": "weight",
                "meta": {"weights": {
                    member_ids[0].to_string(): 1,
                    member_ids[1].to_string(): 2,
                }},
            }))
            .await;
        response.assert_status(StatusCode::CREATED);

        let bill: BillResponse = response.json();
        let cents: Vec<i64> = bill.shares.iter().map(|s| s.amount_cents).collect();
        assert_eq!(cents, vec![1000, 2000]);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_bill_in_empty_room_is_rejected(pool: PgPool) {
        let app = create_test_app(pool).await;
        let room_id = create_test_room(&app, "Empty Flat").await;

        let response = app
            .post(&format!("/rooms/{room_id}/bills"))
            .json(&json!({"title": "Rent", "amount": 100.0, "period": "2026-08"}))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_delete_bill_removes_it_from_listing(pool: PgPool) {
        let app = create_test_app(pool).await;
        let (room_id, _) = room_with_members(&app, &["Ana"]).await;

        let bill: BillResponse = app
            .post(&format!("/rooms/{room_id}/bills"))
            .json(&json!({"title": "Rent", "amount": 100.0, "period": "2026-08"}))
            .await
            .json();

        app.delete(&format!("/rooms/{room_id}/bills/{}", bill.id))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        let bills: Vec<BillResponse> = app.get(&format!("/rooms/{room_id}/bills")).await.json();
        assert!(bills.is_empty());

        app.delete(&format!("/rooms/{room_id}/bills/{}", bill.id))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_summary_totals_one_period(pool: PgPool) {
        let app = create_test_app(pool).await;
        let (room_id, member_ids) = room_with_members(&app, &["Ana", "Ben", "Cleo"]).await;

        for (title, amount, period) in [("Rent", 100.0, "2026-08"), ("Water", 30.0, "2026-08"), ("Rent", 100.0, "2026-09")] {
            app.post(&format!("/rooms/{room_id}/bills"))
                .json(&json!({"title": title, "amount": amount, "period": period}))
                .await
                .assert_status(StatusCode::CREATED);
        }

        let summary: SummaryResponse = app
            .get(&format!("/rooms/{room_id}/summary"))
            .add_query_param("period", "2026-08")
            .await
            .json();

        assert_eq!(summary.period, "2026-08");
        assert_eq!(summary.total_cents, 13000);
        let owed: i64 = summary.per_member.values().map(|m| m.cents).sum();
        assert_eq!(owed, 13000);
        // 100.00 split [3334, 3333, 3333] plus 30.00 split [1000, 1000, 1000]
        assert_eq!(summary.per_member[&member_ids[0]].cents, 4334);
        assert_eq!(summary.per_member[&member_ids[1]].cents, 4333);
        assert_eq!(summary.per_member[&member_ids[2]].cents, 4333);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_summary_rejects_malformed_period(pool: PgPool) {
        let app = create_test_app(pool).await;
        let (room_id, _) = room_with_members(&app, &["Ana"]).await;

        app.get(&format!("/rooms/{room_id}/summary"))
            .add_query_param("period", "2026-8")
            .await
            .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_summary_defaults_to_current_month(pool: PgPool) {
        let app = create_test_app(pool).await;
        let (room_id, _) = room_with_members(&app, &["Ana"]).await;

        let summary: SummaryResponse = app.get(&format!("/rooms/{room_id}/summary")).await.json();
        assert_eq!(summary.period, chrono::Utc::now().format("%Y-%m").to_string());
        assert_eq!(summary.total_cents, 0);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_summary_in_quiet_period_is_all_zeroes(pool: PgPool) {
        let app = create_test_app(pool).await;
        let (room_id, _) = room_with_members(&app, &["Ana", "Ben"]).await;

        let summary: SummaryResponse = app
            .get(&format!("/rooms/{room_id}/summary"))
            .add_query_param("period", "2026-01")
            .await
            .json();

        assert_eq!(summary.total_cents, 0);
        assert_eq!(summary.per_member.len(), 2);
        assert!(summary.per_member.values().all(|m| m.cents == 0));
    }
}
