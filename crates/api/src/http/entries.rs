//! Entry handlers

use std::time::Instant;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use paytrack_domain::{Entry, EntryPayload, MonthlySummary};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use super::{ApiError, AppState};
use crate::utils::logging::log_request_outcome;

/// `?month=M` filter shared by the list and summary routes
#[derive(Debug, Default, Deserialize)]
pub(crate) struct MonthQuery {
    month: Option<i64>,
}

impl MonthQuery {
    /// Months that don't fit `u32` can't match any entry; map them to 0 so
    /// the service returns an empty result.
    fn month(&self) -> Option<u32> {
        self.month.map(|m| u32::try_from(m).unwrap_or(0))
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct BatchCreated {
    count: usize,
}

/// `GET /entries[?month=M]`
pub(crate) async fn list_entries(
    State(ctx): State<AppState>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Result<Json<Vec<Entry>>, ApiError> {
    let Query(query) = query?;
    let start = Instant::now();

    let result = match query.month() {
        Some(month) => ctx.entries.list_by_month(month).await,
        None => ctx.entries.list_all().await,
    };

    log_request_outcome("entries::list", start.elapsed(), &result);
    Ok(Json(result?))
}

/// `GET /entries/summary[?month=M]`
pub(crate) async fn monthly_summary(
    State(ctx): State<AppState>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Result<Json<MonthlySummary>, ApiError> {
    let Query(query) = query?;
    let start = Instant::now();

    let result = ctx.entries.monthly_summary(query.month()).await;

    log_request_outcome("entries::summary", start.elapsed(), &result);
    Ok(Json(result?))
}

/// `GET /entries/{id}`
pub(crate) async fn get_entry(
    State(ctx): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Entry>, ApiError> {
    let Path(id) = id?;
    let start = Instant::now();

    let result = ctx.entries.get(id).await;

    log_request_outcome("entries::get", start.elapsed(), &result);
    Ok(Json(result?))
}

/// `POST /entries`
pub(crate) async fn create_entry(
    State(ctx): State<AppState>,
    payload: Result<Json<EntryPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Entry>), ApiError> {
    let Json(payload) = payload?;
    let start = Instant::now();

    let result = ctx.entries.create(&payload).await;

    log_request_outcome("entries::create", start.elapsed(), &result);
    Ok((StatusCode::CREATED, Json(result?)))
}

/// `POST /entries/batch`
pub(crate) async fn create_batch(
    State(ctx): State<AppState>,
    payloads: Result<Json<Vec<EntryPayload>>, JsonRejection>,
) -> Result<(StatusCode, Json<BatchCreated>), ApiError> {
    let Json(payloads) = payloads?;
    let start = Instant::now();

    let result = ctx.entries.create_batch(&payloads).await;

    log_request_outcome("entries::create_batch", start.elapsed(), &result);
    Ok((StatusCode::CREATED, Json(BatchCreated { count: result? })))
}

/// `PUT /entries/{id}`
pub(crate) async fn update_entry(
    State(ctx): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<EntryPayload>, JsonRejection>,
) -> Result<Json<Entry>, ApiError> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    let start = Instant::now();

    let result = ctx.entries.update(id, &payload).await;

    log_request_outcome("entries::update", start.elapsed(), &result);
    Ok(Json(result?))
}

/// `DELETE /entries/{id}`
///
/// Succeeds whether or not a row matched.
pub(crate) async fn delete_entry(
    State(ctx): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(id) = id?;
    let start = Instant::now();

    let result = ctx.entries.delete(id).await;

    log_request_outcome("entries::delete", start.elapsed(), &result);
    let deleted = result?;
    debug!(entry_id = id, deleted, "entry delete handled");
    Ok(Json(json!({ "success": true })))
}
