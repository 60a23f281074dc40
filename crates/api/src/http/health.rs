//! Health endpoint

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use super::AppState;
use crate::utils::health::HealthStatus;

/// `GET /health`: 200 when healthy, 503 otherwise.
pub(crate) async fn health(State(ctx): State<AppState>) -> (StatusCode, Json<HealthStatus>) {
    let status = ctx.health_check().await;
    let code = if status.is_healthy { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (code, Json(status))
}
