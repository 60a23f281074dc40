//! Notification handler

use std::time::Instant;

use axum::extract::State;
use axum::Json;
use paytrack_domain::Notification;

use super::{ApiError, AppState};
use crate::utils::logging::log_request_outcome;

/// `GET /notifications`
pub(crate) async fn list_notifications(
    State(ctx): State<AppState>,
) -> Result<Json<Vec<Notification>>, ApiError> {
    let start = Instant::now();
    let result = ctx.notifications.notifications().await;
    log_request_outcome("notifications::list", start.elapsed(), &result);
    Ok(Json(result?))
}
