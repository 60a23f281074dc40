//! HTTP surface
//!
//! JSON routes for the browser page, mounted under the configured prefix.

mod cors;
mod entries;
mod error;
mod health;
mod notifications;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::{middleware, Router};

pub use error::ApiError;

use crate::context::AppContext;

/// Shared handler state
pub type AppState = Arc<AppContext>;

/// Build the application router for `ctx`.
pub fn build_router(ctx: AppState) -> Router {
    let api = Router::new()
        .route("/entries", get(entries::list_entries).post(entries::create_entry))
        .route("/entries/batch", post(entries::create_batch))
        .route("/entries/summary", get(entries::monthly_summary))
        .route(
            "/entries/{id}",
            get(entries::get_entry).put(entries::update_entry).delete(entries::delete_entry),
        )
        .route("/notifications", get(notifications::list_notifications))
        .route("/health", get(health::health));

    let prefix = ctx.config.server.normalized_prefix();
    let router = if prefix.is_empty() { api } else { Router::new().nest(&prefix, api) };

    router
        .fallback(error::route_not_found)
        .layer(middleware::from_fn_with_state(Arc::clone(&ctx), cors::cors_middleware))
        .with_state(ctx)
}
