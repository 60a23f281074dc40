//! # Paytrack API
//!
//! HTTP application layer - routes, handlers and the server entry point.
//!
//! This crate contains:
//! - The axum router and JSON handlers (browser page → backend bridge)
//! - Application context (dependency injection)
//! - Logging setup and health reporting
//!
//! ## Architecture
//! - Depends on `common`, `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture

pub mod context;
pub mod http;
pub mod utils;

// Re-export for convenience
pub use context::*;
pub use http::build_router;
