//! # Paytrack Domain
//!
//! Business domain types and models for Paytrack.
//!
//! This crate contains:
//! - Commission entries, their request payload and validation
//! - Due-date notifications and monthly summaries
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Domain constants
//!
//! ## Architecture
//! - No dependencies on other Paytrack crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
