//! # Paytrack Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - The SQLite database manager, schema and entry repository
//! - Conversions from storage errors into domain errors
//! - The configuration loader (environment, JSON, TOML)
//!
//! ## Architecture
//! - Implements traits defined in `paytrack-core`
//! - Contains all "impure" code (file and database I/O)

pub mod config;
pub mod database;
pub mod errors;

// Re-export commonly used items
pub use database::*;
pub use errors::InfraError;
