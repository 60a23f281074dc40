//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Notification policy
pub const DEFAULT_NOTIFICATION_HORIZON_DAYS: u32 = 15;

// Server defaults
pub const DEFAULT_SERVER_HOST: &str = "127.0.0.1";
pub const DEFAULT_SERVER_PORT: u16 = 3000;
pub const DEFAULT_API_PREFIX: &str = "/api";
pub const CORS_ALLOW_ANY_ORIGIN: &str = "*";

// Database defaults
pub const DEFAULT_DB_PATH: &str = "paytrack.db";
pub const DEFAULT_DB_POOL_SIZE: u32 = 5;

// Wire format for calendar dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";
