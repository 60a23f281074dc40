//! Configuration structures
//!
//! Loaded by `paytrack-infra::config` from environment variables or a
//! JSON/TOML file. Every section has defaults so partial files are valid.

use serde::{Deserialize, Serialize};

use crate::constants::{
    CORS_ALLOW_ANY_ORIGIN, DEFAULT_API_PREFIX, DEFAULT_DB_PATH, DEFAULT_DB_POOL_SIZE,
    DEFAULT_NOTIFICATION_HORIZON_DAYS, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
};

/// Top-level application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
}

/// SQLite database settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: String,
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { path: default_db_path(), pool_size: default_pool_size() }
    }
}

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Common prefix for every route, e.g. `/api`. Empty mounts at root.
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
    /// Origins allowed by CORS; `*` allows any origin.
    #[serde(default = "default_cors_origins")]
    pub cors_allowed_origins: Vec<String>,
}

impl ServerConfig {
    /// `host:port` string suitable for binding a listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The API prefix normalised to either `""` or `/segment` without a
    /// trailing slash.
    pub fn normalized_prefix(&self) -> String {
        let trimmed = self.api_prefix.trim().trim_matches('/');
        if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{trimmed}")
        }
    }

    /// Whether requests from `origin` may read responses.
    pub fn allows_origin(&self, origin: &str) -> bool {
        self.cors_allowed_origins.iter().any(|o| o == CORS_ALLOW_ANY_ORIGIN || o == origin)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            api_prefix: default_api_prefix(),
            cors_allowed_origins: default_cors_origins(),
        }
    }
}

/// Due-date notification policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// How many days ahead of today a pending forecast starts to notify.
    #[serde(default = "default_horizon_days")]
    pub horizon_days: u32,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self { horizon_days: default_horizon_days() }
    }
}

fn default_db_path() -> String {
    DEFAULT_DB_PATH.to_string()
}

fn default_pool_size() -> u32 {
    DEFAULT_DB_POOL_SIZE
}

fn default_host() -> String {
    DEFAULT_SERVER_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_SERVER_PORT
}

fn default_api_prefix() -> String {
    DEFAULT_API_PREFIX.to_string()
}

fn default_cors_origins() -> Vec<String> {
    vec![CORS_ALLOW_ANY_ORIGIN.to_string()]
}

fn default_horizon_days() -> u32 {
    DEFAULT_NOTIFICATION_HORIZON_DAYS
}
