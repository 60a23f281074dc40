//! Health reporting for the application context
//!
//! A status is healthy when at least 80% of components pass and no
//! critical component fails. The database is critical: without it no
//! request can succeed.

use chrono::Utc;
use serde::{Deserialize, Serialize};

const HEALTHY_SCORE_THRESHOLD: f64 = 0.8;

/// Overall health of the service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub is_healthy: bool,

    /// Fraction of healthy components, 0.0 to 1.0
    pub score: f64,

    pub version: String,

    pub components: Vec<ComponentHealth>,

    /// RFC 3339 time the check ran
    pub checked_at: String,
}

impl HealthStatus {
    /// Healthy status with no components yet.
    pub fn new() -> Self {
        Self {
            is_healthy: true,
            score: 1.0,
            version: env!("CARGO_PKG_VERSION").to_string(),
            components: Vec::new(),
            checked_at: Utc::now().to_rfc3339(),
        }
    }

    pub fn add_component(mut self, component: ComponentHealth) -> Self {
        self.components.push(component);
        self
    }

    /// Recompute `score` and `is_healthy` from the components.
    pub fn calculate_score(&mut self) {
        if self.components.is_empty() {
            return;
        }

        let healthy_count = self.components.iter().filter(|c| c.is_healthy).count();
        let critical_failure = self.components.iter().any(|c| c.critical && !c.is_healthy);

        self.score = healthy_count as f64 / self.components.len() as f64;
        self.is_healthy = !critical_failure && self.score >= HEALTHY_SCORE_THRESHOLD;
    }

    /// Names of the failing components.
    pub fn failing_components(&self) -> Vec<&str> {
        self.components.iter().filter(|c| !c.is_healthy).map(|c| c.name.as_str()).collect()
    }
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self::new()
    }
}

/// Health of one component
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    pub name: String,
    pub is_healthy: bool,
    /// A failing critical component makes the whole service unhealthy
    pub critical: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ComponentHealth {
    pub fn healthy(name: impl Into<String>) -> Self {
        Self { name: name.into(), is_healthy: true, critical: false, message: None }
    }

    pub fn unhealthy(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self { name: name.into(), is_healthy: false, critical: false, message: Some(message.into()) }
    }

    /// Mark the component as critical.
    pub fn critical(mut self) -> Self {
        self.critical = true;
        self
    }
}
