//! Application context - dependency injection container

use std::sync::Arc;
use std::time::Duration;

use paytrack_common::{Clock, SystemClock};
use paytrack_core::{EntryRepository, EntryService, NotificationService};
use paytrack_domain::{Config, PaytrackError, Result};
use paytrack_infra::{DbManager, SqliteEntryRepository};
use tracing::{info, warn};

use crate::utils::health::{ComponentHealth, HealthStatus};

/// Upper bound on the database probe behind `/health`.
pub const HEALTH_PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub db: Arc<DbManager>,
    pub entries: Arc<EntryService>,
    pub notifications: Arc<NotificationService>,
}

impl AppContext {
    /// Create a context from the loaded configuration.
    ///
    /// Falls back to [`Config::default`] only when neither the environment
    /// nor a config file provides one. Invalid configuration is an error.
    pub async fn new() -> Result<Self> {
        let config = paytrack_infra::config::load()?.unwrap_or_else(|| {
            warn!("no configuration found, using defaults");
            Config::default()
        });
        Self::new_with_config(config).await
    }

    /// Create a context with an explicit configuration and the system clock.
    pub async fn new_with_config(config: Config) -> Result<Self> {
        Self::new_with_clock(config, Arc::new(SystemClock)).await
    }

    /// Create a context with an explicit clock
    ///
    /// Tests pin "today" through this constructor.
    pub async fn new_with_clock(config: Config, clock: Arc<dyn Clock>) -> Result<Self> {
        let db = Arc::new(DbManager::new(&config.database.path, config.database.pool_size)?);
        db.run_migrations()?;

        let repository: Arc<dyn EntryRepository> =
            Arc::new(SqliteEntryRepository::new(Arc::clone(&db)));

        let entries = Arc::new(EntryService::new(Arc::clone(&repository)));
        let notifications = Arc::new(NotificationService::new(
            repository,
            clock,
            config.notifications.horizon_days,
        ));

        info!(
            db_path = %db.path().display(),
            horizon_days = config.notifications.horizon_days,
            "application context initialised"
        );

        Ok(Self { config, db, entries, notifications })
    }

    /// Aggregate health of the context's components.
    pub async fn health_check(&self) -> HealthStatus {
        let mut status = HealthStatus::new()
            .add_component(self.check_database_health().await)
            .add_component(self.check_pool_health());
        status.calculate_score();
        status
    }

    /// Check database health by running a trivial query off the async runtime.
    ///
    /// Gives up after [`HEALTH_PROBE_TIMEOUT`] so a saturated pool cannot
    /// hold the endpoint for the whole acquire timeout.
    async fn check_database_health(&self) -> ComponentHealth {
        let db = Arc::clone(&self.db);
        let probe = tokio::task::spawn_blocking(move || db.health_check());
        let outcome = match tokio::time::timeout(HEALTH_PROBE_TIMEOUT, probe).await {
            Ok(joined) => joined
                .map_err(|e| PaytrackError::Internal(format!("health check task failed: {e}")))
                .and_then(|result| result),
            Err(_) => Err(PaytrackError::Database(format!(
                "no connection within {}ms",
                HEALTH_PROBE_TIMEOUT.as_millis()
            ))),
        };

        match outcome {
            Ok(()) => ComponentHealth::healthy("database").critical(),
            Err(err) => {
                warn!(error = %err, "database health check failed");
                ComponentHealth::unhealthy("database", err.to_string()).critical()
            }
        }
    }

    fn check_pool_health(&self) -> ComponentHealth {
        let pool = self.db.pool_health();
        if pool.healthy {
            ComponentHealth { message: pool.message, ..ComponentHealth::healthy("connection_pool") }
        } else {
            ComponentHealth::unhealthy(
                "connection_pool",
                pool.message.unwrap_or_else(|| "pool unavailable".to_string()),
            )
        }
    }

    /// Release resources held by the context.
    ///
    /// Pooled connections close when the last `Arc<DbManager>` is dropped;
    /// this only records the shutdown.
    pub async fn shutdown(&self) -> Result<()> {
        let pool = self.db.pool_health();
        info!(
            connections = pool.connections,
            idle_connections = pool.idle_connections,
            "application context shutting down"
        );
        Ok(())
    }
}
