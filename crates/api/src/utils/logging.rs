//! Logging setup and structured request logging

use std::time::Duration;

use paytrack_domain::PaytrackError;
use tracing::{error, info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber.
///
/// Filter comes from `RUST_LOG` (default `info`); `PAYTRACK_LOG_FORMAT=json`
/// switches to JSON lines.
pub fn init_tracing() -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if json_output_requested() {
        registry.with(fmt::layer().json()).try_init()
    } else {
        registry.with(fmt::layer()).try_init()
    }
}

fn json_output_requested() -> bool {
    std::env::var("PAYTRACK_LOG_FORMAT").is_ok_and(|v| v.trim().eq_ignore_ascii_case("json"))
}

/// Log the outcome of a request handler with structured fields.
///
/// `operation` is a stable identifier such as `"entries::create"`. Client
/// errors log at `warn`, server errors at `error`.
pub fn log_request_outcome<T>(
    operation: &str,
    elapsed: Duration,
    result: &Result<T, PaytrackError>,
) {
    let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

    match result {
        Ok(_) => info!(operation, duration_ms, "request_success"),
        Err(err) if is_client_error(err) => {
            warn!(operation, duration_ms, error_type = error_label(err), error = %err, "request_rejected");
        }
        Err(err) => {
            error!(operation, duration_ms, error_type = error_label(err), error = %err, "request_failure");
        }
    }
}

/// Whether the error was caused by the caller rather than the server.
pub fn is_client_error(error: &PaytrackError) -> bool {
    matches!(error, PaytrackError::InvalidInput(_) | PaytrackError::NotFound(_))
}

/// Convert a `PaytrackError` into a stable label suitable for logging.
#[inline]
pub fn error_label(error: &PaytrackError) -> &'static str {
    match error {
        PaytrackError::Database(_) => "database",
        PaytrackError::Config(_) => "config",
        PaytrackError::NotFound(_) => "not_found",
        PaytrackError::InvalidInput(_) => "invalid_input",
        PaytrackError::Internal(_) => "internal",
    }
}
