//! Conversions from external infrastructure errors into domain errors.

use paytrack_common::StorageError;
use paytrack_domain::PaytrackError;
use rusqlite::Error as SqlError;
use tokio::task::JoinError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub PaytrackError);

impl From<InfraError> for PaytrackError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<PaytrackError> for InfraError {
    fn from(value: PaytrackError) -> Self {
        InfraError(value)
    }
}

trait IntoPaytrackError {
    fn into_paytrack(self) -> PaytrackError;
}

/* -------------------------------------------------------------------------- */
/* rusqlite::Error → PaytrackError */
/* -------------------------------------------------------------------------- */

impl IntoPaytrackError for SqlError {
    fn into_paytrack(self) -> PaytrackError {
        use rusqlite::ffi::ErrorCode;
        use rusqlite::Error as RE;

        match self {
            RE::SqliteFailure(err, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match (err.code, err.extended_code) {
                    (ErrorCode::DatabaseBusy, _) => {
                        PaytrackError::Database("database is busy".into())
                    }
                    (ErrorCode::DatabaseLocked, _) => {
                        PaytrackError::Database("database is locked".into())
                    }
                    (ErrorCode::ConstraintViolation, 275) => {
                        PaytrackError::Database(format!("check constraint violation: {message}"))
                    }
                    (ErrorCode::ConstraintViolation, 1299) => {
                        PaytrackError::Database(format!("not null constraint violation: {message}"))
                    }
                    (ErrorCode::ConstraintViolation, 2067 | 1555) => {
                        PaytrackError::Database("unique constraint violation".into())
                    }
                    (ErrorCode::NotADatabase, _) => {
                        PaytrackError::Database("file is not a SQLite database".into())
                    }
                    _ => PaytrackError::Database(format!(
                        "sqlite failure {:?} (code {}): {}",
                        err.code, err.extended_code, message
                    )),
                }
            }
            RE::QueryReturnedNoRows => PaytrackError::NotFound("no rows returned by query".into()),
            RE::FromSqlConversionFailure(_, _, cause) => {
                PaytrackError::Database(format!("failed to convert sqlite value: {cause}"))
            }
            RE::InvalidColumnType(_, name, ty) => {
                PaytrackError::Database(format!("invalid column type for '{name}': {ty}"))
            }
            RE::Utf8Error(..) => {
                PaytrackError::Database("invalid UTF-8 returned from sqlite".into())
            }
            RE::InvalidPath(path, ..) => PaytrackError::Database(format!(
                "invalid database path: {}",
                path.to_string_lossy()
            )),
            other => PaytrackError::Database(other.to_string()),
        }
    }
}

impl From<SqlError> for InfraError {
    fn from(value: SqlError) -> Self {
        InfraError(value.into_paytrack())
    }
}

/* -------------------------------------------------------------------------- */
/* StorageError → PaytrackError */
/* -------------------------------------------------------------------------- */

impl IntoPaytrackError for StorageError {
    fn into_paytrack(self) -> PaytrackError {
        match self {
            StorageError::Rusqlite(err) => err.into_paytrack(),
            StorageError::Timeout(secs) => {
                PaytrackError::Database(format!("timed out after {secs}s waiting for a connection"))
            }
            StorageError::InvalidConfig(msg) => PaytrackError::Config(msg),
            other => PaytrackError::Database(other.to_string()),
        }
    }
}

impl From<StorageError> for InfraError {
    fn from(value: StorageError) -> Self {
        InfraError(value.into_paytrack())
    }
}

/* -------------------------------------------------------------------------- */
/* Helpers for repository closures */
/* -------------------------------------------------------------------------- */

pub fn map_sql_error(err: SqlError) -> PaytrackError {
    PaytrackError::from(InfraError::from(err))
}

pub fn map_storage_error(err: StorageError) -> PaytrackError {
    PaytrackError::from(InfraError::from(err))
}

pub fn map_join_error(err: JoinError) -> PaytrackError {
    PaytrackError::Internal(format!("Task join error: {err}"))
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
