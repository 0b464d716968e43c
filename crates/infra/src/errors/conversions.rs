//! Conversions from external infrastructure errors into domain errors.

use r2d2::Error as PoolError;
use rusqlite::Error as SqlError;
use slotbook_domain::BookingError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub BookingError);

impl From<InfraError> for BookingError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<BookingError> for InfraError {
    fn from(value: BookingError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoBookingError {
    fn into_booking(self) -> BookingError;
}

/* -------------------------------------------------------------------------- */
/* rusqlite::Error → BookingError */
/* -------------------------------------------------------------------------- */

impl IntoBookingError for SqlError {
    fn into_booking(self) -> BookingError {
        use rusqlite::ffi::ErrorCode;
        use rusqlite::Error as RE;

        match self {
            RE::SqliteFailure(err, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match (err.code, err.extended_code) {
                    (ErrorCode::DatabaseBusy, _) => {
                        BookingError::Database("database is busy".into())
                    }
                    (ErrorCode::DatabaseLocked, _) => {
                        BookingError::Database("database is locked".into())
                    }
                    (ErrorCode::ConstraintViolation, 2067) => {
                        BookingError::Database("unique constraint violation".into())
                    }
                    (ErrorCode::ConstraintViolation, 787) => {
                        BookingError::Database("foreign key constraint violation".into())
                    }
                    _ => BookingError::Database(format!(
                        "sqlite failure {:?} (code {}): {}",
                        err.code, err.extended_code, message
                    )),
                }
            }
            RE::QueryReturnedNoRows => BookingError::NotFound("no rows returned by query".into()),
            RE::FromSqlConversionFailure(_, _, cause) => {
                BookingError::Database(format!("failed to convert sqlite value: {cause}"))
            }
            RE::InvalidColumnType(_, _, ty) => {
                BookingError::Database(format!("invalid column type: {ty}"))
            }
            RE::Utf8Error(_) => BookingError::Database("invalid UTF-8 returned from sqlite".into()),
            RE::InvalidParameterName(parameter_name) => {
                BookingError::Database(format!("invalid parameter name: {parameter_name}"))
            }
            RE::InvalidPath(path) => {
                BookingError::Database(format!("invalid database path: {}", path.to_string_lossy()))
            }
            RE::InvalidQuery => BookingError::Database("invalid SQL query".into()),
            other => BookingError::Database(other.to_string()),
        }
    }
}

impl From<SqlError> for InfraError {
    fn from(value: SqlError) -> Self {
        InfraError(value.into_booking())
    }
}

/* -------------------------------------------------------------------------- */
/* r2d2::Error → BookingError */
/* -------------------------------------------------------------------------- */

impl IntoBookingError for PoolError {
    fn into_booking(self) -> BookingError {
        BookingError::Database(format!("connection pool error: {self}"))
    }
}

impl From<PoolError> for InfraError {
    fn from(value: PoolError) -> Self {
        InfraError(value.into_booking())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
