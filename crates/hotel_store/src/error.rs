use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("reservation {0} not found")]
    NotFound(i32),

    #[error("expected {expected} affected row(s), got {actual}")]
    UnexpectedRowCount { expected: usize, actual: usize },

    #[error("constraint violation: {0}")]
    Constraint(String),

    #[error("connectivity error: {0}")]
    Connectivity(String),

    #[error("diesel error: {0}")]
    Diesel(DieselError),

    #[error("migration error: {0}")]
    Migration(String),
}

/// Coarse classification of [`Error`] for callers that only need to react
/// to the category of failure, e.g. when mapping to a status code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Constraint,
    Connectivity,
    Other,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::Constraint(_) => ErrorKind::Constraint,
            Error::Connectivity(_) => ErrorKind::Connectivity,
            Error::UnexpectedRowCount { .. } | Error::Diesel(_) | Error::Migration(_) => {
                ErrorKind::Other
            }
        }
    }
}

impl From<DieselError> for Error {
    fn from(e: DieselError) -> Self {
        match e {
            DieselError::DatabaseError(kind, info) => match kind {
                DatabaseErrorKind::UniqueViolation
                | DatabaseErrorKind::ForeignKeyViolation
                | DatabaseErrorKind::NotNullViolation
                | DatabaseErrorKind::CheckViolation => {
                    Error::Constraint(info.message().to_string())
                }
                DatabaseErrorKind::ClosedConnection => {
                    Error::Connectivity(info.message().to_string())
                }
                // sqlite reports SQLITE_BUSY and SQLITE_LOCKED without a dedicated kind
                _ if is_locked(info.message()) => Error::Connectivity(info.message().to_string()),
                _ => Error::Diesel(DieselError::DatabaseError(kind, info)),
            },
            other => Error::Diesel(other),
        }
    }
}

fn is_locked(message: &str) -> bool {
    message.starts_with("database is locked") || message.starts_with("database table is locked")
}

impl From<diesel::r2d2::PoolError> for Error {
    fn from(e: diesel::r2d2::PoolError) -> Self {
        Error::Connectivity(e.to_string())
    }
}
