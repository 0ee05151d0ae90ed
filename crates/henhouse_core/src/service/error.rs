//! Use-case level error taxonomy.
//!
//! # Invariants
//! - `Validation` is raised before any write is attempted.
//! - `UpstreamUnavailable` is distinct from "no data" and is retryable at the
//!   caller's discretion; services never retry on their own.

use crate::db::DbError;
use crate::model::validation::ValidationError;
use crate::repo::error::{EntityKind, RepoError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error returned by every boundary operation.
#[derive(Debug)]
pub enum ServiceError {
    /// Malformed or out-of-domain input.
    Validation(ValidationError),
    /// Target record does not exist.
    NotFound { entity: EntityKind, id: Uuid },
    /// Record store is busy, locked or unreachable.
    UpstreamUnavailable(String),
    /// Any other persistence failure.
    Repo(RepoError),
}

impl ServiceError {
    /// Stable machine-readable code used in logs and boundary payloads.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::NotFound { .. } => "not_found",
            Self::UpstreamUnavailable(_) => "upstream_unavailable",
            Self::Repo(_) => "storage_error",
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::UpstreamUnavailable(_))
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "validation failed: {err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::UpstreamUnavailable(details) => {
                write!(f, "record store unavailable: {details}")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::NotFound { .. } | Self::UpstreamUnavailable(_) => None,
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for ServiceError {
    fn from(value: DbError) -> Self {
        Self::from(RepoError::Db(value))
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            RepoError::NotFound { entity, id } => Self::NotFound { entity, id },
            RepoError::Db(err) if err.is_unavailable() => Self::UpstreamUnavailable(err.to_string()),
            other => Self::Repo(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ServiceError;
    use crate::db::DbError;
    use crate::model::validation::ValidationError;
    use crate::repo::error::{EntityKind, RepoError};
    use rusqlite::ffi;
    use uuid::Uuid;

    #[test]
    fn repo_errors_map_onto_the_taxonomy() {
        let id = Uuid::new_v4();
        let not_found = ServiceError::from(RepoError::NotFound {
            entity: EntityKind::Chicken,
            id,
        });
        assert!(matches!(not_found, ServiceError::NotFound { id: found, .. } if found == id));
        assert_eq!(not_found.code(), "not_found");

        let validation = ServiceError::from(RepoError::Validation(ValidationError::ZeroAge));
        assert!(matches!(validation, ServiceError::Validation(ValidationError::ZeroAge)));

        let busy = ServiceError::from(RepoError::Db(DbError::Sqlite(
            rusqlite::Error::SqliteFailure(ffi::Error::new(ffi::SQLITE_BUSY), None),
        )));
        assert!(busy.is_retryable());
        assert_eq!(busy.code(), "upstream_unavailable");

        let corrupt = ServiceError::from(RepoError::InvalidData("bad row".to_string()));
        assert!(!corrupt.is_retryable());
        assert_eq!(corrupt.code(), "storage_error");
    }
}
