//! Operation services, one per entity.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level operations.
//! - Apply the application-level referential checks (parent must exist) on
//!   every creation path.
//! - Produce caller-facing error details (`NotFound`, `Conflict`,
//!   `Validation`).
//!
//! # Invariants
//! - Services never bypass repository validation/persistence contracts.
//! - Services stay storage-agnostic; they only see repository traits.

use crate::model::ValidationError;
use crate::repo::{RepoError, RepoResult};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod todo_item_service;
pub mod todo_list_service;
pub mod user_service;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Error returned by every service operation.
#[derive(Debug)]
pub enum ServiceError {
    /// Input failed a field rule; nothing was written.
    Validation(ValidationError),
    /// The addressed record (or a referenced parent) does not exist.
    NotFound(String),
    /// A unique field already holds the requested value.
    Conflict(String),
    /// Storage failure.
    Repo(RepoError),
}

impl ServiceError {
    pub(crate) fn not_found(detail: impl Into<String>) -> Self {
        Self::NotFound(detail.into())
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(detail) | Self::Conflict(detail) => f.write_str(detail),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            RepoError::Conflict(detail) => Self::Conflict(detail),
            RepoError::NotFound { entity, id } => Self::NotFound(format!("{entity} not found: {id}")),
            RepoError::MissingReference { entity, id } => {
                Self::NotFound(format!("referenced {entity} does not exist: {id}"))
            }
            other => Self::Repo(other),
        }
    }
}

/// Replaces the detail of a repository `NotFound` with `detail`.
pub(crate) fn not_found_as<T>(result: RepoResult<T>, detail: &str) -> ServiceResult<T> {
    result.map_err(|err| match err {
        RepoError::NotFound { .. } => ServiceError::not_found(detail),
        other => other.into(),
    })
}
