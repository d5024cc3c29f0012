//! Service error types.

use common::EntityId;
use domain::{OrderError, Role, UserError};
use repositories::RepositoryError;
use thiserror::Error;

/// Why an actor was turned away by the authorization predicate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnauthorizedReason {
    #[error("actor not found")]
    ActorNotFound,

    #[error("requires role {required}, actor is {actual}")]
    WrongRole { required: Role, actual: Role },

    #[error("actor is inactive")]
    Inactive,
}

/// Errors returned by every use-case.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The actor may not perform the action.
    #[error("Unauthorized to {action}: {reason}")]
    Unauthorized {
        action: &'static str,
        reason: UnauthorizedReason,
    },

    /// The targeted entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: EntityId },

    /// An order lifecycle rule rejected the request.
    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    /// A user management rule rejected the request.
    #[error("User error: {0}")]
    User(#[from] UserError),

    /// The persistence port failed.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Coarse classification of a [`ServiceError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Unauthorized,
    NotFound,
    InvalidStateTransition,
    MissingRequiredInput,
    Conflict,
    Persistence,
}

impl ServiceError {
    pub(crate) fn not_found(entity: &'static str, id: &EntityId) -> Self {
        ServiceError::NotFound {
            entity,
            id: id.clone(),
        }
    }

    /// Returns the category this error falls into.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::Unauthorized { .. } => ErrorKind::Unauthorized,
            ServiceError::NotFound { .. } => ErrorKind::NotFound,
            ServiceError::Order(err) => match err {
                OrderError::InvalidStateTransition { .. } => ErrorKind::InvalidStateTransition,
                OrderError::NotAssignedDeliveryman { .. } => ErrorKind::Unauthorized,
                OrderError::DeliveryPhotoRequired => ErrorKind::MissingRequiredInput,
            },
            ServiceError::User(UserError::CpfAlreadyInUse { .. }) => ErrorKind::Conflict,
            ServiceError::Repository(err) => match err {
                RepositoryError::Conflict { .. } | RepositoryError::Duplicate { .. } => {
                    ErrorKind::Conflict
                }
                RepositoryError::NotFound { .. } => ErrorKind::NotFound,
                RepositoryError::Backend(_) => ErrorKind::Persistence,
            },
        }
    }
}

/// Convenience type alias for service results.
pub type Result<T> = std::result::Result<T, ServiceError>;
