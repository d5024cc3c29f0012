//! The authorization predicate applied at the entry of every use-case.

use common::EntityId;
use domain::{Role, User};
use repositories::UsersRepository;

use crate::error::{Result, ServiceError, UnauthorizedReason};

/// What an actor must satisfy to perform an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// An active user with this role.
    Role(Role),

    /// Any active user. Entity-level rules are applied afterwards.
    AnyActive,
}

/// Checks a resolved actor against a requirement, handing it back if allowed.
///
/// Checks run in order: the actor exists, has the required role, is active.
pub fn check(
    actor: Option<User>,
    requirement: Requirement,
) -> std::result::Result<User, UnauthorizedReason> {
    let actor = actor.ok_or(UnauthorizedReason::ActorNotFound)?;

    if let Requirement::Role(required) = requirement
        && !actor.has_role(required)
    {
        return Err(UnauthorizedReason::WrongRole {
            required,
            actual: actor.role(),
        });
    }

    if !actor.is_active() {
        return Err(UnauthorizedReason::Inactive);
    }

    Ok(actor)
}

/// Resolves `actor_id` through the users port and checks it.
///
/// Returns the actor on success. The actor is looked up on every call.
pub async fn authorize<U>(
    users: &U,
    actor_id: &EntityId,
    requirement: Requirement,
    action: &'static str,
) -> Result<User>
where
    U: UsersRepository + ?Sized,
{
    let actor = users.find_by_id(actor_id).await?;

    check(actor, requirement).map_err(|reason| {
        metrics::counter!("authorization_denied_total").increment(1);
        tracing::warn!(%actor_id, action, %reason, "authorization denied");
        ServiceError::Unauthorized { action, reason }
    })
}
