//! Users: admins and deliverymen.

mod entity;
mod role;

pub use entity::{Password, User};
pub use role::{Role, UserStatus};

use thiserror::Error;

/// Errors raised by user management rules.
#[derive(Debug, Error)]
pub enum UserError {
    /// Another user already holds this cpf.
    #[error("CPF already in use: {cpf}")]
    CpfAlreadyInUse { cpf: String },
}
