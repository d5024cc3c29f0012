//! Use-case services for the delivery back office.
//!
//! Each service owns the repository ports it needs and authorizes the acting
//! user before doing anything else. Services never share state with each
//! other; they only meet in the repositories.

pub mod authorization;
pub mod config;
pub mod deliverymen;
pub mod error;
pub mod notifications;
pub mod orders;
pub mod recipients;
pub mod requests;
pub mod telemetry;

pub use authorization::{Requirement, authorize};
pub use config::{Config, LogFormat};
pub use deliverymen::DeliverymanService;
pub use error::{ErrorKind, Result, ServiceError, UnauthorizedReason};
pub use notifications::NotificationService;
pub use orders::OrderService;
pub use recipients::RecipientService;
pub use requests::*;
pub use telemetry::init_tracing;
