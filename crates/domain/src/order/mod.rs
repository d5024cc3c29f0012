//! Orders and their delivery lifecycle.

mod attachment;
mod entity;
mod status;

pub use attachment::OrderAttachment;
pub use entity::Order;
pub use status::{OrderStatus, ParseOrderStatusError};

use thiserror::Error;

/// Errors that can occur during order lifecycle transitions.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Order is not in the expected status.
    #[error("Invalid state transition: cannot {action} from {current_state} state")]
    InvalidStateTransition {
        current_state: OrderStatus,
        action: &'static str,
    },

    /// The acting deliveryman is not the one holding the order.
    #[error("Only the assigned deliveryman can {action}")]
    NotAssignedDeliveryman { action: &'static str },

    /// Marking an order as delivered needs at least one photo.
    #[error("At least one delivery photo is required")]
    DeliveryPhotoRequired,
}
