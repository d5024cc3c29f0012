//! Order status state machine.

use serde::{Deserialize, Serialize};

/// The lifecycle stage of a delivery.
///
/// State transitions:
/// ```text
/// Pending ──► PickedUp ──► Delivered
///    ▲            │
///    │            └──────► Returned   (also reachable from any state)
///    └── admin reset (from any state)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Waiting for a deliveryman to pick it up.
    #[default]
    Pending,

    /// Picked up by a deliveryman, on its way.
    PickedUp,

    /// Handed over to the recipient, with proof-of-delivery photos.
    Delivered,

    /// Sent back instead of delivered.
    Returned,
}

impl OrderStatus {
    /// Returns true if a deliveryman can pick up the order in this status.
    pub fn can_pick_up(&self) -> bool {
        matches!(self, OrderStatus::Pending)
    }

    /// Returns true if the order can be marked as delivered in this status.
    pub fn can_mark_delivered(&self) -> bool {
        matches!(self, OrderStatus::PickedUp)
    }

    /// Returns true if the order can be marked as returned in this status.
    pub fn can_mark_returned(&self) -> bool {
        true
    }

    /// Returns true if an admin can reset the order to pending from this status.
    pub fn can_reset(&self) -> bool {
        true
    }

    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::PickedUp => "picked_up",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Returned => "returned",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when parsing an unknown order status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown order status: {0}")]
pub struct ParseOrderStatusError(pub String);

impl std::str::FromStr for OrderStatus {
    type Err = ParseOrderStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "picked_up" => Ok(OrderStatus::PickedUp),
            "delivered" => Ok(OrderStatus::Delivered),
            "returned" => Ok(OrderStatus::Returned),
            other => Err(ParseOrderStatusError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_status_is_pending() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
    }

    #[test]
    fn test_only_pending_can_be_picked_up() {
        assert!(OrderStatus::Pending.can_pick_up());
        assert!(!OrderStatus::PickedUp.can_pick_up());
        assert!(!OrderStatus::Delivered.can_pick_up());
        assert!(!OrderStatus::Returned.can_pick_up());
    }

    #[test]
    fn test_only_picked_up_can_be_delivered() {
        assert!(!OrderStatus::Pending.can_mark_delivered());
        assert!(OrderStatus::PickedUp.can_mark_delivered());
        assert!(!OrderStatus::Delivered.can_mark_delivered());
        assert!(!OrderStatus::Returned.can_mark_delivered());
    }

    #[test]
    fn test_return_and_reset_allowed_from_every_status() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::PickedUp,
            OrderStatus::Delivered,
            OrderStatus::Returned,
        ] {
            assert!(status.can_mark_returned());
            assert!(status.can_reset());
        }
    }

    #[test]
    fn test_display_and_parse() {
        assert_eq!(OrderStatus::PickedUp.to_string(), "picked_up");
        assert_eq!("delivered".parse::<OrderStatus>(), Ok(OrderStatus::Delivered));
        assert_eq!(
            "lost".parse::<OrderStatus>(),
            Err(ParseOrderStatusError("lost".to_string()))
        );
    }

    #[test]
    fn test_serialization_uses_snake_case() {
        let json = serde_json::to_string(&OrderStatus::PickedUp).unwrap();
        assert_eq!(json, "\"picked_up\"");
        let deserialized: OrderStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, OrderStatus::PickedUp);
    }
}
