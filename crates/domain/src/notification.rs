//! Recipient notifications about order status changes.

use chrono::{DateTime, Utc};
use common::EntityId;
use serde::{Deserialize, Serialize};

use crate::order::OrderStatus;

/// How a notification reaches the recipient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NotificationChannel {
    #[default]
    Email,
    Sms,
    Push,
}

impl NotificationChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationChannel::Email => "email",
            NotificationChannel::Sms => "sms",
            NotificationChannel::Push => "push",
        }
    }
}

impl std::fmt::Display for NotificationChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when parsing an unknown notification channel.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown notification channel: {0}")]
pub struct ParseChannelError(pub String);

impl std::str::FromStr for NotificationChannel {
    type Err = ParseChannelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "email" => Ok(NotificationChannel::Email),
            "sms" => Ok(NotificationChannel::Sms),
            "push" => Ok(NotificationChannel::Push),
            _ => Err(ParseChannelError(s.to_string())),
        }
    }
}

/// A record that a recipient was told about an order status change.
///
/// Created once per status change and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    id: EntityId,
    order_id: EntityId,
    message: String,
    #[serde(rename = "type")]
    channel: NotificationChannel,
    created_at: DateTime<Utc>,
}

impl Notification {
    /// Builds the notification announcing that `order_id` moved to `status`.
    pub fn status_changed(
        order_id: EntityId,
        status: OrderStatus,
        channel: NotificationChannel,
    ) -> Self {
        Self {
            id: EntityId::new(),
            order_id,
            message: format!("Order status updated to {status}"),
            channel,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }

    pub fn order_id(&self) -> &EntityId {
        &self.order_id
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn channel(&self) -> NotificationChannel {
        self.channel
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_changed_message_template() {
        let notification = Notification::status_changed(
            EntityId::from("order-1"),
            OrderStatus::PickedUp,
            NotificationChannel::Email,
        );

        assert_eq!(notification.message(), "Order status updated to picked_up");
        assert_eq!(notification.order_id().as_str(), "order-1");
        assert_eq!(notification.channel(), NotificationChannel::Email);
    }

    #[test]
    fn test_channel_parse() {
        assert_eq!("email".parse::<NotificationChannel>(), Ok(NotificationChannel::Email));
        assert_eq!("SMS".parse::<NotificationChannel>(), Ok(NotificationChannel::Sms));
        assert!("pigeon".parse::<NotificationChannel>().is_err());
    }

    #[test]
    fn test_notification_serializes_channel_as_type() {
        let notification = Notification::status_changed(
            EntityId::from("order-1"),
            OrderStatus::Delivered,
            NotificationChannel::Sms,
        );

        let json = serde_json::to_value(&notification).unwrap();

        assert_eq!(json["type"], "sms");
        assert!(json.get("channel").is_none());
        let back: Notification = serde_json::from_value(json).unwrap();
        assert_eq!(back, notification);
    }

    #[test]
    fn test_channel_serializes_lowercase() {
        let json = serde_json::to_string(&NotificationChannel::Email).unwrap();
        assert_eq!(json, "\"email\"");
    }
}
