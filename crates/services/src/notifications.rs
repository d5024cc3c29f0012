//! Recipient notification use-case.

use domain::{Notification, NotificationChannel};
use repositories::{NotificationsRepository, OrdersRepository};

use crate::error::{Result, ServiceError};
use crate::requests::NotifyRecipient;

/// Records status-change notifications for order recipients.
///
/// Callers decide when to notify; transitions never do it on their own.
/// A notification is written once and never retried.
pub struct NotificationService<O, N>
where
    O: OrdersRepository,
    N: NotificationsRepository,
{
    orders: O,
    notifications: N,
    channel: NotificationChannel,
}

impl<O, N> NotificationService<O, N>
where
    O: OrdersRepository,
    N: NotificationsRepository,
{
    /// Creates a service sending through the default channel (email).
    pub fn new(orders: O, notifications: N) -> Self {
        Self {
            orders,
            notifications,
            channel: NotificationChannel::default(),
        }
    }

    /// Sends through `channel` instead of the default.
    pub fn with_channel(mut self, channel: NotificationChannel) -> Self {
        self.channel = channel;
        self
    }

    #[tracing::instrument(skip(self), fields(channel = %self.channel))]
    pub async fn notify_recipient(&self, request: NotifyRecipient) -> Result<Notification> {
        let order = self
            .orders
            .find_by_id(&request.order_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("order", &request.order_id))?;

        let notification =
            Notification::status_changed(order.id().clone(), request.status, self.channel);
        self.notifications.create(notification.clone()).await?;

        metrics::counter!("notifications_created_total").increment(1);
        tracing::info!(notification_id = %notification.id(), "recipient notified");
        Ok(notification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::EntityId;
    use domain::{Address, Order, OrderStatus};
    use repositories::{InMemoryNotificationsRepository, InMemoryOrdersRepository};

    #[tokio::test]
    async fn test_notify_recipient_records_notification() {
        let orders = InMemoryOrdersRepository::new();
        let notifications = InMemoryNotificationsRepository::new();
        let address = Address::new("Rua das Flores", "123", "Centro", "Sao Paulo", "SP", "01000-000");
        orders
            .create(Order::new(EntityId::from("recipient-1"), address).with_id("order-1"))
            .await
            .unwrap();
        let service = NotificationService::new(orders, notifications.clone())
            .with_channel(NotificationChannel::Sms);

        let notification = service
            .notify_recipient(NotifyRecipient::new("order-1", OrderStatus::PickedUp))
            .await
            .unwrap();

        assert_eq!(notification.channel(), NotificationChannel::Sms);
        assert_eq!(notification.message(), "Order status updated to picked_up");
        let stored = notifications
            .find_by_order_id(&EntityId::from("order-1"))
            .await
            .unwrap();
        assert_eq!(stored, vec![notification]);
    }

    #[tokio::test]
    async fn test_notify_recipient_for_missing_order() {
        let notifications = InMemoryNotificationsRepository::new();
        let service =
            NotificationService::new(InMemoryOrdersRepository::new(), notifications.clone());

        let err = service
            .notify_recipient(NotifyRecipient::new("order-404", OrderStatus::Delivered))
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::NotFound { entity: "order", .. }));
        assert_eq!(notifications.notification_count().await, 0);
    }
}
