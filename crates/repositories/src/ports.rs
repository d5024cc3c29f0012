use async_trait::async_trait;
use common::EntityId;
use domain::{Notification, Order, Recipient, User, UserStatus};

use crate::Result;

/// Persistence contract for back-office users.
///
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait UsersRepository: Send + Sync {
    /// Finds a user by cpf. Returns None if nobody holds it.
    async fn find_by_cpf(&self, cpf: &str) -> Result<Option<User>>;

    /// Finds a user by id. Returns None if the user doesn't exist.
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<User>>;

    /// Stores a new user.
    ///
    /// Fails with `Conflict` if a user with the same id already exists, and
    /// with `Duplicate { field: "cpf", .. }` if another user holds the cpf.
    /// Both checks and the insert happen as one step.
    async fn create(&self, user: User) -> Result<()>;

    /// Replaces a stored user with `user` (last writer wins).
    async fn save(&self, user: User) -> Result<User>;

    /// Changes only the status of a stored user and returns it.
    async fn patch(&self, id: &EntityId, status: UserStatus) -> Result<User>;

    /// Returns every user with the deliveryman role, whatever their status.
    async fn find_all_deliverymen(&self) -> Result<Vec<User>>;
}

/// Persistence contract for orders.
#[async_trait]
pub trait OrdersRepository: Send + Sync {
    /// Stores a new order.
    async fn create(&self, order: Order) -> Result<()>;

    /// Finds an order by id. Returns None if the order doesn't exist.
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<Order>>;

    /// Replaces a stored order with `order` (last writer wins).
    async fn save(&self, order: Order) -> Result<Order>;

    /// Removes an order.
    async fn delete(&self, id: &EntityId) -> Result<()>;

    /// Returns every order.
    async fn find_all(&self) -> Result<Vec<Order>>;

    /// Returns the orders whose delivery address is in `neighborhood`.
    async fn find_nearby(&self, neighborhood: &str) -> Result<Vec<Order>>;

    /// Returns the orders assigned to a deliveryman.
    async fn find_by_deliveryman_id(&self, deliveryman_id: &EntityId) -> Result<Vec<Order>>;
}

/// Persistence contract for recipients.
#[async_trait]
pub trait RecipientsRepository: Send + Sync {
    async fn create(&self, recipient: Recipient) -> Result<()>;

    async fn find_by_id(&self, id: &EntityId) -> Result<Option<Recipient>>;

    async fn save(&self, recipient: Recipient) -> Result<Recipient>;

    async fn delete(&self, id: &EntityId) -> Result<()>;

    async fn find_all(&self) -> Result<Vec<Recipient>>;
}

/// Persistence contract for notifications.
///
/// Notifications are append-only records.
#[async_trait]
pub trait NotificationsRepository: Send + Sync {
    async fn create(&self, notification: Notification) -> Result<()>;

    /// Returns the notifications sent about an order, oldest first.
    async fn find_by_order_id(&self, order_id: &EntityId) -> Result<Vec<Notification>>;
}
