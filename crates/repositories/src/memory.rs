use std::sync::Arc;

use async_trait::async_trait;
use common::EntityId;
use domain::{Notification, Order, Recipient, Role, User, UserStatus};
use tokio::sync::RwLock;

use crate::{
    NotificationsRepository, OrdersRepository, RecipientsRepository, RepositoryError, Result,
    UsersRepository,
};

/// Entities stored by the in-memory adapters.
trait Stored: Clone + Send + Sync {
    const ENTITY: &'static str;

    fn key(&self) -> &EntityId;
}

impl Stored for User {
    const ENTITY: &'static str = "user";

    fn key(&self) -> &EntityId {
        self.id()
    }
}

impl Stored for Order {
    const ENTITY: &'static str = "order";

    fn key(&self) -> &EntityId {
        self.id()
    }
}

impl Stored for Recipient {
    const ENTITY: &'static str = "recipient";

    fn key(&self) -> &EntityId {
        self.id()
    }
}

impl Stored for Notification {
    const ENTITY: &'static str = "notification";

    fn key(&self) -> &EntityId {
        self.id()
    }
}

/// Insertion-ordered table shared by clones of an adapter.
#[derive(Clone)]
struct Table<T> {
    rows: Arc<RwLock<Vec<T>>>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl<T: Stored> Table<T> {
    async fn insert(&self, row: T) -> Result<()> {
        let mut rows = self.rows.write().await;
        if rows.iter().any(|r| r.key() == row.key()) {
            return Err(RepositoryError::Conflict {
                entity: T::ENTITY,
                id: row.key().clone(),
            });
        }
        rows.push(row);
        Ok(())
    }

    /// Inserts `row` unless its id, or the `field` read by `value_of`, is
    /// already taken. Checked under the same write lock as the insert.
    async fn insert_unique(
        &self,
        row: T,
        field: &'static str,
        value_of: fn(&T) -> &str,
    ) -> Result<()> {
        let mut rows = self.rows.write().await;
        if rows.iter().any(|r| r.key() == row.key()) {
            return Err(RepositoryError::Conflict {
                entity: T::ENTITY,
                id: row.key().clone(),
            });
        }
        if rows.iter().any(|r| value_of(r) == value_of(&row)) {
            return Err(RepositoryError::Duplicate {
                entity: T::ENTITY,
                field,
                value: value_of(&row).to_string(),
            });
        }
        rows.push(row);
        Ok(())
    }

    async fn get(&self, id: &EntityId) -> Option<T> {
        self.rows.read().await.iter().find(|r| r.key() == id).cloned()
    }

    async fn replace(&self, row: T) -> Result<T> {
        let mut rows = self.rows.write().await;
        let slot = rows
            .iter_mut()
            .find(|r| r.key() == row.key())
            .ok_or_else(|| RepositoryError::NotFound {
                entity: T::ENTITY,
                id: row.key().clone(),
            })?;
        *slot = row.clone();
        Ok(row)
    }

    async fn update<F>(&self, id: &EntityId, f: F) -> Result<T>
    where
        F: FnOnce(&mut T),
    {
        let mut rows = self.rows.write().await;
        let slot = rows
            .iter_mut()
            .find(|r| r.key() == id)
            .ok_or_else(|| RepositoryError::NotFound {
                entity: T::ENTITY,
                id: id.clone(),
            })?;
        f(slot);
        Ok(slot.clone())
    }

    async fn remove(&self, id: &EntityId) -> Result<()> {
        let mut rows = self.rows.write().await;
        let index = rows
            .iter()
            .position(|r| r.key() == id)
            .ok_or_else(|| RepositoryError::NotFound {
                entity: T::ENTITY,
                id: id.clone(),
            })?;
        rows.remove(index);
        Ok(())
    }

    async fn filter<P>(&self, predicate: P) -> Vec<T>
    where
        P: Fn(&T) -> bool,
    {
        self.rows
            .read()
            .await
            .iter()
            .filter(|r| predicate(*r))
            .cloned()
            .collect()
    }

    async fn len(&self) -> usize {
        self.rows.read().await.len()
    }
}

/// In-memory users repository for testing.
#[derive(Clone, Default)]
pub struct InMemoryUsersRepository {
    users: Table<User>,
}

impl InMemoryUsersRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored users.
    pub async fn user_count(&self) -> usize {
        self.users.len().await
    }
}

#[async_trait]
impl UsersRepository for InMemoryUsersRepository {
    async fn find_by_cpf(&self, cpf: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .filter(|u| u.cpf() == cpf)
            .await
            .into_iter()
            .next())
    }

    async fn find_by_id(&self, id: &EntityId) -> Result<Option<User>> {
        Ok(self.users.get(id).await)
    }

    async fn create(&self, user: User) -> Result<()> {
        self.users.insert_unique(user, "cpf", User::cpf).await
    }

    async fn save(&self, user: User) -> Result<User> {
        self.users.replace(user).await
    }

    async fn patch(&self, id: &EntityId, status: UserStatus) -> Result<User> {
        self.users.update(id, |u| u.set_status(status)).await
    }

    async fn find_all_deliverymen(&self) -> Result<Vec<User>> {
        Ok(self.users.filter(|u| u.has_role(Role::Deliveryman)).await)
    }
}

/// In-memory orders repository for testing.
#[derive(Clone, Default)]
pub struct InMemoryOrdersRepository {
    orders: Table<Order>,
}

impl InMemoryOrdersRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored orders.
    pub async fn order_count(&self) -> usize {
        self.orders.len().await
    }
}

#[async_trait]
impl OrdersRepository for InMemoryOrdersRepository {
    async fn create(&self, order: Order) -> Result<()> {
        self.orders.insert(order).await
    }

    async fn find_by_id(&self, id: &EntityId) -> Result<Option<Order>> {
        Ok(self.orders.get(id).await)
    }

    async fn save(&self, order: Order) -> Result<Order> {
        self.orders.replace(order).await
    }

    async fn delete(&self, id: &EntityId) -> Result<()> {
        self.orders.remove(id).await
    }

    async fn find_all(&self) -> Result<Vec<Order>> {
        Ok(self.orders.filter(|_| true).await)
    }

    async fn find_nearby(&self, neighborhood: &str) -> Result<Vec<Order>> {
        Ok(self
            .orders
            .filter(|o| o.address().neighborhood == neighborhood)
            .await)
    }

    async fn find_by_deliveryman_id(&self, deliveryman_id: &EntityId) -> Result<Vec<Order>> {
        Ok(self
            .orders
            .filter(|o| o.is_assigned_to(deliveryman_id))
            .await)
    }
}

/// In-memory recipients repository for testing.
#[derive(Clone, Default)]
pub struct InMemoryRecipientsRepository {
    recipients: Table<Recipient>,
}

impl InMemoryRecipientsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored recipients.
    pub async fn recipient_count(&self) -> usize {
        self.recipients.len().await
    }
}

#[async_trait]
impl RecipientsRepository for InMemoryRecipientsRepository {
    async fn create(&self, recipient: Recipient) -> Result<()> {
        self.recipients.insert(recipient).await
    }

    async fn find_by_id(&self, id: &EntityId) -> Result<Option<Recipient>> {
        Ok(self.recipients.get(id).await)
    }

    async fn save(&self, recipient: Recipient) -> Result<Recipient> {
        self.recipients.replace(recipient).await
    }

    async fn delete(&self, id: &EntityId) -> Result<()> {
        self.recipients.remove(id).await
    }

    async fn find_all(&self) -> Result<Vec<Recipient>> {
        Ok(self.recipients.filter(|_| true).await)
    }
}

/// In-memory notifications repository for testing.
#[derive(Clone, Default)]
pub struct InMemoryNotificationsRepository {
    notifications: Table<Notification>,
}

impl InMemoryNotificationsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored notifications.
    pub async fn notification_count(&self) -> usize {
        self.notifications.len().await
    }
}

#[async_trait]
impl NotificationsRepository for InMemoryNotificationsRepository {
    async fn create(&self, notification: Notification) -> Result<()> {
        self.notifications.insert(notification).await
    }

    async fn find_by_order_id(&self, order_id: &EntityId) -> Result<Vec<Notification>> {
        Ok(self
            .notifications
            .filter(|n| n.order_id() == order_id)
            .await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{Address, NotificationChannel, OrderStatus};

    fn address(neighborhood: &str) -> Address {
        Address::new("Rua das Flores", "123", neighborhood, "Sao Paulo", "SP", "01000-000")
    }

    fn order(id: &str, neighborhood: &str) -> Order {
        Order::new(EntityId::from("recipient-1"), address(neighborhood)).with_id(id)
    }

    #[tokio::test]
    async fn test_create_and_find_order() {
        let repo = InMemoryOrdersRepository::new();
        let order = order("order-1", "Centro");

        repo.create(order.clone()).await.unwrap();

        let found = repo.find_by_id(order.id()).await.unwrap();
        assert_eq!(found, Some(order));
        assert!(repo.find_by_id(&EntityId::from("missing")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_duplicate_id_conflicts() {
        let repo = InMemoryOrdersRepository::new();
        repo.create(order("order-1", "Centro")).await.unwrap();

        let result = repo.create(order("order-1", "Centro")).await;
        assert!(matches!(
            result,
            Err(RepositoryError::Conflict { entity: "order", .. })
        ));
        assert_eq!(repo.order_count().await, 1);
    }

    #[tokio::test]
    async fn test_save_replaces_and_missing_fails() {
        let repo = InMemoryOrdersRepository::new();
        let mut stored = order("order-1", "Centro");
        repo.create(stored.clone()).await.unwrap();

        stored.pick_up(&EntityId::from("deliveryman-1")).unwrap();
        repo.save(stored.clone()).await.unwrap();

        let found = repo.find_by_id(stored.id()).await.unwrap().unwrap();
        assert_eq!(found.status(), OrderStatus::PickedUp);

        let result = repo.save(order("order-2", "Centro")).await;
        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_order() {
        let repo = InMemoryOrdersRepository::new();
        repo.create(order("order-1", "Centro")).await.unwrap();

        repo.delete(&EntityId::from("order-1")).await.unwrap();
        assert_eq!(repo.order_count().await, 0);

        let result = repo.delete(&EntityId::from("order-1")).await;
        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_find_nearby_and_by_deliveryman() {
        let repo = InMemoryOrdersRepository::new();
        let mut picked = order("order-1", "Centro");
        picked.pick_up(&EntityId::from("deliveryman-1")).unwrap();
        repo.create(picked).await.unwrap();
        repo.create(order("order-2", "Centro")).await.unwrap();
        repo.create(order("order-3", "Jardins")).await.unwrap();

        let nearby = repo.find_nearby("Centro").await.unwrap();
        let ids: Vec<_> = nearby.iter().map(|o| o.id().as_str()).collect();
        assert_eq!(ids, vec!["order-1", "order-2"]);

        let assigned = repo
            .find_by_deliveryman_id(&EntityId::from("deliveryman-1"))
            .await
            .unwrap();
        assert_eq!(assigned.len(), 1);
        assert_eq!(assigned[0].id().as_str(), "order-1");
    }

    #[tokio::test]
    async fn test_users_patch_and_lookup() {
        let repo = InMemoryUsersRepository::new();
        let admin = User::new("Admin", "12345678901", "pw", Role::Admin).with_id("admin-1");
        let deliveryman =
            User::new("John", "98765432100", "pw", Role::Deliveryman).with_id("deliveryman-1");
        repo.create(admin).await.unwrap();
        repo.create(deliveryman).await.unwrap();

        let found = repo.find_by_cpf("98765432100").await.unwrap().unwrap();
        assert_eq!(found.id().as_str(), "deliveryman-1");

        let patched = repo
            .patch(&EntityId::from("deliveryman-1"), UserStatus::Inactive)
            .await
            .unwrap();
        assert_eq!(patched.status(), UserStatus::Inactive);

        let deliverymen = repo.find_all_deliverymen().await.unwrap();
        assert_eq!(deliverymen.len(), 1);
        assert_eq!(deliverymen[0].status(), UserStatus::Inactive);
    }

    #[tokio::test]
    async fn test_users_create_rejects_taken_cpf() {
        let repo = InMemoryUsersRepository::new();
        repo.create(User::new("John", "98765432100", "pw", Role::Deliveryman).with_id("deliveryman-1"))
            .await
            .unwrap();

        let result = repo
            .create(User::new("Jane", "98765432100", "pw", Role::Deliveryman).with_id("deliveryman-2"))
            .await;

        assert!(matches!(
            result,
            Err(RepositoryError::Duplicate { entity: "user", field: "cpf", ref value }) if value == "98765432100"
        ));
        assert_eq!(repo.user_count().await, 1);
    }

    #[tokio::test]
    async fn test_notifications_by_order() {
        let repo = InMemoryNotificationsRepository::new();
        for status in [OrderStatus::PickedUp, OrderStatus::Delivered] {
            repo.create(Notification::status_changed(
                EntityId::from("order-1"),
                status,
                NotificationChannel::Email,
            ))
            .await
            .unwrap();
        }
        repo.create(Notification::status_changed(
            EntityId::from("order-2"),
            OrderStatus::Returned,
            NotificationChannel::Email,
        ))
        .await
        .unwrap();

        let sent = repo
            .find_by_order_id(&EntityId::from("order-1"))
            .await
            .unwrap();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[1].message(), "Order status updated to delivered");
        assert_eq!(repo.notification_count().await, 3);
    }

    #[tokio::test]
    async fn test_clones_share_storage() {
        let repo = InMemoryRecipientsRepository::new();
        let clone = repo.clone();
        clone
            .create(
                Recipient::new("Maria", address("Centro"), "555", "maria@example.com")
                    .with_id("recipient-1"),
            )
            .await
            .unwrap();

        assert_eq!(repo.recipient_count().await, 1);
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
    }
}
