//! Order use-cases: CRUD, listings, and lifecycle transitions.

use common::EntityId;
use domain::{Order, OrderStatus, Role};
use repositories::{OrdersRepository, UsersRepository};

use crate::authorization::{Requirement, authorize};
use crate::error::{Result, ServiceError};
use crate::requests::{
    CreateOrder, DeleteOrder, GetOrder, ListDeliveries, ListNearbyOrders, ListOrders,
    MarkOrderAsDelivered, MarkOrderAsPending, MarkOrderAsReturned, PickUpOrder, UpdateOrder,
};

/// Service for managing orders.
///
/// Every method authorizes its actor first, then loads the order, applies the
/// lifecycle rule, saves and returns the order. The order is loaded fresh on
/// every call; nothing is cached between requests.
pub struct OrderService<O, U>
where
    O: OrdersRepository,
    U: UsersRepository,
{
    orders: O,
    users: U,
}

impl<O, U> OrderService<O, U>
where
    O: OrdersRepository,
    U: UsersRepository,
{
    /// Creates a new order service over the given ports.
    pub fn new(orders: O, users: U) -> Self {
        Self { orders, users }
    }

    /// Creates a pending, unassigned order.
    #[tracing::instrument(skip(self))]
    pub async fn create_order(&self, request: CreateOrder) -> Result<Order> {
        authorize(
            &self.users,
            &request.admin_id,
            Requirement::Role(Role::Admin),
            "create orders",
        )
        .await?;

        let order = Order::new(request.recipient_id, request.address);
        self.orders.create(order.clone()).await?;

        metrics::counter!("orders_created_total").increment(1);
        tracing::info!(order_id = %order.id(), "order created");
        Ok(order)
    }

    /// Changes the recipient and/or address of an order.
    #[tracing::instrument(skip(self))]
    pub async fn update_order(&self, request: UpdateOrder) -> Result<Order> {
        authorize(
            &self.users,
            &request.admin_id,
            Requirement::Role(Role::Admin),
            "update orders",
        )
        .await?;

        let mut order = self.load(&request.order_id).await?;
        if let Some(recipient_id) = request.recipient_id {
            order.set_recipient_id(recipient_id);
        }
        order.update_address(request.address);

        Ok(self.orders.save(order).await?)
    }

    /// Deletes an order.
    #[tracing::instrument(skip(self))]
    pub async fn delete_order(&self, request: DeleteOrder) -> Result<()> {
        authorize(
            &self.users,
            &request.admin_id,
            Requirement::Role(Role::Admin),
            "delete orders",
        )
        .await?;

        let order = self.load(&request.order_id).await?;
        self.orders.delete(order.id()).await?;

        tracing::info!(order_id = %order.id(), "order deleted");
        Ok(())
    }

    /// Lists every order, whatever its status.
    #[tracing::instrument(skip(self))]
    pub async fn list_orders(&self, request: ListOrders) -> Result<Vec<Order>> {
        authorize(
            &self.users,
            &request.admin_id,
            Requirement::Role(Role::Admin),
            "list orders",
        )
        .await?;

        Ok(self.orders.find_all().await?)
    }

    /// Lists the orders addressed to a neighborhood.
    #[tracing::instrument(skip(self))]
    pub async fn list_nearby_orders(&self, request: ListNearbyOrders) -> Result<Vec<Order>> {
        authorize(
            &self.users,
            &request.deliveryman_id,
            Requirement::Role(Role::Deliveryman),
            "list nearby orders",
        )
        .await?;

        Ok(self.orders.find_nearby(&request.neighborhood).await?)
    }

    /// Lists the orders assigned to the acting deliveryman.
    #[tracing::instrument(skip(self))]
    pub async fn list_deliveries(&self, request: ListDeliveries) -> Result<Vec<Order>> {
        authorize(
            &self.users,
            &request.deliveryman_id,
            Requirement::Role(Role::Deliveryman),
            "list deliveries",
        )
        .await?;

        Ok(self
            .orders
            .find_by_deliveryman_id(&request.deliveryman_id)
            .await?)
    }

    /// Loads a single order for any active user.
    #[tracing::instrument(skip(self))]
    pub async fn get_order(&self, request: GetOrder) -> Result<Order> {
        authorize(
            &self.users,
            &request.user_id,
            Requirement::AnyActive,
            "read orders",
        )
        .await?;

        self.load(&request.order_id).await
    }

    /// Assigns a pending order to the acting deliveryman.
    #[tracing::instrument(skip(self))]
    pub async fn pick_up(&self, request: PickUpOrder) -> Result<Order> {
        authorize(
            &self.users,
            &request.deliveryman_id,
            Requirement::Role(Role::Deliveryman),
            "pick up orders",
        )
        .await?;

        let mut order = self.load(&request.order_id).await?;
        order.pick_up(&request.deliveryman_id)?;

        self.persist_transition(order).await
    }

    /// Confirms delivery by the assigned deliveryman, attaching the photos.
    ///
    /// Checks run in order: active deliveryman, order exists, order assigned to
    /// the actor, order picked up, at least one photo.
    #[tracing::instrument(skip(self))]
    pub async fn mark_delivered(&self, request: MarkOrderAsDelivered) -> Result<Order> {
        authorize(
            &self.users,
            &request.deliveryman_id,
            Requirement::Role(Role::Deliveryman),
            "mark orders as delivered",
        )
        .await?;

        let mut order = self.load(&request.order_id).await?;
        let attachments = order
            .mark_delivered(&request.deliveryman_id, &request.photo_ids)?
            .len();
        tracing::debug!(attachments, "delivery photos attached");

        self.persist_transition(order).await
    }

    /// Marks an order as returned. Admins may return any order, a deliveryman
    /// only the one assigned to them.
    #[tracing::instrument(skip(self))]
    pub async fn mark_returned(&self, request: MarkOrderAsReturned) -> Result<Order> {
        let actor = authorize(
            &self.users,
            &request.user_id,
            Requirement::AnyActive,
            "mark orders as returned",
        )
        .await?;

        let mut order = self.load(&request.order_id).await?;
        order.mark_returned(&actor)?;

        self.persist_transition(order).await
    }

    /// Puts an order back to pending (admin override).
    #[tracing::instrument(skip(self))]
    pub async fn mark_pending(&self, request: MarkOrderAsPending) -> Result<Order> {
        authorize(
            &self.users,
            &request.admin_id,
            Requirement::Role(Role::Admin),
            "mark orders as pending",
        )
        .await?;

        let mut order = self.load(&request.order_id).await?;
        order.reset_to_pending()?;

        self.persist_transition(order).await
    }

    async fn load(&self, order_id: &EntityId) -> Result<Order> {
        self.orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("order", order_id))
    }

    async fn persist_transition(&self, order: Order) -> Result<Order> {
        let order = self.orders.save(order).await?;
        let status: OrderStatus = order.status();

        metrics::counter!("order_transitions_total", "to" => status.as_str()).increment(1);
        tracing::info!(order_id = %order.id(), %status, "order status changed");
        Ok(order)
    }
}
