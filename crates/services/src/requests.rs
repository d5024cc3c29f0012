//! Request records, one per use-case.
//!
//! Every request names its actor (`admin_id`, `deliveryman_id` or `user_id`),
//! which the service authorizes before touching anything else. Optional
//! fields in update requests mean "leave as is".

use common::EntityId;
use domain::{Address, AddressPatch, Coordinates, OrderStatus};

/// Request to create a pending order for a recipient.
#[derive(Debug, Clone)]
pub struct CreateOrder {
    pub admin_id: EntityId,
    pub recipient_id: EntityId,
    pub address: Address,
}

impl CreateOrder {
    pub fn new(admin_id: impl Into<EntityId>, recipient_id: impl Into<EntityId>, address: Address) -> Self {
        Self {
            admin_id: admin_id.into(),
            recipient_id: recipient_id.into(),
            address,
        }
    }
}

/// Request to change an order's recipient or address.
#[derive(Debug, Clone)]
pub struct UpdateOrder {
    pub admin_id: EntityId,
    pub order_id: EntityId,
    pub recipient_id: Option<EntityId>,
    pub address: AddressPatch,
}

impl UpdateOrder {
    pub fn new(admin_id: impl Into<EntityId>, order_id: impl Into<EntityId>) -> Self {
        Self {
            admin_id: admin_id.into(),
            order_id: order_id.into(),
            recipient_id: None,
            address: AddressPatch::default(),
        }
    }

    pub fn with_recipient(mut self, recipient_id: impl Into<EntityId>) -> Self {
        self.recipient_id = Some(recipient_id.into());
        self
    }

    pub fn with_address(mut self, address: AddressPatch) -> Self {
        self.address = address;
        self
    }
}

/// Request to delete an order.
#[derive(Debug, Clone)]
pub struct DeleteOrder {
    pub admin_id: EntityId,
    pub order_id: EntityId,
}

impl DeleteOrder {
    pub fn new(admin_id: impl Into<EntityId>, order_id: impl Into<EntityId>) -> Self {
        Self {
            admin_id: admin_id.into(),
            order_id: order_id.into(),
        }
    }
}

/// Request to list every order.
#[derive(Debug, Clone)]
pub struct ListOrders {
    pub admin_id: EntityId,
}

impl ListOrders {
    pub fn new(admin_id: impl Into<EntityId>) -> Self {
        Self {
            admin_id: admin_id.into(),
        }
    }
}

/// Request to list the orders addressed to a neighborhood.
#[derive(Debug, Clone)]
pub struct ListNearbyOrders {
    pub deliveryman_id: EntityId,
    pub neighborhood: String,
}

impl ListNearbyOrders {
    pub fn new(deliveryman_id: impl Into<EntityId>, neighborhood: impl Into<String>) -> Self {
        Self {
            deliveryman_id: deliveryman_id.into(),
            neighborhood: neighborhood.into(),
        }
    }
}

/// Request to list the orders assigned to the acting deliveryman.
#[derive(Debug, Clone)]
pub struct ListDeliveries {
    pub deliveryman_id: EntityId,
}

impl ListDeliveries {
    pub fn new(deliveryman_id: impl Into<EntityId>) -> Self {
        Self {
            deliveryman_id: deliveryman_id.into(),
        }
    }
}

/// Request to read a single order.
#[derive(Debug, Clone)]
pub struct GetOrder {
    pub user_id: EntityId,
    pub order_id: EntityId,
}

impl GetOrder {
    pub fn new(user_id: impl Into<EntityId>, order_id: impl Into<EntityId>) -> Self {
        Self {
            user_id: user_id.into(),
            order_id: order_id.into(),
        }
    }
}

/// Request for a deliveryman to pick up a pending order.
#[derive(Debug, Clone)]
pub struct PickUpOrder {
    pub deliveryman_id: EntityId,
    pub order_id: EntityId,
}

impl PickUpOrder {
    pub fn new(deliveryman_id: impl Into<EntityId>, order_id: impl Into<EntityId>) -> Self {
        Self {
            deliveryman_id: deliveryman_id.into(),
            order_id: order_id.into(),
        }
    }
}

/// Request for the assigned deliveryman to confirm delivery with photos.
#[derive(Debug, Clone)]
pub struct MarkOrderAsDelivered {
    pub deliveryman_id: EntityId,
    pub order_id: EntityId,

    /// Ids of the uploaded proof-of-delivery photos.
    pub photo_ids: Vec<EntityId>,
}

impl MarkOrderAsDelivered {
    pub fn new<I, P>(deliveryman_id: impl Into<EntityId>, order_id: impl Into<EntityId>, photo_ids: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<EntityId>,
    {
        Self {
            deliveryman_id: deliveryman_id.into(),
            order_id: order_id.into(),
            photo_ids: photo_ids.into_iter().map(Into::into).collect(),
        }
    }
}

/// Request to mark an order as returned, by an admin or the assigned deliveryman.
#[derive(Debug, Clone)]
pub struct MarkOrderAsReturned {
    pub user_id: EntityId,
    pub order_id: EntityId,
}

impl MarkOrderAsReturned {
    pub fn new(user_id: impl Into<EntityId>, order_id: impl Into<EntityId>) -> Self {
        Self {
            user_id: user_id.into(),
            order_id: order_id.into(),
        }
    }
}

/// Request for an admin to put an order back to pending.
#[derive(Debug, Clone)]
pub struct MarkOrderAsPending {
    pub admin_id: EntityId,
    pub order_id: EntityId,
}

impl MarkOrderAsPending {
    pub fn new(admin_id: impl Into<EntityId>, order_id: impl Into<EntityId>) -> Self {
        Self {
            admin_id: admin_id.into(),
            order_id: order_id.into(),
        }
    }
}

/// Request to tell an order's recipient about a status change.
#[derive(Debug, Clone)]
pub struct NotifyRecipient {
    pub order_id: EntityId,
    pub status: OrderStatus,
}

impl NotifyRecipient {
    pub fn new(order_id: impl Into<EntityId>, status: OrderStatus) -> Self {
        Self {
            order_id: order_id.into(),
            status,
        }
    }
}

/// Request to register a recipient.
#[derive(Debug, Clone)]
pub struct CreateRecipient {
    pub admin_id: EntityId,
    pub name: String,
    pub address: Address,
    pub phone: String,
    pub email: String,
    pub coordinates: Option<Coordinates>,
}

impl CreateRecipient {
    pub fn new(
        admin_id: impl Into<EntityId>,
        name: impl Into<String>,
        address: Address,
        phone: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            admin_id: admin_id.into(),
            name: name.into(),
            address,
            phone: phone.into(),
            email: email.into(),
            coordinates: None,
        }
    }

    pub fn with_coordinates(mut self, coordinates: Coordinates) -> Self {
        self.coordinates = Some(coordinates);
        self
    }
}

/// Request to change some of a recipient's fields.
#[derive(Debug, Clone, Default)]
pub struct UpdateRecipient {
    pub admin_id: EntityId,
    pub recipient_id: EntityId,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: AddressPatch,
    pub coordinates: Option<Coordinates>,
}

impl UpdateRecipient {
    pub fn new(admin_id: impl Into<EntityId>, recipient_id: impl Into<EntityId>) -> Self {
        Self {
            admin_id: admin_id.into(),
            recipient_id: recipient_id.into(),
            ..Default::default()
        }
    }
}

/// Request to delete a recipient.
#[derive(Debug, Clone)]
pub struct DeleteRecipient {
    pub admin_id: EntityId,
    pub recipient_id: EntityId,
}

impl DeleteRecipient {
    pub fn new(admin_id: impl Into<EntityId>, recipient_id: impl Into<EntityId>) -> Self {
        Self {
            admin_id: admin_id.into(),
            recipient_id: recipient_id.into(),
        }
    }
}

/// Request to list every recipient.
#[derive(Debug, Clone)]
pub struct ListRecipients {
    pub admin_id: EntityId,
}

impl ListRecipients {
    pub fn new(admin_id: impl Into<EntityId>) -> Self {
        Self {
            admin_id: admin_id.into(),
        }
    }
}

/// Request to register a deliveryman account.
#[derive(Clone)]
pub struct CreateDeliveryman {
    pub admin_id: EntityId,
    pub name: String,
    pub cpf: String,
    pub password: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl CreateDeliveryman {
    pub fn new(
        admin_id: impl Into<EntityId>,
        name: impl Into<String>,
        cpf: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            admin_id: admin_id.into(),
            name: name.into(),
            cpf: cpf.into(),
            password: password.into(),
            email: None,
            phone: None,
        }
    }

    pub fn with_contact(mut self, email: impl Into<String>, phone: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self.phone = Some(phone.into());
        self
    }
}

impl std::fmt::Debug for CreateDeliveryman {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateDeliveryman")
            .field("admin_id", &self.admin_id)
            .field("name", &self.name)
            .field("cpf", &self.cpf)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .finish_non_exhaustive()
    }
}

/// Request to change some of a deliveryman's fields.
#[derive(Debug, Clone, Default)]
pub struct UpdateDeliveryman {
    pub admin_id: EntityId,
    pub deliveryman_id: EntityId,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl UpdateDeliveryman {
    pub fn new(admin_id: impl Into<EntityId>, deliveryman_id: impl Into<EntityId>) -> Self {
        Self {
            admin_id: admin_id.into(),
            deliveryman_id: deliveryman_id.into(),
            ..Default::default()
        }
    }
}

/// Request to deactivate a deliveryman account.
#[derive(Debug, Clone)]
pub struct DeactivateDeliveryman {
    pub admin_id: EntityId,
    pub deliveryman_id: EntityId,
}

impl DeactivateDeliveryman {
    pub fn new(admin_id: impl Into<EntityId>, deliveryman_id: impl Into<EntityId>) -> Self {
        Self {
            admin_id: admin_id.into(),
            deliveryman_id: deliveryman_id.into(),
        }
    }
}

/// Request to list the active deliverymen.
#[derive(Debug, Clone)]
pub struct ListDeliverymen {
    pub admin_id: EntityId,
}

impl ListDeliverymen {
    pub fn new(admin_id: impl Into<EntityId>) -> Self {
        Self {
            admin_id: admin_id.into(),
        }
    }
}

/// Request for an admin to set a user's password.
#[derive(Clone)]
pub struct ChangeUserPassword {
    pub admin_id: EntityId,
    pub user_id: EntityId,
    pub new_password: String,
}

impl ChangeUserPassword {
    pub fn new(
        admin_id: impl Into<EntityId>,
        user_id: impl Into<EntityId>,
        new_password: impl Into<String>,
    ) -> Self {
        Self {
            admin_id: admin_id.into(),
            user_id: user_id.into(),
            new_password: new_password.into(),
        }
    }
}

impl std::fmt::Debug for ChangeUserPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeUserPassword")
            .field("admin_id", &self.admin_id)
            .field("user_id", &self.user_id)
            .finish_non_exhaustive()
    }
}
