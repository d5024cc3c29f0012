//! Order entity and its lifecycle transitions.

use chrono::{DateTime, Utc};
use common::EntityId;
use serde::{Deserialize, Serialize};

use crate::user::{Role, User};
use crate::value_objects::{Address, AddressPatch};

use super::{OrderAttachment, OrderError, OrderStatus};

/// A delivery order.
///
/// Represents a parcel from creation (pending) through pickup to delivery or
/// return. Transition methods check every guard before touching any field,
/// so a rejected transition leaves the order unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    id: EntityId,
    recipient_id: Option<EntityId>,

    /// Deliveryman that picked the order up. Unset while pending.
    deliveryman_id: Option<EntityId>,

    status: OrderStatus,
    address: Address,

    /// Proof-of-delivery photos, attached when the order is delivered.
    attachments: Vec<OrderAttachment>,

    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Order {
    /// Creates a new pending order for a recipient.
    pub fn new(recipient_id: EntityId, address: Address) -> Self {
        let now = Utc::now();
        Self {
            id: EntityId::new(),
            recipient_id: Some(recipient_id),
            deliveryman_id: None,
            status: OrderStatus::Pending,
            address,
            attachments: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the generated id.
    pub fn with_id(mut self, id: impl Into<EntityId>) -> Self {
        self.id = id.into();
        self
    }
}

// Query methods
impl Order {
    pub fn id(&self) -> &EntityId {
        &self.id
    }

    pub fn recipient_id(&self) -> Option<&EntityId> {
        self.recipient_id.as_ref()
    }

    pub fn deliveryman_id(&self) -> Option<&EntityId> {
        self.deliveryman_id.as_ref()
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn attachments(&self) -> &[OrderAttachment] {
        &self.attachments
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns true if `deliveryman_id` is the deliveryman holding the order.
    pub fn is_assigned_to(&self, deliveryman_id: &EntityId) -> bool {
        self.deliveryman_id.as_ref() == Some(deliveryman_id)
    }
}

// Field mutators. Each one refreshes `updated_at`.
impl Order {
    pub fn set_recipient_id(&mut self, recipient_id: EntityId) {
        self.recipient_id = Some(recipient_id);
        self.touch();
    }

    /// Applies a partial address update. Returns true if anything was supplied.
    pub fn update_address(&mut self, patch: AddressPatch) -> bool {
        let changed = self.address.apply(patch);
        if changed {
            self.touch();
        }
        changed
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

// Lifecycle transitions
impl Order {
    /// Assigns the order to `deliveryman_id` and moves it to picked up.
    pub fn pick_up(&mut self, deliveryman_id: &EntityId) -> Result<(), OrderError> {
        if !self.status.can_pick_up() {
            return Err(OrderError::InvalidStateTransition {
                current_state: self.status,
                action: "pick up",
            });
        }

        self.deliveryman_id = Some(deliveryman_id.clone());
        self.status = OrderStatus::PickedUp;
        self.touch();
        Ok(())
    }

    /// Marks the order as delivered, attaching one record per photo id.
    ///
    /// Checks, in order: the caller is the assigned deliveryman, the order is
    /// picked up, at least one photo id was given.
    pub fn mark_delivered(
        &mut self,
        deliveryman_id: &EntityId,
        photo_ids: &[EntityId],
    ) -> Result<&[OrderAttachment], OrderError> {
        if !self.is_assigned_to(deliveryman_id) {
            return Err(OrderError::NotAssignedDeliveryman {
                action: "mark the order as delivered",
            });
        }

        if !self.status.can_mark_delivered() {
            return Err(OrderError::InvalidStateTransition {
                current_state: self.status,
                action: "mark as delivered",
            });
        }

        if photo_ids.is_empty() {
            return Err(OrderError::DeliveryPhotoRequired);
        }

        self.attachments = photo_ids
            .iter()
            .map(|photo_id| OrderAttachment::new(self.id.clone(), photo_id.clone()))
            .collect();
        self.status = OrderStatus::Delivered;
        self.touch();
        Ok(&self.attachments)
    }

    /// Marks the order as returned.
    ///
    /// Admins may return any order; a deliveryman only the one assigned to them.
    pub fn mark_returned(&mut self, actor: &User) -> Result<(), OrderError> {
        if actor.has_role(Role::Deliveryman) && !self.is_assigned_to(actor.id()) {
            return Err(OrderError::NotAssignedDeliveryman {
                action: "mark the order as returned",
            });
        }

        if !self.status.can_mark_returned() {
            return Err(OrderError::InvalidStateTransition {
                current_state: self.status,
                action: "mark as returned",
            });
        }

        self.status = OrderStatus::Returned;
        self.touch();
        Ok(())
    }

    /// Puts the order back to pending.
    ///
    /// Clears the assignment so that a pending order never carries a
    /// deliveryman. Delivery photos stay attached until the next delivery
    /// replaces them.
    pub fn reset_to_pending(&mut self) -> Result<(), OrderError> {
        if !self.status.can_reset() {
            return Err(OrderError::InvalidStateTransition {
                current_state: self.status,
                action: "reset to pending",
            });
        }

        self.deliveryman_id = None;
        self.status = OrderStatus::Pending;
        self.touch();
        Ok(())
    }
}
