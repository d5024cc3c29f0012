//! Proof-of-delivery attachments.

use common::EntityId;
use serde::{Deserialize, Serialize};

/// Links an uploaded photo to the order it proves delivery of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderAttachment {
    id: EntityId,
    order_id: EntityId,
    attachment_id: EntityId,
}

impl OrderAttachment {
    pub fn new(order_id: EntityId, attachment_id: EntityId) -> Self {
        Self {
            id: EntityId::new(),
            order_id,
            attachment_id,
        }
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }

    pub fn order_id(&self) -> &EntityId {
        &self.order_id
    }

    /// The id of the uploaded photo.
    pub fn attachment_id(&self) -> &EntityId {
        &self.attachment_id
    }
}
