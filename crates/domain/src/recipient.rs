//! Recipients: the people orders are delivered to.

use chrono::{DateTime, Utc};
use common::EntityId;
use serde::{Deserialize, Serialize};

use crate::value_objects::{Address, AddressPatch, Coordinates};

/// A delivery recipient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipient {
    id: EntityId,
    name: String,
    address: Address,
    phone: String,
    email: String,
    coordinates: Option<Coordinates>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Recipient {
    /// Creates a new recipient with a generated id.
    pub fn new(
        name: impl Into<String>,
        address: Address,
        phone: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: EntityId::new(),
            name: name.into(),
            address,
            phone: phone.into(),
            email: email.into(),
            coordinates: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the generated id.
    pub fn with_id(mut self, id: impl Into<EntityId>) -> Self {
        self.id = id.into();
        self
    }

    /// Sets the initial position.
    pub fn with_coordinates(mut self, coordinates: Coordinates) -> Self {
        self.coordinates = Some(coordinates);
        self
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.touch();
    }

    pub fn set_phone(&mut self, phone: impl Into<String>) {
        self.phone = phone.into();
        self.touch();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
        self.touch();
    }

    pub fn set_coordinates(&mut self, coordinates: Coordinates) {
        self.coordinates = Some(coordinates);
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
