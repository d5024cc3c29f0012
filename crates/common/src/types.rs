use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for any back-office entity.
///
/// Ids are opaque strings: freshly generated ids are UUID v4 text, but ids
/// supplied by callers (e.g. `"admin-1"`) are kept verbatim. Two entities are
/// the same entity iff their ids are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Creates a new random entity ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wraps an existing identifier.
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<Uuid> for EntityId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid.to_string())
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_id_new_creates_unique_ids() {
        let id1 = EntityId::new();
        let id2 = EntityId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn entity_id_generated_value_is_a_uuid() {
        let id = EntityId::new();
        assert!(Uuid::parse_str(id.as_str()).is_ok());
    }

    #[test]
    fn entity_id_keeps_caller_supplied_value() {
        let id = EntityId::from("admin-1");
        assert_eq!(id.as_str(), "admin-1");
        assert_eq!(id, EntityId::from_string("admin-1".to_string()));
        assert_eq!(id.to_string(), "admin-1");
    }

    #[test]
    fn entity_id_serializes_as_plain_string() {
        let id = EntityId::from("order-7");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"order-7\"");
        let deserialized: EntityId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
