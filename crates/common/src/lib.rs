//! Shared types for the delivery back office.

pub mod types;

pub use types::EntityId;
