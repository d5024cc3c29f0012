//! Repository ports and in-memory adapters for the delivery back office.
//!
//! The ports are the only way the use-case services reach storage. The
//! in-memory adapters keep entities in insertion order behind a
//! `tokio::sync::RwLock` and back the test suites.

pub mod error;
pub mod memory;
pub mod ports;

pub use error::{RepositoryError, Result};
pub use memory::{
    InMemoryNotificationsRepository, InMemoryOrdersRepository, InMemoryRecipientsRepository,
    InMemoryUsersRepository,
};
pub use ports::{NotificationsRepository, OrdersRepository, RecipientsRepository, UsersRepository};
