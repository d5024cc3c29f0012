//! Domain layer for the delivery back office.
//!
//! This crate provides the entities the back office works on:
//! - Order with its status state machine and delivery attachments
//! - User (admins and deliverymen) with role and account status
//! - Recipient and the Address value object
//! - Notification records for status changes
//!
//! Entities are plain records. Their mutators work in place and refresh
//! `updated_at`; persistence lives behind the ports in the `repositories` crate.

pub mod notification;
pub mod order;
pub mod recipient;
pub mod user;
pub mod value_objects;

pub use notification::{Notification, NotificationChannel, ParseChannelError};
pub use order::{Order, OrderAttachment, OrderError, OrderStatus, ParseOrderStatusError};
pub use recipient::Recipient;
pub use user::{Password, Role, User, UserError, UserStatus};
pub use value_objects::{Address, AddressPatch, Coordinates};
