//! Recipient use-cases.

use common::EntityId;
use domain::{Recipient, Role};
use repositories::{RecipientsRepository, UsersRepository};

use crate::authorization::{Requirement, authorize};
use crate::error::{Result, ServiceError};
use crate::requests::{CreateRecipient, DeleteRecipient, ListRecipients, UpdateRecipient};

/// Service for managing recipients. Admin only.
pub struct RecipientService<R, U>
where
    R: RecipientsRepository,
    U: UsersRepository,
{
    recipients: R,
    users: U,
}

impl<R, U> RecipientService<R, U>
where
    R: RecipientsRepository,
    U: UsersRepository,
{
    pub fn new(recipients: R, users: U) -> Self {
        Self { recipients, users }
    }

    #[tracing::instrument(skip(self))]
    pub async fn create_recipient(&self, request: CreateRecipient) -> Result<Recipient> {
        self.authorize_admin(&request.admin_id, "create recipients")
            .await?;

        let mut recipient = Recipient::new(
            request.name,
            request.address,
            request.phone,
            request.email,
        );
        if let Some(coordinates) = request.coordinates {
            recipient = recipient.with_coordinates(coordinates);
        }
        self.recipients.create(recipient.clone()).await?;

        tracing::info!(recipient_id = %recipient.id(), "recipient created");
        Ok(recipient)
    }

    #[tracing::instrument(skip(self))]
    pub async fn update_recipient(&self, request: UpdateRecipient) -> Result<Recipient> {
        self.authorize_admin(&request.admin_id, "update recipients")
            .await?;

        let mut recipient = self.load(&request.recipient_id).await?;
        if let Some(name) = request.name {
            recipient.set_name(name);
        }
        if let Some(phone) = request.phone {
            recipient.set_phone(phone);
        }
        if let Some(email) = request.email {
            recipient.set_email(email);
        }
        if let Some(coordinates) = request.coordinates {
            recipient.set_coordinates(coordinates);
        }
        recipient.update_address(request.address);

        Ok(self.recipients.save(recipient).await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_recipient(&self, request: DeleteRecipient) -> Result<()> {
        self.authorize_admin(&request.admin_id, "delete recipients")
            .await?;

        let recipient = self.load(&request.recipient_id).await?;
        self.recipients.delete(recipient.id()).await?;

        tracing::info!(recipient_id = %recipient.id(), "recipient deleted");
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn list_recipients(&self, request: ListRecipients) -> Result<Vec<Recipient>> {
        self.authorize_admin(&request.admin_id, "list recipients")
            .await?;

        Ok(self.recipients.find_all().await?)
    }

    async fn authorize_admin(&self, admin_id: &EntityId, action: &'static str) -> Result<()> {
        authorize(&self.users, admin_id, Requirement::Role(Role::Admin), action).await?;
        Ok(())
    }

    async fn load(&self, recipient_id: &EntityId) -> Result<Recipient> {
        self.recipients
            .find_by_id(recipient_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("recipient", recipient_id))
    }
}
