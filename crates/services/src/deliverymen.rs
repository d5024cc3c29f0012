//! Deliveryman account use-cases.

use common::EntityId;
use domain::{Role, User, UserError, UserStatus};
use repositories::{RepositoryError, UsersRepository};

use crate::authorization::{Requirement, authorize};
use crate::error::{Result, ServiceError};
use crate::requests::{
    ChangeUserPassword, CreateDeliveryman, DeactivateDeliveryman, ListDeliverymen,
    UpdateDeliveryman,
};

/// Service for managing deliveryman accounts. Admin only.
///
/// Deliverymen are never deleted: deactivation flips their status and
/// listings only show active accounts.
pub struct DeliverymanService<U>
where
    U: UsersRepository,
{
    users: U,
}

impl<U> DeliverymanService<U>
where
    U: UsersRepository,
{
    pub fn new(users: U) -> Self {
        Self { users }
    }

    /// Registers an active deliveryman. The cpf must not be in use.
    ///
    /// The lookup rejects the common case early; the repository insert
    /// settles a race between two creates with the same cpf.
    #[tracing::instrument(skip(self, request), fields(admin_id = %request.admin_id))]
    pub async fn create_deliveryman(&self, request: CreateDeliveryman) -> Result<User> {
        self.authorize_admin(&request.admin_id, "create deliverymen")
            .await?;

        if self.users.find_by_cpf(&request.cpf).await?.is_some() {
            return Err(UserError::CpfAlreadyInUse { cpf: request.cpf }.into());
        }

        let deliveryman = User::new(
            request.name,
            request.cpf,
            request.password,
            Role::Deliveryman,
        )
        .with_contact(request.email, request.phone);
        self.users
            .create(deliveryman.clone())
            .await
            .map_err(|err| match err {
                RepositoryError::Duplicate {
                    field: "cpf",
                    value,
                    ..
                } => ServiceError::from(UserError::CpfAlreadyInUse { cpf: value }),
                other => other.into(),
            })?;

        tracing::info!(deliveryman_id = %deliveryman.id(), "deliveryman created");
        Ok(deliveryman)
    }

    #[tracing::instrument(skip(self))]
    pub async fn update_deliveryman(&self, request: UpdateDeliveryman) -> Result<User> {
        self.authorize_admin(&request.admin_id, "update deliverymen")
            .await?;

        let mut deliveryman = self.load_active_deliveryman(&request.deliveryman_id).await?;
        if let Some(name) = request.name {
            deliveryman.set_name(name);
        }
        if let Some(email) = request.email {
            deliveryman.set_email(email);
        }
        if let Some(phone) = request.phone {
            deliveryman.set_phone(phone);
        }

        Ok(self.users.save(deliveryman).await?)
    }

    /// Flips an active deliveryman to inactive and returns the updated account.
    #[tracing::instrument(skip(self))]
    pub async fn deactivate_deliveryman(&self, request: DeactivateDeliveryman) -> Result<User> {
        self.authorize_admin(&request.admin_id, "deactivate deliverymen")
            .await?;

        let deliveryman = self.load_active_deliveryman(&request.deliveryman_id).await?;
        let deliveryman = self
            .users
            .patch(deliveryman.id(), UserStatus::Inactive)
            .await?;

        tracing::info!(deliveryman_id = %deliveryman.id(), "deliveryman deactivated");
        Ok(deliveryman)
    }

    /// Lists the active deliverymen.
    #[tracing::instrument(skip(self))]
    pub async fn list_deliverymen(&self, request: ListDeliverymen) -> Result<Vec<User>> {
        self.authorize_admin(&request.admin_id, "list deliverymen")
            .await?;

        let deliverymen = self.users.find_all_deliverymen().await?;
        Ok(deliverymen.into_iter().filter(User::is_active).collect())
    }

    /// Sets a new password on any user account.
    #[tracing::instrument(skip(self, request), fields(admin_id = %request.admin_id, user_id = %request.user_id))]
    pub async fn change_password(&self, request: ChangeUserPassword) -> Result<User> {
        self.authorize_admin(&request.admin_id, "change user passwords")
            .await?;

        let mut user = self
            .users
            .find_by_id(&request.user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("user", &request.user_id))?;
        user.set_password(request.new_password);

        Ok(self.users.save(user).await?)
    }

    async fn authorize_admin(&self, admin_id: &EntityId, action: &'static str) -> Result<()> {
        authorize(&self.users, admin_id, Requirement::Role(Role::Admin), action).await?;
        Ok(())
    }

    async fn load_active_deliveryman(&self, deliveryman_id: &EntityId) -> Result<User> {
        self.users
            .find_by_id(deliveryman_id)
            .await?
            .filter(|user| user.has_role(Role::Deliveryman) && user.is_active())
            .ok_or_else(|| ServiceError::not_found("deliveryman", deliveryman_id))
    }
}
