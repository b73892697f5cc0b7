//! Users service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::users::{
        data::NewUser,
        errors::UsersServiceError,
        records::{Role, ShippingAddress, UserRecord, UserUuid},
        repository::PgUsersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    db: Db,
    repository: PgUsersRepository,
}

impl PgUsersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgUsersRepository::new(),
        }
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.repository.get_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(record)
    }

    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.repository.create_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(record)
    }

    async fn promote_to_admin(&self, email: &str) -> Result<UserRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self
            .repository
            .set_role_by_email(&mut tx, email, Role::Admin)
            .await?;

        tx.commit().await?;

        Ok(record)
    }

    async fn update_address(
        &self,
        user: UserUuid,
        address: ShippingAddress,
    ) -> Result<(), UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .update_address(&mut tx, user, &address)
            .await?;

        if rows_affected == 0 {
            return Err(UsersServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Retrieve a user profile.
    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError>;

    /// Create a user profile.
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError>;

    /// Grant the admin role to the user with the given email.
    async fn promote_to_admin(&self, email: &str) -> Result<UserRecord, UsersServiceError>;

    /// Replace the stored shipping address of a user.
    async fn update_address(
        &self,
        user: UserUuid,
        address: ShippingAddress,
    ) -> Result<(), UsersServiceError>;
}
