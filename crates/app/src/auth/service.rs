//! Auth service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use crate::{
    auth::{
        ApiTokenVersion, AuthServiceError, IssuedApiToken, Principal, format_api_token,
        generate_api_token_secret,
        models::NewApiToken,
        parse_api_token,
        repository::PgAuthRepository,
        token_verifier,
    },
    domain::users::records::UserUuid,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgAuthRepository::new(pool),
        }
    }

    /// Issue a new API token for the given user.
    ///
    /// # Errors
    ///
    /// Returns [`AuthServiceError::UserNotFound`] for an unknown user, or a storage
    /// error if the insert fails.
    pub async fn issue_api_token(
        &self,
        user_uuid: UserUuid,
    ) -> Result<IssuedApiToken, AuthServiceError> {
        let token_uuid = Uuid::now_v7();
        let version = ApiTokenVersion::V1;
        let secret = generate_api_token_secret();
        let token = format_api_token(token_uuid, version, &secret);

        let metadata = self
            .repository
            .create_api_token(&NewApiToken {
                uuid: token_uuid,
                user_uuid,
                token_hash: token_verifier(&token_uuid, version, &secret),
            })
            .await?;

        Ok(IssuedApiToken { token, metadata })
    }

    /// Revoke a token by UUID. Returns `true` if the token was active.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn revoke_api_token(&self, token_uuid: Uuid) -> Result<bool, AuthServiceError> {
        self.repository
            .revoke_api_token(token_uuid)
            .await
            .map(|record| record.is_some())
            .map_err(AuthServiceError::from)
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Principal, AuthServiceError> {
        let parsed = parse_api_token(bearer_token).map_err(|_| AuthServiceError::NotFound)?;

        let hash = token_verifier(&parsed.token_uuid, parsed.version, &parsed.secret);

        let found = self
            .repository
            .find_principal_by_token_hash(&hash)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        if found.token_uuid != parsed.token_uuid {
            return Err(AuthServiceError::NotFound);
        }

        if let Err(error) = self
            .repository
            .touch_api_token_last_used(found.token_uuid)
            .await
        {
            warn!(%error, token_uuid = %found.token_uuid, "failed to record token use");
        }

        Ok(found.principal)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a bearer token to the user it was issued for.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<Principal, AuthServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::users::{UsersService, records::Role},
        test::{TestContext, helpers::create_user},
    };

    use super::*;

    #[tokio::test]
    async fn issued_token_authenticates_its_user() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "noor").await?;

        let issued = ctx.auth.issue_api_token(user.uuid).await?;
        let principal = ctx.auth.authenticate_bearer(&issued.token).await?;

        assert_eq!(principal, Principal::new(user.uuid, Role::User));
        assert_eq!(issued.metadata.user_uuid, user.uuid);

        Ok(())
    }

    #[tokio::test]
    async fn role_is_read_fresh_on_each_authentication() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "noor").await?;
        let issued = ctx.auth.issue_api_token(user.uuid).await?;

        ctx.users.promote_to_admin(&user.email).await?;

        let principal = ctx.auth.authenticate_bearer(&issued.token).await?;

        assert!(principal.is_admin(), "promotion should apply to an existing token");

        Ok(())
    }

    #[tokio::test]
    async fn revoked_token_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "noor").await?;
        let issued = ctx.auth.issue_api_token(user.uuid).await?;

        assert!(ctx.auth.revoke_api_token(issued.metadata.uuid).await?);
        assert!(!ctx.auth.revoke_api_token(issued.metadata.uuid).await?);

        let result = ctx.auth.authenticate_bearer(&issued.token).await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn tampered_secret_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let user = create_user(&ctx, "noor").await?;
        let issued = ctx.auth.issue_api_token(user.uuid).await?;

        let mut tampered = issued.token.clone();
        let last = if tampered.ends_with('0') { '1' } else { '0' };
        tampered.pop();
        tampered.push(last);

        let result = ctx.auth.authenticate_bearer(&tampered).await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn issuing_for_unknown_user_fails() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx.auth.issue_api_token(UserUuid::new()).await;

        assert!(
            matches!(result, Err(AuthServiceError::UserNotFound)),
            "expected UserNotFound, got {result:?}"
        );

        Ok(())
    }
}
