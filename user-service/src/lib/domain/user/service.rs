use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::AuthorizationClaims;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::user::models::AccessToken;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::SignInCommand;
use crate::domain::user::models::TokenSettings;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::PasswordError;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
    token_settings: TokenSettings,
    // Verified against when the email is unknown, so both sign-in failures cost one bcrypt check.
    decoy_hash: String,
}

const DECOY_PASSWORD: &str = "decoy-password-never-assigned";

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing and token issuance
    /// * `token_settings` - Issuer and audience stamped on issued tokens
    pub fn new(
        repository: Arc<UR>,
        authenticator: Arc<Authenticator>,
        token_settings: TokenSettings,
    ) -> Self {
        let decoy_hash = authenticator
            .hash_password(DECOY_PASSWORD)
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Failed to prepare decoy password hash");
                String::new()
            });

        Self {
            repository,
            authenticator,
            token_settings,
            decoy_hash,
        }
    }

    fn hash_password(&self, password: &str) -> Result<String, UserError> {
        self.authenticator
            .hash_password(password)
            .map_err(|e| UserError::Password(PasswordError::HashingFailed(e.to_string())))
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        let password_hash = self.hash_password(&command.password)?;

        let user = User {
            id: UserId::new(),
            name: command.name,
            email: command.email,
            password_hash,
            created_at: Utc::now(),
        };

        let created_user = self.repository.create(user).await?;
        tracing::info!(user_id = %created_user.id, "User created");

        Ok(created_user)
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn list_users(&self) -> Result<Vec<User>, UserError> {
        self.repository.list_all().await
    }

    async fn update_user(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))?;

        if let Some(new_name) = command.name {
            user.name = new_name;
        }

        if let Some(new_email) = command.email {
            user.email = new_email;
        }

        let updated_user = self.repository.update(user).await?;
        tracing::info!(user_id = %updated_user.id, "User updated");

        Ok(updated_user)
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), UserError> {
        self.repository.delete(id).await?;
        tracing::info!(user_id = %id, "User deleted");

        Ok(())
    }

    async fn sign_in(&self, command: SignInCommand) -> Result<AccessToken, UserError> {
        let user = self
            .repository
            .find_by_email(command.email.as_str())
            .await?;

        let Some(user) = user else {
            self.authenticator
                .verify_password(&command.password, &self.decoy_hash);
            return Err(UserError::InvalidCredentials);
        };

        let claims = AuthorizationClaims::new(user.id)
            .with_name(user.name.as_str())
            .with_audience(&self.token_settings.audience)
            .with_issuer(&self.token_settings.issuer);

        let result = self
            .authenticator
            .authenticate(&command.password, &user.password_hash, &claims)
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => UserError::InvalidCredentials,
                AuthenticationError::PasswordError(err) => {
                    UserError::Password(PasswordError::HashingFailed(err.to_string()))
                }
                AuthenticationError::JwtError(err) => UserError::TokenIssuance(err.to_string()),
            })?;

        tracing::info!(user_id = %user.id, "User signed in");

        Ok(AccessToken::bearer(result.access_token))
    }

    async fn count_users(&self) -> Result<i64, UserError> {
        self.repository.count().await
    }
}
