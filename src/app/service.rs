//! Application service layer.
//!
//! This module contains the use cases of the blog: account registration,
//! login, token authentication and post management. It depends only on the
//! domain traits, so every adapter can be swapped for a mock in tests.

use std::sync::Arc;

use metrics::counter;
use tracing::{info, instrument, warn};

use crate::domain::{
    AppError, Credentials, DatabaseClient, HealthResponse, HealthStatus, NewPost, NewUser,
    PasswordHasher, Post, PostUpdate, Principal, Registration, ResponseMessage, TokenService,
    User,
};
use crate::infra::observability::{LOGINS, POSTS_WRITTEN, USERS_REGISTERED};

/// Application service containing core business logic.
///
/// # Example
///
/// ```ignore
/// let db = Arc::new(PostgresClient::new(&url, PostgresConfig::default()).await?);
/// let hasher = Arc::new(Argon2PasswordHasher::new());
/// let tokens = Arc::new(JwtTokenService::new(&secret, 3600));
/// let service = BlogService::new(db, hasher, tokens);
///
/// let token = service.login(&credentials).await?;
/// ```
pub struct BlogService {
    db_client: Arc<dyn DatabaseClient>,
    password_hasher: Arc<dyn PasswordHasher>,
    token_service: Arc<dyn TokenService>,
}

impl BlogService {
    #[must_use]
    pub fn new(
        db_client: Arc<dyn DatabaseClient>,
        password_hasher: Arc<dyn PasswordHasher>,
        token_service: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            db_client,
            password_hasher,
            token_service,
        }
    }

    /// Hashes the password and stores the account.
    ///
    /// # Errors
    ///
    /// Returns a store constraint violation when the username is taken or the
    /// stored values break the user schema.
    #[instrument(skip(self, registration), fields(username = %registration.username))]
    pub async fn register(&self, registration: Registration) -> Result<User, AppError> {
        let password_hash = self.hash_password(registration.password).await?;

        let user = self
            .db_client
            .create_user(&NewUser {
                username: registration.username,
                email: registration.email,
                password_hash,
            })
            .await?;

        counter!(USERS_REGISTERED).increment(1);
        info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Checks the credentials and issues a bearer token.
    ///
    /// Unknown usernames and wrong passwords both fail with
    /// [`AppError::AuthFailed`].
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn login(&self, credentials: Credentials) -> Result<String, AppError> {
        let Some(user) = self
            .db_client
            .find_user_by_username(&credentials.username)
            .await?
        else {
            counter!(LOGINS, "outcome" => "failure").increment(1);
            warn!("Login for unknown user");
            return Err(AppError::AuthFailed);
        };

        if !self
            .verify_password(credentials.password, user.password_hash)
            .await?
        {
            counter!(LOGINS, "outcome" => "failure").increment(1);
            warn!("Login with wrong password");
            return Err(AppError::AuthFailed);
        }

        let token = self.token_service.issue(&Principal::new(user.username))?;
        counter!(LOGINS, "outcome" => "success").increment(1);
        info!("User logged in");
        Ok(token)
    }

    /// Resolves a bearer header value to the principal it was issued for.
    pub fn authenticate(&self, bearer: &str) -> Result<Principal, AppError> {
        self.token_service.verify(bearer)
    }

    #[instrument(skip(self, post), fields(username = %post.username))]
    pub async fn create_post(&self, post: NewPost) -> Result<Post, AppError> {
        let post = self.db_client.create_post(&post).await?;
        counter!(POSTS_WRITTEN, "operation" => "create").increment(1);
        info!(post_id = %post.id, "Post created");
        Ok(post)
    }

    /// Gets a post by ID.
    #[instrument(skip(self))]
    pub async fn get_post(&self, id: &str) -> Result<Option<Post>, AppError> {
        self.db_client.get_post(id).await
    }

    #[instrument(skip(self, update), fields(username = %update.username))]
    pub async fn update_post(&self, id: &str, update: PostUpdate) -> Result<Post, AppError> {
        let post = self
            .db_client
            .update_post(id, &update)
            .await?
            .ok_or(AppError::NotFound(ResponseMessage::PostNotFound))?;

        counter!(POSTS_WRITTEN, "operation" => "update").increment(1);
        info!(post_id = %post.id, "Post updated");
        Ok(post)
    }

    #[instrument(skip(self))]
    pub async fn delete_post(&self, id: &str) -> Result<Post, AppError> {
        let post = self
            .db_client
            .delete_post(id)
            .await?
            .ok_or(AppError::NotFound(ResponseMessage::PostNotFound))?;

        counter!(POSTS_WRITTEN, "operation" => "delete").increment(1);
        info!(post_id = %post.id, "Post deleted");
        Ok(post)
    }

    /// Performs a health check on the database.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> HealthResponse {
        let db_health = match self.db_client.health_check().await {
            Ok(()) => HealthStatus::Healthy,
            Err(e) => {
                warn!(error = ?e, "Database health check failed");
                HealthStatus::Unhealthy
            }
        };

        HealthResponse::new(db_health)
    }

    async fn hash_password(&self, password: String) -> Result<String, AppError> {
        let hasher = Arc::clone(&self.password_hasher);
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AppError::Internal(format!("Hashing task failed: {e}")))?
    }

    async fn verify_password(&self, password: String, digest: String) -> Result<bool, AppError> {
        let hasher = Arc::clone(&self.password_hasher);
        tokio::task::spawn_blocking(move || hasher.verify(&password, &digest))
            .await
            .map_err(|e| AppError::Internal(format!("Verification task failed: {e}")))?
    }
}
