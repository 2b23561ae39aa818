//! Domain traits defining contracts for external systems.

use async_trait::async_trait;

use super::error::AppError;
use super::types::{NewPost, NewUser, Post, PostUpdate, Principal, User};

/// Persistence contract for registered accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user. Schema failures and a taken username surface as
    /// `DatabaseError::Constraint`.
    async fn create_user(&self, user: &NewUser) -> Result<User, AppError>;

    /// Look up a user by exact username
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError>;
}

/// Persistence contract for blog posts.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Persist a new post
    async fn create_post(&self, post: &NewPost) -> Result<Post, AppError>;

    /// Get a single post by ID
    async fn get_post(&self, id: &str) -> Result<Option<Post>, AppError>;

    /// Apply an update; `None` when no post has this ID
    async fn update_post(&self, id: &str, update: &PostUpdate) -> Result<Option<Post>, AppError>;

    /// Remove a post and return it; `None` when no post has this ID
    async fn delete_post(&self, id: &str) -> Result<Option<Post>, AppError>;
}

/// Database client: both repositories plus connectivity checks.
#[async_trait]
pub trait DatabaseClient: UserRepository + PostRepository {
    /// Check database connectivity
    async fn health_check(&self) -> Result<(), AppError>;
}

/// One-way password digests.
pub trait PasswordHasher: Send + Sync {
    /// Produce a storable digest of `password`
    fn hash(&self, password: &str) -> Result<String, AppError>;

    /// Compare `password` against a digest produced by [`PasswordHasher::hash`]
    fn verify(&self, password: &str, digest: &str) -> Result<bool, AppError>;
}

/// Signed, time-bounded bearer tokens.
pub trait TokenService: Send + Sync {
    /// Issue a token naming `principal`
    fn issue(&self, principal: &Principal) -> Result<String, AppError>;

    /// Verify an `Authorization` header value of the form `Bearer <token>`.
    /// Every failure is reported as `AppError::TokenInvalid`.
    fn verify(&self, bearer: &str) -> Result<Principal, AppError>;
}
