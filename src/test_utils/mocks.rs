//! Mock implementations for testing.
//!
//! These mocks provide in-memory implementations of domain traits
//! that can be configured to simulate various scenarios including
//! success, failure, and edge cases. The mock store applies the same schema
//! and uniqueness rules as the PostgreSQL adapter.

use async_trait::async_trait;
use chrono::Utc;
use secrecy::SecretString;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::domain::{
    AppError, CredentialError, DatabaseClient, DatabaseError, ErrorMessage, NewPost, NewUser,
    PasswordHasher, Post, PostRepository, PostUpdate, User, UserRepository, generate_entity_id,
};
use crate::infra::database::schema::{check_post, check_post_update, normalize_id, prepare_user};
use crate::infra::JwtTokenService;

/// Signing secret used by [`test_token_service`].
pub const TEST_TOKEN_SECRET: &str = "test-secret-with-at-least-32-bytes!!";

/// Configuration for mock behavior.
#[derive(Debug, Clone, Default)]
pub struct MockConfig {
    /// If true, operations will fail.
    pub should_fail: bool,
    /// Custom error message for failures.
    pub error_message: Option<String>,
}

impl MockConfig {
    /// Creates a config that always succeeds.
    #[must_use]
    pub fn success() -> Self {
        Self::default()
    }

    /// Creates a config that always fails.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            should_fail: true,
            error_message: Some(message.into()),
        }
    }
}

/// Mock database client for testing.
///
/// # Example
///
/// ```
/// use blog_api::test_utils::{MockDatabaseClient, mocks::MockConfig};
///
/// // Create a mock that succeeds
/// let mock = MockDatabaseClient::new();
///
/// // Create a mock that fails
/// let failing_mock = MockDatabaseClient::with_config(MockConfig::failure("DB error"));
/// ```
pub struct MockDatabaseClient {
    users: Arc<Mutex<HashMap<String, User>>>,
    posts: Arc<Mutex<HashMap<String, Post>>>,
    config: MockConfig,
    call_count: AtomicU64,
    is_healthy: AtomicBool,
}

impl MockDatabaseClient {
    /// Creates a new mock with default (success) configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MockConfig::success())
    }

    /// Creates a new mock with the given configuration.
    #[must_use]
    pub fn with_config(config: MockConfig) -> Self {
        Self {
            users: Arc::new(Mutex::new(HashMap::new())),
            posts: Arc::new(Mutex::new(HashMap::new())),
            config,
            call_count: AtomicU64::new(0),
            is_healthy: AtomicBool::new(true),
        }
    }

    /// Creates a mock that always fails.
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_config(MockConfig::failure(message))
    }

    /// Gets the number of times any method was called.
    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Sets the health status.
    pub fn set_healthy(&self, healthy: bool) {
        self.is_healthy.store(healthy, Ordering::Relaxed);
    }

    pub fn user_count(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    /// Gets all stored posts.
    pub fn get_all_posts(&self) -> Vec<Post> {
        self.posts.lock().unwrap().values().cloned().collect()
    }

    fn increment_call_count(&self) {
        self.call_count.fetch_add(1, Ordering::Relaxed);
    }

    fn check_should_fail(&self) -> Result<(), AppError> {
        if self.config.should_fail {
            let msg = self
                .config
                .error_message
                .clone()
                .unwrap_or_else(|| "Mock database error".to_string());
            return Err(AppError::Database(DatabaseError::Query(msg)));
        }
        Ok(())
    }
}

impl Default for MockDatabaseClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockDatabaseClient {
    async fn create_user(&self, user: &NewUser) -> Result<User, AppError> {
        self.increment_call_count();
        self.check_should_fail()?;

        let user = prepare_user(user)?;
        let mut users = self.users.lock().unwrap();
        if users.contains_key(&user.username) {
            return Err(AppError::Database(DatabaseError::Constraint(
                vec![ErrorMessage::UsernameUnique].into(),
            )));
        }

        let now = Utc::now();
        let stored = User {
            id: generate_entity_id(),
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
        };
        users.insert(stored.username.clone(), stored.clone());
        Ok(stored)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        self.increment_call_count();
        self.check_should_fail()?;

        Ok(self.users.lock().unwrap().get(username).cloned())
    }
}

#[async_trait]
impl PostRepository for MockDatabaseClient {
    async fn create_post(&self, post: &NewPost) -> Result<Post, AppError> {
        self.increment_call_count();
        self.check_should_fail()?;
        check_post(post)?;

        let now = Utc::now();
        let stored = Post {
            id: generate_entity_id(),
            title: post.title.clone(),
            body: post.body.clone(),
            username: post.username.clone(),
            created_at: now,
            updated_at: now,
        };
        self.posts
            .lock()
            .unwrap()
            .insert(stored.id.clone(), stored.clone());
        Ok(stored)
    }

    async fn get_post(&self, id: &str) -> Result<Option<Post>, AppError> {
        self.increment_call_count();
        self.check_should_fail()?;

        Ok(self.posts.lock().unwrap().get(&normalize_id(id)).cloned())
    }

    async fn update_post(&self, id: &str, update: &PostUpdate) -> Result<Option<Post>, AppError> {
        self.increment_call_count();
        self.check_should_fail()?;
        check_post_update(update)?;

        let mut posts = self.posts.lock().unwrap();
        let Some(existing) = posts.get_mut(&normalize_id(id)) else {
            return Ok(None);
        };

        if let Some(title) = &update.title {
            existing.title = title.clone();
        }
        if let Some(body) = &update.body {
            existing.body = body.clone();
        }
        existing.username = update.username.clone();
        existing.updated_at = Utc::now();
        Ok(Some(existing.clone()))
    }

    async fn delete_post(&self, id: &str) -> Result<Option<Post>, AppError> {
        self.increment_call_count();
        self.check_should_fail()?;

        Ok(self.posts.lock().unwrap().remove(&normalize_id(id)))
    }
}

#[async_trait]
impl DatabaseClient for MockDatabaseClient {
    async fn health_check(&self) -> Result<(), AppError> {
        self.increment_call_count();

        if !self.is_healthy.load(Ordering::Relaxed) {
            return Err(AppError::Database(DatabaseError::Connection(
                "Mock database unhealthy".to_string(),
            )));
        }

        self.check_should_fail()
    }
}

/// Reversible stand-in for a password hasher. Digests are `mock$<password>`.
#[derive(Debug, Default)]
pub struct MockPasswordHasher {
    config: MockConfig,
}

impl MockPasswordHasher {
    const PREFIX: &'static str = "mock$";

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a hasher whose operations always fail.
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            config: MockConfig::failure(message),
        }
    }

    fn check_should_fail(&self) -> Result<(), AppError> {
        if self.config.should_fail {
            let msg = self
                .config
                .error_message
                .clone()
                .unwrap_or_else(|| "Mock hashing error".to_string());
            return Err(CredentialError::Hashing(msg).into());
        }
        Ok(())
    }
}

impl PasswordHasher for MockPasswordHasher {
    fn hash(&self, password: &str) -> Result<String, AppError> {
        self.check_should_fail()?;
        Ok(format!("{}{password}", Self::PREFIX))
    }

    fn verify(&self, password: &str, digest: &str) -> Result<bool, AppError> {
        self.check_should_fail()?;
        let stored = digest
            .strip_prefix(Self::PREFIX)
            .ok_or_else(|| CredentialError::MalformedDigest(digest.to_string()))?;
        Ok(stored == password)
    }
}

/// Token service signed with [`TEST_TOKEN_SECRET`] and a one-hour lifetime.
#[must_use]
pub fn test_token_service() -> JwtTokenService {
    JwtTokenService::new(&SecretString::from(TEST_TOKEN_SECRET.to_string()), 3600)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: "Email@Random.com".to_string(),
            password_hash: "mock$Aa1!aaaa".to_string(),
        }
    }

    #[tokio::test]
    async fn test_mock_user_create_and_find() {
        let mock = MockDatabaseClient::new();

        let created = mock.create_user(&new_user(" newUser ")).await.unwrap();
        assert_eq!(created.username, "newUser");
        assert_eq!(created.email, "email@random.com");

        let found = mock.find_user_by_username("newUser").await.unwrap();
        assert_eq!(found.unwrap().id, created.id);
        assert!(mock.find_user_by_username("other").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_mock_username_uniqueness() {
        let mock = MockDatabaseClient::new();
        mock.create_user(&new_user("newUser")).await.unwrap();

        let err = mock.create_user(&new_user("newUser")).await.unwrap_err();
        match err {
            AppError::Database(DatabaseError::Constraint(errors)) => {
                assert_eq!(errors.messages(), &[ErrorMessage::UsernameUnique]);
            }
            other => panic!("expected constraint violation, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_mock_post_lookup_ignores_id_case() {
        let mock = MockDatabaseClient::new();
        let created = mock
            .create_post(&NewPost::new("Title", "Body text", "writer"))
            .await
            .unwrap();

        let fetched = mock.get_post(&created.id.to_uppercase()).await.unwrap();
        assert_eq!(fetched.unwrap().id, created.id);
    }

    #[tokio::test]
    async fn test_mock_database_failure() {
        let mock = MockDatabaseClient::failing("Connection timeout");

        let result = mock.create_post(&NewPost::new("Title", "Body text", "writer")).await;
        assert!(matches!(result, Err(AppError::Database(DatabaseError::Query(_)))));
    }

    #[tokio::test]
    async fn test_mock_database_call_count() {
        let mock = MockDatabaseClient::new();
        assert_eq!(mock.call_count(), 0);

        let _ = mock.health_check().await;
        assert_eq!(mock.call_count(), 1);

        let _ = mock.get_post("test").await;
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn test_mock_database_health_toggle() {
        let mock = MockDatabaseClient::new();
        assert!(mock.health_check().await.is_ok());

        mock.set_healthy(false);
        assert!(mock.health_check().await.is_err());
    }

    #[test]
    fn test_mock_password_hasher() {
        let hasher = MockPasswordHasher::new();
        let digest = hasher.hash("Aa1!aaaa").unwrap();

        assert!(hasher.verify("Aa1!aaaa", &digest).unwrap());
        assert!(!hasher.verify("Bb2@bbbb", &digest).unwrap());
        assert!(hasher.verify("Aa1!aaaa", "plain").is_err());
        assert!(MockPasswordHasher::failing("boom").hash("x").is_err());
    }
}
