use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::messages::{ErrorMessage, ResponseMessage};

/// Represents a unique identifier for stored entities (24 lowercase hex digits).
pub type EntityId = String;

/// Length of an entity identifier in hexadecimal characters.
pub const ENTITY_ID_LENGTH: usize = 24;

/// Generates a new identifier in the document store's object-id shape:
/// eight hex digits of Unix seconds followed by sixteen random hex digits.
#[must_use]
pub fn generate_entity_id() -> EntityId {
    let seconds = Utc::now().timestamp() as u32;
    let random: u64 = rand::random();
    format!("{seconds:08x}{random:016x}")
}

/// Registered account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: EntityId,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data needed to persist a new user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Blog post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    pub id: EntityId,
    pub title: String,
    pub body: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data needed to persist a new post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub body: String,
    pub username: String,
}

impl NewPost {
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        username: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            username: username.into(),
        }
    }
}

/// Replacement values for an existing post. Absent title or body keep
/// their stored value; the attribution is always replaced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostUpdate {
    pub title: Option<String>,
    pub body: Option<String>,
    pub username: String,
}

/// Plaintext registration input, before hashing.
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Plaintext login input.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Authenticated identity resolved from a bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal(String);

impl Principal {
    pub fn new(username: impl Into<String>) -> Self {
        Self(username.into())
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.0
    }
}

/// Single failure item: `{"msg": "..."}`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FieldError {
    pub msg: ErrorMessage,
}

/// Aggregated failure body: `{"errors": [{"msg": "..."}, ...]}`.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorsResponse {
    pub errors: Vec<FieldError>,
}

impl ErrorsResponse {
    #[must_use]
    pub fn new(messages: &[ErrorMessage]) -> Self {
        Self {
            errors: messages.iter().map(|&msg| FieldError { msg }).collect(),
        }
    }
}

/// Single-message body: `{"message": "..."}`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MessageResponse {
    pub message: ResponseMessage,
}

impl MessageResponse {
    #[must_use]
    pub const fn new(message: ResponseMessage) -> Self {
        Self { message }
    }
}

/// Successful login body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Health check status for services.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Health check response for the application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub database: HealthStatus,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    #[must_use]
    pub fn new(database: HealthStatus) -> Self {
        Self {
            status: database,
            database,
            timestamp: Utc::now(),
        }
    }
}
