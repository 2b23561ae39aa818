//! Application error types with proper error chaining.

use std::fmt;

use thiserror::Error;

use super::messages::{ErrorMessage, ResponseMessage};

/// Name of the unique constraint guarding `users.username`.
pub const USERNAME_UNIQUE_CONSTRAINT: &str = "users_username_key";

/// Ordered list of field failures produced by request validation or by the
/// store's schema check.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors(Vec<ErrorMessage>);

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: ErrorMessage) {
        self.0.push(message);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn messages(&self) -> &[ErrorMessage] {
        &self.0
    }

    /// `Ok(())` when nothing failed, otherwise the collected failures.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl From<Vec<ErrorMessage>> for ValidationErrors {
    fn from(messages: Vec<ErrorMessage>) -> Self {
        Self(messages)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.0.iter().map(|m| m.as_str()).collect();
        f.write_str(&joined.join("; "))
    }
}

#[derive(Error, Debug, Clone)]
pub enum DatabaseError {
    #[error("Connection failed: {0}")]
    Connection(String),
    #[error("Query execution failed: {0}")]
    Query(String),
    #[error("Constraint violation: {0}")]
    Constraint(ValidationErrors),
    #[error("Migration failed: {0}")]
    Migration(String),
}

#[derive(Error, Debug, Clone)]
pub enum CredentialError {
    #[error("Password hashing failed: {0}")]
    Hashing(String),
    #[error("Stored password digest is malformed: {0}")]
    MalformedDigest(String),
    #[error("Token issuance failed: {0}")]
    TokenIssue(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),
    #[error("Missing credentials: {0}")]
    MissingCredentials(ValidationErrors),
    #[error("Authentication failed")]
    AuthFailed,
    #[error("Token rejected")]
    TokenInvalid,
    #[error("{0}")]
    NotFound(ResponseMessage),
    #[error("Request body is not a JSON object")]
    MalformedBody,
    #[error(transparent)]
    Database(#[from] DatabaseError),
    #[error(transparent)]
    Credential(#[from] CredentialError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Errors the client cannot act on; rendered with an endpoint-specific
    /// status and a generic message.
    #[must_use]
    pub fn is_unexpected(&self) -> bool {
        match self {
            Self::Database(DatabaseError::Constraint(_)) => false,
            Self::Database(_) | Self::Credential(_) | Self::Config(_) | Self::Internal(_) => true,
            _ => false,
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors)
    }
}

impl From<sqlx::Error> for DatabaseError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => DatabaseError::Connection("Pool timed out".to_string()),
            sqlx::Error::Io(io) => DatabaseError::Connection(io.to_string()),
            sqlx::Error::Database(db_err) => {
                if db_err.code().is_some_and(|code| code == "23505")
                    && db_err.constraint() == Some(USERNAME_UNIQUE_CONSTRAINT)
                {
                    return DatabaseError::Constraint(vec![ErrorMessage::UsernameUnique].into());
                }
                DatabaseError::Query(db_err.message().to_string())
            }
            _ => DatabaseError::Query(err.to_string()),
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(DatabaseError::from(err))
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        AppError::Database(DatabaseError::Migration(err.to_string()))
    }
}
