//! User-visible message vocabulary.
//!
//! Request validation and store-level schema checks both report failures
//! with [`ErrorMessage`], so a client sees the same text regardless of which
//! layer rejected the input.

use std::fmt;

use serde::{Serialize, Serializer};

/// Field-level failure messages, rendered as `{"msg": ...}` items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorMessage {
    TitleRequired,
    TitleMinLength,
    TitleMaxLength,
    BodyRequired,
    BodyMinLength,
    BodyMaxLength,
    UsernameRequired,
    UsernameMinLength,
    UsernameMaxLength,
    UsernameUnique,
    EmailRequired,
    EmailInvalid,
    PasswordRequired,
    PasswordIsWeak,
    IdRequired,
    IdInvalid,
    IdLength,
    TokenRequired,
}

impl ErrorMessage {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TitleRequired => "Title is a required field",
            Self::TitleMinLength => "Title must be at least 3 characters long",
            Self::TitleMaxLength => "Title must be no longer than 150 characters",
            Self::BodyRequired => "Post body is a required field",
            Self::BodyMinLength => "Post body must be at least 3 characters long",
            Self::BodyMaxLength => "The post body must be no longer than 3000 characters",
            Self::UsernameRequired => "Username is a required field",
            Self::UsernameMinLength => "Username must be at least 3 characters long",
            Self::UsernameMaxLength => "Username must be no longer than 20 characters",
            Self::UsernameUnique => "Username must be unique",
            Self::EmailRequired => "Email is a required field",
            Self::EmailInvalid => "Invalid email address",
            Self::PasswordRequired => "Password is a required field",
            Self::PasswordIsWeak => {
                "Password must be at least 7 characters long and must contain at least: \
                 one lowercase character, one uppercase character, one number, \
                 and a special symbol."
            }
            Self::IdRequired => "ID is a required field",
            Self::IdInvalid => "ID must be a hexadecimal string",
            Self::IdLength => "ID must be exactly 24 characters long",
            Self::TokenRequired => "Authorization header is required",
        }
    }
}

impl fmt::Display for ErrorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ErrorMessage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Whole-response messages, rendered as `{"message": ...}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseMessage {
    BadRequest,
    UserRegistered,
    PostCreated,
    PostUpdated,
    PostDeleted,
    PostNotFound,
    InternalServerError,
    AuthFailed,
    TokenInvalid,
}

impl ResponseMessage {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BadRequest => "Bad Request",
            Self::UserRegistered => "Successful user registration",
            Self::PostCreated => "Successful blogpost creation",
            Self::PostUpdated => "Successful blogpost update",
            Self::PostDeleted => "Successful blogpost deletion",
            Self::PostNotFound => "Blogpost was not found",
            Self::InternalServerError => "Internal Server Error",
            Self::AuthFailed => "Authentication failed",
            Self::TokenInvalid => "Invalid or expired token",
        }
    }
}

impl fmt::Display for ResponseMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ResponseMessage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
