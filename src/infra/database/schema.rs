//! Store-level schema for the `users` and `posts` collections.
//!
//! Every adapter runs these checks before writing, so constraint failures
//! come back in the same message vocabulary as request validation. At most
//! one message is reported per field, in field order.

use validator::ValidateLength;

use crate::domain::{
    AppError, DatabaseError, ErrorMessage, NewPost, NewUser, Pattern, PostUpdate,
    ValidationErrors,
};

struct Bounds {
    min: u64,
    max: u64,
    too_short: ErrorMessage,
    too_long: ErrorMessage,
}

const USERNAME: Bounds = Bounds {
    min: 3,
    max: 20,
    too_short: ErrorMessage::UsernameMinLength,
    too_long: ErrorMessage::UsernameMaxLength,
};

const TITLE: Bounds = Bounds {
    min: 3,
    max: 150,
    too_short: ErrorMessage::TitleMinLength,
    too_long: ErrorMessage::TitleMaxLength,
};

const BODY: Bounds = Bounds {
    min: 3,
    max: 3000,
    too_short: ErrorMessage::BodyMinLength,
    too_long: ErrorMessage::BodyMaxLength,
};

impl Bounds {
    fn check(&self, value: &str) -> Option<ErrorMessage> {
        if !value.validate_length(Some(self.min), None, None) {
            Some(self.too_short)
        } else if !value.validate_length(None, Some(self.max), None) {
            Some(self.too_long)
        } else {
            None
        }
    }
}

fn into_result(errors: ValidationErrors) -> Result<(), AppError> {
    errors
        .into_result()
        .map_err(|e| AppError::Database(DatabaseError::Constraint(e)))
}

/// Trims the username, trims and lowercases the email, then applies the
/// user schema. The returned value is what gets stored.
pub fn prepare_user(user: &NewUser) -> Result<NewUser, AppError> {
    let prepared = NewUser {
        username: user.username.trim().to_string(),
        email: user.email.trim().to_lowercase(),
        password_hash: user.password_hash.clone(),
    };

    let mut errors = ValidationErrors::new();
    if let Some(msg) = USERNAME.check(&prepared.username) {
        errors.push(msg);
    }
    if !Pattern::Email.is_match(&prepared.email) {
        errors.push(ErrorMessage::EmailInvalid);
    }
    into_result(errors)?;

    Ok(prepared)
}

/// Applies the post schema to a new post.
pub fn check_post(post: &NewPost) -> Result<(), AppError> {
    let mut errors = ValidationErrors::new();
    if let Some(msg) = TITLE.check(&post.title) {
        errors.push(msg);
    }
    if let Some(msg) = BODY.check(&post.body) {
        errors.push(msg);
    }
    into_result(errors)
}

/// Applies the post schema to the fields an update supplies.
pub fn check_post_update(update: &PostUpdate) -> Result<(), AppError> {
    let mut errors = ValidationErrors::new();
    if let Some(msg) = update.title.as_deref().and_then(|t| TITLE.check(t)) {
        errors.push(msg);
    }
    if let Some(msg) = update.body.as_deref().and_then(|b| BODY.check(b)) {
        errors.push(msg);
    }
    into_result(errors)
}

/// Canonical form of an entity identifier for lookups.
#[must_use]
pub fn normalize_id(id: &str) -> String {
    id.to_ascii_lowercase()
}
