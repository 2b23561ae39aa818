//! Loosely-typed JSON request body.
//!
//! Validation has to tell an absent key from `null` from `""`, and must
//! report every failure rather than the first deserialization error, so
//! handlers receive the raw JSON object and validate it before reading
//! typed values out of it.

use std::borrow::Cow;

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde_json::{Map, Value};

use crate::domain::AppError;

/// JSON object body. An empty request body is an empty object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payload(Map<String, Value>);

impl Payload {
    /// Parses a request body; anything other than a JSON object is rejected.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, AppError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        match serde_json::from_slice::<Value>(bytes) {
            Ok(Value::Object(map)) => Ok(Self(map)),
            _ => Err(AppError::MalformedBody),
        }
    }

    /// Whether the key is present, even when its value is `null`.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Text form of a field: strings as-is, other scalars and nested values
    /// by their JSON text, `None` for absent or `null`.
    #[must_use]
    pub fn text(&self, field: &str) -> Option<Cow<'_, str>> {
        match self.0.get(field)? {
            Value::Null => None,
            Value::String(s) => Some(Cow::Borrowed(s)),
            other => Some(Cow::Owned(other.to_string())),
        }
    }

    /// Owned text form of a field; see [`Payload::text`].
    #[must_use]
    pub fn string(&self, field: &str) -> Option<String> {
        self.text(field).map(Cow::into_owned)
    }

    /// Owned text form of a field, empty when absent. Only meaningful after
    /// validation has established the field is present.
    #[must_use]
    pub fn required_string(&self, field: &str) -> String {
        self.string(field).unwrap_or_default()
    }

    /// Sets a string field, replacing any client-supplied value.
    pub fn set_text(&mut self, field: &str, value: impl Into<String>) {
        self.0.insert(field.to_string(), Value::String(value.into()));
    }
}

impl From<Map<String, Value>> for Payload {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<S> FromRequest<S> for Payload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|_| AppError::MalformedBody)?;
        Self::from_slice(&bytes)
    }
}
