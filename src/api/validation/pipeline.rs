//! Runtime executor for declarative field rules.
//!
//! Every check of every rule runs, in declaration order, and each failing
//! check contributes its message. Nothing short-circuits: an absent password
//! reports both "required" and "weak".

use axum::http::HeaderMap;
use validator::ValidateLength;

use crate::api::payload::Payload;
use crate::domain::{ErrorMessage, Pattern, ValidationErrors};

/// Where a field is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Body,
    Header,
}

/// A single predicate over a field's text.
///
/// Absent and `null` values are evaluated as the empty string by
/// [`Check::Matches`] and [`Check::Length`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    /// Present, not null, not the empty string
    Required,
    /// Matches the named pattern
    Matches(Pattern),
    /// Character count within `min..=max` (no upper bound when `max` is `None`)
    Length { min: u64, max: Option<u64> },
}

impl Check {
    fn passes(self, value: Option<&str>) -> bool {
        let text = value.unwrap_or_default();
        match self {
            Self::Required => !text.is_empty(),
            Self::Matches(pattern) => pattern.is_match(text),
            Self::Length { min, max } => text.validate_length(Some(min), max, None),
        }
    }
}

/// A check paired with the message it reports on failure.
#[derive(Debug, Clone, Copy)]
pub struct FieldCheck {
    pub check: Check,
    pub message: ErrorMessage,
}

impl FieldCheck {
    pub const fn new(check: Check, message: ErrorMessage) -> Self {
        Self { check, message }
    }
}

/// Ordered checks for one field.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: &'static str,
    pub source: Source,
    /// Skip every check when the field is absent
    pub optional: bool,
    pub checks: &'static [FieldCheck],
}

impl FieldRule {
    pub const fn body(field: &'static str, checks: &'static [FieldCheck]) -> Self {
        Self {
            field,
            source: Source::Body,
            optional: false,
            checks,
        }
    }

    pub const fn header(field: &'static str, checks: &'static [FieldCheck]) -> Self {
        Self {
            field,
            source: Source::Header,
            optional: false,
            checks,
        }
    }

    pub const fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

/// The parts of a request rules can read.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestView<'a> {
    body: Option<&'a Payload>,
    headers: Option<&'a HeaderMap>,
}

impl<'a> RequestView<'a> {
    #[must_use]
    pub fn body(body: &'a Payload) -> Self {
        Self {
            body: Some(body),
            headers: None,
        }
    }

    #[must_use]
    pub fn headers(headers: &'a HeaderMap) -> Self {
        Self {
            body: None,
            headers: Some(headers),
        }
    }

    fn contains(&self, source: Source, field: &str) -> bool {
        match source {
            Source::Body => self.body.is_some_and(|b| b.contains(field)),
            Source::Header => self.headers.is_some_and(|h| h.contains_key(field)),
        }
    }

    fn value(&self, source: Source, field: &str) -> Option<String> {
        match source {
            Source::Body => self.body.and_then(|b| b.string(field)),
            Source::Header => self
                .headers
                .and_then(|h| h.get(field))
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
        }
    }
}

/// Named, ordered collection of field rules for one endpoint.
#[derive(Debug, Clone, Copy)]
pub struct RuleSet {
    pub name: &'static str,
    pub rules: &'static [FieldRule],
}

impl RuleSet {
    /// Runs every check and returns all failures in declaration order.
    pub fn validate(&self, request: &RequestView<'_>) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        for rule in self.rules {
            if rule.optional && !request.contains(rule.source, rule.field) {
                continue;
            }
            let value = request.value(rule.source, rule.field);
            for field_check in rule.checks {
                if !field_check.check.passes(value.as_deref()) {
                    errors.push(field_check.message);
                }
            }
        }

        errors.into_result()
    }
}
