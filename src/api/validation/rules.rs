//! Per-endpoint rule sets.
//!
//! Message order in a failed response follows declaration order here.

use super::pipeline::{Check, FieldCheck, FieldRule, RuleSet};
use crate::domain::{ENTITY_ID_LENGTH, ErrorMessage, Pattern};

const ID_LENGTH: u64 = ENTITY_ID_LENGTH as u64;

const USERNAME_REQUIRED: &[FieldCheck] =
    &[FieldCheck::new(Check::Required, ErrorMessage::UsernameRequired)];

const EMAIL_REQUIRED: &[FieldCheck] =
    &[FieldCheck::new(Check::Required, ErrorMessage::EmailRequired)];

const STRONG_PASSWORD: &[FieldCheck] = &[
    FieldCheck::new(Check::Required, ErrorMessage::PasswordRequired),
    FieldCheck::new(
        Check::Matches(Pattern::StrongPassword),
        ErrorMessage::PasswordIsWeak,
    ),
];

const TITLE_REQUIRED: &[FieldCheck] =
    &[FieldCheck::new(Check::Required, ErrorMessage::TitleRequired)];

const BODY_REQUIRED: &[FieldCheck] =
    &[FieldCheck::new(Check::Required, ErrorMessage::BodyRequired)];

const TITLE_LENGTH: &[FieldCheck] = &[
    FieldCheck::new(
        Check::Length { min: 3, max: None },
        ErrorMessage::TitleMinLength,
    ),
    FieldCheck::new(
        Check::Length { min: 0, max: Some(150) },
        ErrorMessage::TitleMaxLength,
    ),
];

const BODY_LENGTH: &[FieldCheck] = &[
    FieldCheck::new(
        Check::Length { min: 3, max: None },
        ErrorMessage::BodyMinLength,
    ),
    FieldCheck::new(
        Check::Length { min: 0, max: Some(3000) },
        ErrorMessage::BodyMaxLength,
    ),
];

const POST_ID: &[FieldCheck] = &[
    FieldCheck::new(Check::Required, ErrorMessage::IdRequired),
    FieldCheck::new(Check::Matches(Pattern::Hexadecimal), ErrorMessage::IdInvalid),
    FieldCheck::new(
        Check::Length { min: ID_LENGTH, max: Some(ID_LENGTH) },
        ErrorMessage::IdLength,
    ),
];

const TOKEN_REQUIRED: &[FieldCheck] =
    &[FieldCheck::new(Check::Required, ErrorMessage::TokenRequired)];

/// `POST /register`
pub const REGISTRATION: RuleSet = RuleSet {
    name: "registration",
    rules: &[
        FieldRule::body("username", USERNAME_REQUIRED),
        FieldRule::body("email", EMAIL_REQUIRED),
        FieldRule::body("password", STRONG_PASSWORD),
    ],
};

/// `POST /login`
pub const LOGIN: RuleSet = RuleSet {
    name: "login",
    rules: &[
        FieldRule::body("username", USERNAME_REQUIRED),
        FieldRule::body("password", STRONG_PASSWORD),
    ],
};

/// `POST /posts`
pub const POST_CREATION: RuleSet = RuleSet {
    name: "post-creation",
    rules: &[
        FieldRule::body("title", TITLE_REQUIRED),
        FieldRule::body("body", BODY_REQUIRED),
        FieldRule::body("username", USERNAME_REQUIRED),
    ],
};

/// `PUT /posts`
pub const POST_UPDATE: RuleSet = RuleSet {
    name: "post-update",
    rules: &[
        FieldRule::body("id", POST_ID),
        FieldRule::body("title", TITLE_LENGTH).optional(),
        FieldRule::body("body", BODY_LENGTH).optional(),
        FieldRule::body("username", USERNAME_REQUIRED),
    ],
};

/// `DELETE /posts`
pub const POST_DELETION: RuleSet = RuleSet {
    name: "post-deletion",
    rules: &[FieldRule::body("id", POST_ID)],
};

/// Bearer token presence, checked before token verification.
pub const AUTHORIZATION_HEADER: RuleSet = RuleSet {
    name: "authorization-header",
    rules: &[FieldRule::header("authorization", TOKEN_REQUIRED)],
};
