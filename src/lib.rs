//! Blog API
//!
//! REST backend for a blogging application: account registration, token
//! login, and authenticated creation, update and deletion of posts.
//!
//! # Architecture Overview
//!
//! This crate is organized into four main layers:
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                   API Layer                  │
//! │  handlers, routing, auth, request validation │
//! ├─────────────────────────────────────────────┤
//! │               Application Layer              │
//! │     use cases, configuration, app state      │
//! ├─────────────────────────────────────────────┤
//! │                 Domain Layer                 │
//! │  traits, types, messages, errors, patterns   │
//! ├─────────────────────────────────────────────┤
//! │             Infrastructure Layer             │
//! │  PostgreSQL, Argon2, JWT, logging, metrics   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Request validation never stops at the first failure: every rule of an
//! endpoint's rule set runs, and the response lists every failing message in
//! declaration order. The store applies its own schema before writing and
//! reports violations in the same vocabulary.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use blog_api::api::create_router;
//! use blog_api::app::AppState;
//! use blog_api::infra::{Argon2PasswordHasher, JwtTokenService, PostgresClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let db = Arc::new(PostgresClient::with_defaults(&database_url).await?);
//!     let hasher = Arc::new(Argon2PasswordHasher::new());
//!     let tokens = Arc::new(JwtTokenService::new(&secret, 3600));
//!
//!     let state = Arc::new(AppState::new(db, hasher, tokens));
//!     let router = create_router(state);
//!     axum::serve(listener, router).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod app;
pub mod domain;
pub mod infra;

// Test utilities are available in tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
