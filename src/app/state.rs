//! Application state management.
//!
//! This module provides the shared application state that is
//! accessible to all request handlers via Axum's State extractor.

use std::sync::Arc;

use crate::domain::{DatabaseClient, PasswordHasher, TokenService};
use crate::infra::PrometheusHandle;

use super::service::BlogService;

/// Shared application state for the Axum web server.
///
/// All contained types are wrapped in `Arc` and implement `Send + Sync`,
/// making `AppState` safe to share across async tasks.
///
/// # Example
///
/// ```ignore
/// let state = AppState::new(db, hasher, tokens);
///
/// let router = create_router(Arc::new(state));
/// ```
#[derive(Clone)]
pub struct AppState {
    /// The application service containing business logic.
    pub service: Arc<BlogService>,

    /// Prometheus handle; `None` when no recorder is installed.
    pub metrics_handle: Option<Arc<PrometheusHandle>>,
}

impl AppState {
    /// Wires a [`BlogService`] to the provided adapters.
    #[must_use]
    pub fn new(
        db_client: Arc<dyn DatabaseClient>,
        password_hasher: Arc<dyn PasswordHasher>,
        token_service: Arc<dyn TokenService>,
    ) -> Self {
        Self::with_service(Arc::new(BlogService::new(
            db_client,
            password_hasher,
            token_service,
        )))
    }

    /// Creates a new `AppState` with a custom service.
    #[must_use]
    pub fn with_service(service: Arc<BlogService>) -> Self {
        Self {
            service,
            metrics_handle: None,
        }
    }

    /// Attaches the Prometheus handle rendered by `GET /metrics`.
    #[must_use]
    pub fn with_metrics(mut self, handle: Option<Arc<PrometheusHandle>>) -> Self {
        self.metrics_handle = handle;
        self
    }
}
