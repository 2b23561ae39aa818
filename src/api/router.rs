//! HTTP routing configuration.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    http::StatusCode,
    middleware,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::app::AppState;

use super::handlers::{
    create_post_handler, delete_post_handler, health_check_handler, liveness_handler,
    login_handler, metrics_handler, readiness_handler, register_handler, update_post_handler,
};
use super::middleware::require_auth;

/// Largest accepted request body, in bytes.
pub const MAX_BODY_BYTES: usize = 100 * 1024;

/// Request timeout applied to every route.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let layers = ServiceBuilder::new()
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        // Timeout needs a `Default` response body, so it sits inside the limit
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            REQUEST_TIMEOUT,
        ));

    // Every method on /posts requires a bearer token
    let post_routes = Router::new()
        .route(
            "/",
            post(create_post_handler)
                .put(update_post_handler)
                .delete(delete_post_handler),
        )
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&app_state),
            require_auth,
        ));

    let health_routes = Router::new()
        .route("/", get(health_check_handler))
        .route("/live", get(liveness_handler))
        .route("/ready", get(readiness_handler));

    Router::new()
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
        .nest("/posts", post_routes)
        .nest("/health", health_routes)
        .route("/metrics", get(metrics_handler))
        .layer(layers)
        .with_state(app_state)
}
