//! HTTP middleware for API layer.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{Request, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::app::AppState;
use crate::domain::AppError;

use super::validation::{RequestView, rules};

/// Bearer-token authentication for the post routes.
///
/// A missing header is reported through the header rule set; a header that
/// does not carry a valid token is rejected as invalid. On success the
/// resolved [`Principal`](crate::domain::Principal) is inserted into the
/// request extensions.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    rules::AUTHORIZATION_HEADER
        .validate(&RequestView::headers(request.headers()))
        .map_err(|e| {
            warn!("Auth failed: missing authorization header");
            AppError::MissingCredentials(e)
        })?;

    let principal = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::TokenInvalid)
        .and_then(|bearer| state.service.authenticate(bearer))
        .inspect_err(|_| warn!("Auth failed: invalid token"))?;

    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}
