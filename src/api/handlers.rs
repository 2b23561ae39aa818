//! HTTP request handlers.
//!
//! Each handler validates the raw body against its rule set, then calls the
//! service. Errors are rendered with [`EndpointError`], which knows the
//! status each endpoint uses for failures the client cannot act on.

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use crate::app::AppState;
use crate::domain::{
    AppError, Credentials, DatabaseError, ErrorsResponse, HealthResponse, HealthStatus,
    MessageResponse, NewPost, PostUpdate, Principal, Registration, ResponseMessage,
    TokenResponse, ValidationErrors,
};

use super::payload::Payload;
use super::validation::{RequestView, RuleSet, rules};

/// Endpoints whose error rendering differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Register,
    Login,
    CreatePost,
    UpdatePost,
    DeletePost,
    Other,
}

impl Endpoint {
    /// Status used when the failure is not the client's fault.
    #[must_use]
    pub const fn unexpected_status(self) -> StatusCode {
        match self {
            Self::Login => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// An [`AppError`] bound to the endpoint that produced it.
#[derive(Debug)]
pub struct EndpointError {
    pub endpoint: Endpoint,
    pub error: AppError,
}

impl EndpointError {
    pub fn new(endpoint: Endpoint, error: impl Into<AppError>) -> Self {
        Self {
            endpoint,
            error: error.into(),
        }
    }
}

fn errors(status: StatusCode, errors: &ValidationErrors) -> Response {
    (status, Json(ErrorsResponse::new(errors.messages()))).into_response()
}

fn message(status: StatusCode, message: ResponseMessage) -> Response {
    (status, Json(MessageResponse::new(message))).into_response()
}

impl IntoResponse for EndpointError {
    fn into_response(self) -> Response {
        let Self { endpoint, error } = self;

        match &error {
            AppError::Validation(e) | AppError::Database(DatabaseError::Constraint(e)) => {
                errors(StatusCode::BAD_REQUEST, e)
            }
            AppError::MissingCredentials(e) => errors(StatusCode::UNAUTHORIZED, e),
            AppError::AuthFailed => message(StatusCode::UNAUTHORIZED, ResponseMessage::AuthFailed),
            AppError::TokenInvalid => {
                message(StatusCode::UNAUTHORIZED, ResponseMessage::TokenInvalid)
            }
            AppError::NotFound(m) => message(StatusCode::NOT_FOUND, *m),
            AppError::MalformedBody => message(StatusCode::BAD_REQUEST, ResponseMessage::BadRequest),
            AppError::Database(_)
            | AppError::Credential(_)
            | AppError::Config(_)
            | AppError::Internal(_) => {
                let status = endpoint.unexpected_status();
                error!(endpoint = ?endpoint, status = %status, error = %error, "Unexpected error");
                message(status, ResponseMessage::InternalServerError)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        EndpointError::new(Endpoint::Other, self).into_response()
    }
}

fn validate(endpoint: Endpoint, rules: &RuleSet, payload: &Payload) -> Result<(), EndpointError> {
    rules.validate(&RequestView::body(payload)).map_err(|e| {
        warn!(rule_set = rules.name, errors = %e, "Request validation failed");
        EndpointError::new(endpoint, e)
    })
}

/// `POST /register`
pub async fn register_handler(
    State(state): State<Arc<AppState>>,
    payload: Payload,
) -> Result<(StatusCode, Json<MessageResponse>), EndpointError> {
    let endpoint = Endpoint::Register;
    validate(endpoint, &rules::REGISTRATION, &payload)?;

    let registration = Registration {
        username: payload.required_string("username"),
        email: payload.required_string("email"),
        password: payload.required_string("password"),
    };
    state
        .service
        .register(registration)
        .await
        .map_err(|e| EndpointError::new(endpoint, e))?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(ResponseMessage::UserRegistered)),
    ))
}

/// `POST /login`
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    payload: Payload,
) -> Result<Json<TokenResponse>, EndpointError> {
    let endpoint = Endpoint::Login;
    validate(endpoint, &rules::LOGIN, &payload)?;

    let credentials = Credentials {
        username: payload.required_string("username"),
        password: payload.required_string("password"),
    };
    let token = state
        .service
        .login(credentials)
        .await
        .map_err(|e| EndpointError::new(endpoint, e))?;

    Ok(Json(TokenResponse { token }))
}

/// `POST /posts`
pub async fn create_post_handler(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    mut payload: Payload,
) -> Result<(StatusCode, Json<MessageResponse>), EndpointError> {
    let endpoint = Endpoint::CreatePost;
    payload.set_text("username", principal.username());
    validate(endpoint, &rules::POST_CREATION, &payload)?;

    let post = NewPost::new(
        payload.required_string("title"),
        payload.required_string("body"),
        payload.required_string("username"),
    );
    state
        .service
        .create_post(post)
        .await
        .map_err(|e| EndpointError::new(endpoint, e))?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(ResponseMessage::PostCreated)),
    ))
}

/// `PUT /posts`
pub async fn update_post_handler(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    mut payload: Payload,
) -> Result<(StatusCode, Json<MessageResponse>), EndpointError> {
    let endpoint = Endpoint::UpdatePost;
    payload.set_text("username", principal.username());
    validate(endpoint, &rules::POST_UPDATE, &payload)?;

    let id = payload.required_string("id");
    let update = PostUpdate {
        title: payload.string("title"),
        body: payload.string("body"),
        username: payload.required_string("username"),
    };
    state
        .service
        .update_post(&id, update)
        .await
        .map_err(|e| EndpointError::new(endpoint, e))?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(ResponseMessage::PostUpdated)),
    ))
}

/// `DELETE /posts`
pub async fn delete_post_handler(
    State(state): State<Arc<AppState>>,
    payload: Payload,
) -> Result<StatusCode, EndpointError> {
    let endpoint = Endpoint::DeletePost;
    validate(endpoint, &rules::POST_DELETION, &payload)?;

    let id = payload.required_string("id");
    state
        .service
        .delete_post(&id)
        .await
        .map_err(|e| EndpointError::new(endpoint, e))?;

    Ok(StatusCode::NO_CONTENT)
}

/// Detailed health check
pub async fn health_check_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let health = state.service.health_check().await;
    Json(health)
}

/// Kubernetes liveness probe
pub async fn liveness_handler() -> StatusCode {
    StatusCode::OK
}

/// Kubernetes readiness probe
pub async fn readiness_handler(State(state): State<Arc<AppState>>) -> StatusCode {
    let health = state.service.health_check().await;
    match health.status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Prometheus scrape endpoint
pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> Response {
    match &state.metrics_handle {
        Some(handle) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
