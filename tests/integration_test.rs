//! Integration tests for the API.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use blog_api::api::create_router;
use blog_api::app::AppState;
use blog_api::domain::{ErrorMessage, HealthResponse, HealthStatus, Principal, TokenService};
use blog_api::test_utils::{MockDatabaseClient, MockPasswordHasher, test_token_service};

const STRONG_PASSWORD: &str = "Aa1!aaaa";
const UNKNOWN_ID: &str = "675db12edc29a15ed143e37e";

fn create_test_state(db: Arc<MockDatabaseClient>) -> Arc<AppState> {
    Arc::new(AppState::new(
        db,
        Arc::new(MockPasswordHasher::new()),
        Arc::new(test_token_service()),
    ))
}

fn create_test_router() -> Router {
    create_router(create_test_state(Arc::new(MockDatabaseClient::new())))
}

fn bearer(username: &str) -> String {
    let token = test_token_service()
        .issue(&Principal::new(username))
        .unwrap();
    format!("Bearer {token}")
}

fn json_request(method: &str, uri: &str, auth: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn errors(messages: &[ErrorMessage]) -> Value {
    json!({ "errors": messages.iter().map(|m| json!({ "msg": m.as_str() })).collect::<Vec<_>>() })
}

// Registration

#[tokio::test]
async fn test_register_success() {
    let router = create_test_router();

    let (status, body) = send(
        &router,
        json_request(
            "POST",
            "/register",
            None,
            &json!({ "username": "newUser", "email": "email@random.com", "password": STRONG_PASSWORD }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "message": "Successful user registration" }));
}

#[tokio::test]
async fn test_register_missing_username() {
    let router = create_test_router();

    let (status, body) = send(
        &router,
        json_request(
            "POST",
            "/register",
            None,
            &json!({ "email": "email@random.com", "password": "AB,_La(2M-IoxAX" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, errors(&[ErrorMessage::UsernameRequired]));
}

#[tokio::test]
async fn test_register_accumulates_every_failure() {
    let router = create_test_router();

    let (status, body) = send(&router, json_request("POST", "/register", None, &json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        errors(&[
            ErrorMessage::UsernameRequired,
            ErrorMessage::EmailRequired,
            ErrorMessage::PasswordRequired,
            ErrorMessage::PasswordIsWeak,
        ])
    );
}

#[tokio::test]
async fn test_register_weak_password() {
    let router = create_test_router();

    let (status, body) = send(
        &router,
        json_request(
            "POST",
            "/register",
            None,
            &json!({ "username": "u1234", "email": "email@random.com", "password": "8XXV4FrMdqt6r2g" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, errors(&[ErrorMessage::PasswordIsWeak]));
}

#[tokio::test]
async fn test_register_short_username_rejected_by_store() {
    let router = create_test_router();

    let (status, body) = send(
        &router,
        json_request(
            "POST",
            "/register",
            None,
            &json!({ "username": "ab", "email": "a@b.com", "password": STRONG_PASSWORD }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, errors(&[ErrorMessage::UsernameMinLength]));
}

#[tokio::test]
async fn test_register_invalid_email_rejected_by_store() {
    let router = create_test_router();

    let (status, body) = send(
        &router,
        json_request(
            "POST",
            "/register",
            None,
            &json!({ "username": "newUser", "email": "emailrandom.com", "password": STRONG_PASSWORD }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, errors(&[ErrorMessage::EmailInvalid]));
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let router = create_test_router();
    let payload =
        json!({ "username": "newUser", "email": "email@random.com", "password": STRONG_PASSWORD });

    let (status, _) = send(&router, json_request("POST", "/register", None, &payload)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&router, json_request("POST", "/register", None, &payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, errors(&[ErrorMessage::UsernameUnique]));
}

#[tokio::test]
async fn test_register_store_failure_is_500() {
    let router = create_router(create_test_state(Arc::new(MockDatabaseClient::failing(
        "Connection refused",
    ))));

    let (status, body) = send(
        &router,
        json_request(
            "POST",
            "/register",
            None,
            &json!({ "username": "newUser", "email": "email@random.com", "password": STRONG_PASSWORD }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "message": "Internal Server Error" }));
}

#[tokio::test]
async fn test_malformed_body() {
    let router = create_test_router();

    for raw in ["{not json", "[1, 2, 3]", "\"text\""] {
        let request = Request::builder()
            .method("POST")
            .uri("/register")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(raw))
            .unwrap();

        let (status, body) = send(&router, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {raw}");
        assert_eq!(body, json!({ "message": "Bad Request" }));
    }
}

#[tokio::test]
async fn test_empty_body_is_treated_as_empty_object() {
    let router = create_test_router();
    let request = Request::builder()
        .method("POST")
        .uri("/login")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(&router, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        errors(&[
            ErrorMessage::UsernameRequired,
            ErrorMessage::PasswordRequired,
            ErrorMessage::PasswordIsWeak,
        ])
    );
}

// Login

#[tokio::test]
async fn test_login_store_failure_is_400() {
    let router = create_router(create_test_state(Arc::new(MockDatabaseClient::failing(
        "Connection refused",
    ))));

    let (status, body) = send(
        &router,
        json_request(
            "POST",
            "/login",
            None,
            &json!({ "username": "newUser", "password": STRONG_PASSWORD }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "message": "Internal Server Error" }));
}

#[tokio::test]
async fn test_login_unknown_user() {
    let router = create_test_router();

    let (status, body) = send(
        &router,
        json_request(
            "POST",
            "/login",
            None,
            &json!({ "username": "nobody", "password": STRONG_PASSWORD }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "message": "Authentication failed" }));
}

// Posts: authorization

#[tokio::test]
async fn test_posts_require_token() {
    let router = create_test_router();

    for method in ["POST", "PUT", "DELETE"] {
        let (status, body) = send(&router, json_request(method, "/posts", None, &json!({}))).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED, "method: {method}");
        assert_eq!(body, errors(&[ErrorMessage::TokenRequired]));
    }
}

#[tokio::test]
async fn test_posts_reject_invalid_token() {
    let router = create_test_router();

    for auth in ["Bearer garbage", "Token abc", "abc"] {
        let (status, body) = send(
            &router,
            json_request("POST", "/posts", Some(auth), &json!({ "title": "T", "body": "B" })),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED, "auth: {auth}");
        assert_eq!(body, json!({ "message": "Invalid or expired token" }));
    }
}

#[tokio::test]
async fn test_token_checked_before_body_validation() {
    let router = create_test_router();

    let (status, body) = send(&router, json_request("DELETE", "/posts", None, &json!({}))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, errors(&[ErrorMessage::TokenRequired]));
}

// Posts: creation

#[tokio::test]
async fn test_create_post_success_attributed_to_token_holder() {
    let db = Arc::new(MockDatabaseClient::new());
    let router = create_router(create_test_state(db.clone()));

    let (status, body) = send(
        &router,
        json_request(
            "POST",
            "/posts",
            Some(&bearer("firstUser")),
            &json!({ "title": "This is my first blogPost", "body": "Body text", "username": "spoofed" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "message": "Successful blogpost creation" }));

    let posts = db.get_all_posts();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].username, "firstUser");
}

#[tokio::test]
async fn test_create_post_missing_fields() {
    let router = create_test_router();

    let (status, body) = send(
        &router,
        json_request("POST", "/posts", Some(&bearer("firstUser")), &json!({ "title": null })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        errors(&[ErrorMessage::TitleRequired, ErrorMessage::BodyRequired])
    );
}

#[tokio::test]
async fn test_create_post_length_rejected_by_store() {
    let router = create_test_router();

    let (status, body) = send(
        &router,
        json_request(
            "POST",
            "/posts",
            Some(&bearer("firstUser")),
            &json!({ "title": "ab", "body": "b".repeat(3001) }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        errors(&[ErrorMessage::TitleMinLength, ErrorMessage::BodyMaxLength])
    );
}

// Posts: update and deletion

#[tokio::test]
async fn test_update_id_failures() {
    let router = create_test_router();
    let auth = bearer("firstUser");

    let cases = [
        (json!({}), vec![ErrorMessage::IdRequired, ErrorMessage::IdInvalid, ErrorMessage::IdLength]),
        (json!({ "id": "67*db12ed*29a1*ed143e37e" }), vec![ErrorMessage::IdInvalid]),
        (json!({ "id": "675db12edc29a15ed" }), vec![ErrorMessage::IdLength]),
    ];

    for (payload, expected) in cases {
        let (status, body) = send(&router, json_request("PUT", "/posts", Some(&auth), &payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload: {payload}");
        assert_eq!(body, errors(&expected));
    }
}

#[tokio::test]
async fn test_update_unknown_post() {
    let router = create_test_router();

    let (status, body) = send(
        &router,
        json_request(
            "PUT",
            "/posts",
            Some(&bearer("firstUser")),
            &json!({ "id": UNKNOWN_ID, "title": "A new title" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Blogpost was not found" }));
}

#[tokio::test]
async fn test_update_short_title() {
    let router = create_test_router();

    let (status, body) = send(
        &router,
        json_request(
            "PUT",
            "/posts",
            Some(&bearer("firstUser")),
            &json!({ "id": UNKNOWN_ID, "title": "ab" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, errors(&[ErrorMessage::TitleMinLength]));
}

#[tokio::test]
async fn test_delete_unknown_post() {
    let router = create_test_router();

    let (status, body) = send(
        &router,
        json_request("DELETE", "/posts", Some(&bearer("firstUser")), &json!({ "id": UNKNOWN_ID })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Blogpost was not found" }));
}

#[tokio::test]
async fn test_delete_store_failure_is_500() {
    let router = create_router(create_test_state(Arc::new(MockDatabaseClient::failing(
        "Connection refused",
    ))));

    let (status, body) = send(
        &router,
        json_request("DELETE", "/posts", Some(&bearer("firstUser")), &json!({ "id": UNKNOWN_ID })),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "message": "Internal Server Error" }));
}

// Operational endpoints

#[tokio::test]
async fn test_health_check() {
    let db = Arc::new(MockDatabaseClient::new());
    let router = create_router(create_test_state(db.clone()));

    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let health: HealthResponse = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(health.status, HealthStatus::Healthy);
    assert_eq!(health.database, HealthStatus::Healthy);

    db.set_healthy(false);
    let request = Request::builder().uri("/health/ready").body(Body::empty()).unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let request = Request::builder().uri("/health/live").body(Body::empty()).unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_metrics_without_recorder() {
    let router = create_test_router();

    let request = Request::builder().uri("/metrics").body(Body::empty()).unwrap();
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// Validation failures never reach the store

#[tokio::test]
async fn test_rejected_requests_leave_store_untouched() {
    let db = Arc::new(MockDatabaseClient::new());
    let router = create_router(create_test_state(db.clone()));
    let auth = bearer("firstUser");

    let requests = [
        json_request(
            "POST",
            "/register",
            None,
            &json!({ "username": "newUser", "email": "email@random.com", "password": "weak" }),
        ),
        json_request("POST", "/posts", Some(&auth), &json!({ "title": "Only a title" })),
        json_request(
            "PUT",
            "/posts",
            Some(&auth),
            &json!({ "id": "675db12edc29a15ed", "title": "A new title" }),
        ),
        json_request("DELETE", "/posts", Some(&auth), &json!({ "id": "67*db12ed*29a1*ed143e37e" })),
    ];

    for request in requests {
        let route = format!("{} {}", request.method(), request.uri());
        let (status, _) = send(&router, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "route: {route}");
    }

    assert_eq!(db.call_count(), 0);
    assert_eq!(db.user_count(), 0);
    assert!(db.get_all_posts().is_empty());
}

// Body limit

#[tokio::test]
async fn test_oversized_body_rejected() {
    let db = Arc::new(MockDatabaseClient::new());
    let router = create_router(create_test_state(db.clone()));
    let body = json!({
        "username": "newUser",
        "email": "email@random.com",
        "password": STRONG_PASSWORD,
        "padding": "a".repeat(200 * 1024),
    })
    .to_string();

    let request = Request::builder()
        .method("POST")
        .uri("/register")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::CONTENT_LENGTH, body.len())
        .body(Body::from(body))
        .unwrap();
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(db.call_count(), 0);
}
