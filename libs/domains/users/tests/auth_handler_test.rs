//! Handler tests for the auth endpoints
//!
//! These exercise the full register/login/me/logout flow against the
//! in-memory store, including the middleware that guards /me and /logout.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use axum_helpers::{JwtConfig, NoopRevocation, TokenCodec};
use chrono::Utc;
use domain_users::*;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt; // For oneshot()
use uuid::Uuid;

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Router over a fresh in-memory store with the default role seeded.
async fn test_app() -> Router {
    let store = Arc::new(InMemoryUserStore::new());
    RoleRepository::create(
        store.as_ref(),
        Role {
            id: Uuid::new_v4(),
            name: DEFAULT_ROLE.to_string(),
            description: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        },
    )
    .await
    .unwrap();

    let codec = Arc::new(TokenCodec::new(&JwtConfig::new(
        "integration-test-secret-0123456789ab".to_string(),
    )));
    let auth = Arc::new(AuthService::new(
        store.clone(),
        store,
        codec,
        Arc::new(NoopRevocation),
    ));
    auth_handlers::router(auth)
}

fn register_body(username: &str, email: &str) -> Body {
    Body::from(
        serde_json::to_string(&json!({
            "email": email,
            "username": username,
            "password": "hunter22",
            "full_name": "Ada Lovelace"
        }))
        .unwrap(),
    )
}

async fn register(app: &Router, username: &str, email: &str) -> RegisterResponse {
    let request = Request::builder()
        .method("POST")
        .uri("/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(register_body(username, email))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response.into_body()).await
}

#[tokio::test]
async fn test_register_returns_201_with_token_and_user() {
    let app = test_app().await;
    let created = register(&app, "ada", "ada@example.com").await;

    assert_eq!(created.token_type, "bearer");
    assert!(!created.access_token.is_empty());
    assert_eq!(created.user.username, "ada");
    assert!(created.user.is_active);
    assert!(created.user.role_id.is_some());
}

#[tokio::test]
async fn test_register_never_leaks_the_password_hash() {
    let app = test_app().await;

    let request = Request::builder()
        .method("POST")
        .uri("/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(register_body("ada", "ada@example.com"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    let body: Value = json_body(response.into_body()).await;
    assert!(body["user"].get("hashed_password").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email_returns_400() {
    let app = test_app().await;
    register(&app, "ada", "ada@example.com").await;

    let request = Request::builder()
        .method("POST")
        .uri("/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(register_body("different", "ada@example.com"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Email already registered");
}

#[tokio::test]
async fn test_register_duplicate_username_returns_400() {
    let app = test_app().await;
    register(&app, "ada", "ada@example.com").await;

    let request = Request::builder()
        .method("POST")
        .uri("/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(register_body("ada", "other@example.com"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Username already taken");
}

#[tokio::test]
async fn test_register_email_conflict_wins_when_both_clash() {
    let app = test_app().await;
    register(&app, "ada", "ada@example.com").await;

    // Same email AND same username: the email message is reported.
    let request = Request::builder()
        .method("POST")
        .uri("/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(register_body("ada", "ada@example.com"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Email already registered");
}

#[tokio::test]
async fn test_register_validates_input() {
    let app = test_app().await;

    let request = Request::builder()
        .method("POST")
        .uri("/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "email": "ada@example.com",
                "username": "ada",
                "password": "short"
            }))
            .unwrap(),
        ))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_with_form_credentials_returns_token() {
    let app = test_app().await;
    register(&app, "ada", "ada@example.com").await;

    let request = Request::builder()
        .method("POST")
        .uri("/login")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("username=ada&password=hunter22"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let token: TokenResponse = json_body(response.into_body()).await;
    assert_eq!(token.token_type, "bearer");
}

#[tokio::test]
async fn test_login_unknown_user_and_wrong_password_answer_identically() {
    let app = test_app().await;
    register(&app, "ada", "ada@example.com").await;

    let unknown = Request::builder()
        .method("POST")
        .uri("/login")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("username=ghost&password=hunter22"))
        .unwrap();
    let unknown = app.clone().oneshot(unknown).await.unwrap();

    let wrong = Request::builder()
        .method("POST")
        .uri("/login")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("username=ada&password=wrong-password"))
        .unwrap();
    let wrong = app.oneshot(wrong).await.unwrap();

    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);

    let unknown_body: Value = json_body(unknown.into_body()).await;
    let wrong_body: Value = json_body(wrong.into_body()).await;
    assert_eq!(unknown_body, wrong_body);
    assert_eq!(unknown_body["message"], "Incorrect username or password");
}

#[tokio::test]
async fn test_login_failure_carries_bearer_challenge() {
    let app = test_app().await;

    let request = Request::builder()
        .method("POST")
        .uri("/login")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("username=ghost&password=hunter22"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(
        response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
        "Bearer"
    );
}

#[tokio::test]
async fn test_me_returns_the_authenticated_user() {
    let app = test_app().await;
    let created = register(&app, "ada", "ada@example.com").await;

    let request = Request::builder()
        .method("GET")
        .uri("/me")
        .header(
            header::AUTHORIZATION,
            format!("Bearer {}", created.access_token),
        )
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let user: UserResponse = json_body(response.into_body()).await;
    assert_eq!(user.username, "ada");
    assert_eq!(user.id, created.user.id);
}

#[tokio::test]
async fn test_me_without_token_returns_401() {
    let app = test_app().await;

    let request = Request::builder()
        .method("GET")
        .uri("/me")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_with_garbage_token_returns_401() {
    let app = test_app().await;

    let request = Request::builder()
        .method("GET")
        .uri("/me")
        .header(header::AUTHORIZATION, "Bearer not-a-jwt")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Could not validate credentials");
}

#[tokio::test]
async fn test_logout_acknowledges_and_token_stays_usable_without_a_store() {
    let app = test_app().await;
    let created = register(&app, "ada", "ada@example.com").await;
    let bearer = format!("Bearer {}", created.access_token);

    let request = Request::builder()
        .method("POST")
        .uri("/logout")
        .header(header::AUTHORIZATION, bearer.clone())
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["message"], "Successfully logged out");

    // Stateless tokens survive logout when no revocation store is wired.
    let request = Request::builder()
        .method("GET")
        .uri("/me")
        .header(header::AUTHORIZATION, bearer)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
