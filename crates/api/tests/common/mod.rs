//! Shared helpers for HTTP-level integration tests.
//!
//! Builds the real application router (same middleware stack as `main.rs`)
//! over the `#[sqlx::test]`-provided pool, and provides request/seeding
//! helpers used across the test files.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use skillswap_api::auth::jwt::{generate_access_token, JwtConfig};
use skillswap_api::config::ServerConfig;
use skillswap_api::router::build_app_router;
use skillswap_api::state::AppState;
use skillswap_core::roles::role_name;
use skillswap_db::models::skill::{CreateSkill, Skill};
use skillswap_db::models::user::{CreateUser, User};
use skillswap_db::repositories::{SkillRepo, UserRepo};

/// Build a test `ServerConfig` with safe defaults (strict transitions).
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        permissive_transitions: false,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Build the full application router with the default (strict) test config.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_config(pool, test_config())
}

/// Build the app with the legacy-compatible permissive transition policy.
pub fn build_test_app_permissive(pool: PgPool) -> Router {
    let mut config = test_config();
    config.permissive_transitions = true;
    build_test_app_with_config(pool, config)
}

/// Build the app router with an explicit config, mirroring `main.rs`.
pub fn build_test_app_with_config(pool: PgPool, config: ServerConfig) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, "GET", uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, "GET", uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, "POST", uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, "POST", uri, Some(token), Some(body)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, "POST", uri, Some(token), None).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, "PUT", uri, Some(token), Some(body)).await
}

pub async fn put_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, "PUT", uri, Some(token), None).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, "DELETE", uri, Some(token), None).await
}

/// Collect a response body into parsed JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Seeding helpers
// ---------------------------------------------------------------------------

/// Create a user directly in the database with a placeholder password hash.
///
/// Tests that exercise the login flow itself hash a real password instead;
/// everything else mints tokens via [`token_for`] and never logs in.
pub async fn seed_user(pool: &PgPool, username: &str, is_admin: bool) -> User {
    let input = CreateUser {
        username: username.to_string(),
        email: format!("{username}@test.com"),
        password_hash: "not-a-real-hash".to_string(),
        full_name: None,
        location: None,
        bio: None,
        availability: None,
        is_public: true,
    };
    let user = UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed");
    if is_admin {
        sqlx::query("UPDATE users SET is_admin = TRUE WHERE id = $1")
            .bind(user.id)
            .execute(pool)
            .await
            .expect("admin flag update should succeed");
    }
    UserRepo::find_by_id(pool, user.id)
        .await
        .expect("user lookup should succeed")
        .expect("user must exist")
}

/// Mint a valid access token for a seeded user using the test JWT config.
pub fn token_for(user: &User) -> String {
    generate_access_token(user.id, role_name(user.is_admin), &test_config().jwt)
        .expect("token generation should succeed")
}

/// Create an approved skill directly in the database.
pub async fn seed_skill(pool: &PgPool, name: &str) -> Skill {
    let input = CreateSkill {
        name: name.to_string(),
        category: None,
        description: None,
    };
    SkillRepo::create(pool, &input)
        .await
        .expect("skill creation should succeed")
}

/// Put a skill into a user's offered set.
pub async fn give_offered_skill(pool: &PgPool, user: &User, skill: &Skill) {
    UserRepo::add_offered(pool, user.id, skill.id)
        .await
        .expect("adding offered skill should succeed");
}
