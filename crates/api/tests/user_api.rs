//! HTTP-level integration tests for profiles, the privacy gate, member
//! search, and the offered/wanted skill-set endpoints.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, get_auth, give_offered_skill, post_auth, put_json_auth, seed_skill,
    seed_user, token_for,
};
use serde_json::json;
use sqlx::PgPool;

/// `GET /users/me` returns the caller's own profile including email.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_me(pool: PgPool) {
    let alice = seed_user(&pool, "alice", false).await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/users/me", &token_for(&alice)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["username"], "alice");
    assert_eq!(json["data"]["email"], "alice@test.com");
}

/// Profile patches apply only supplied fields.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_me_partial(pool: PgPool) {
    let alice = seed_user(&pool, "alice", false).await;
    let app = common::build_test_app(pool);
    let token = token_for(&alice);

    let response = put_json_auth(
        app.clone(),
        "/api/v1/users/me",
        &token,
        json!({ "bio": "I teach guitar", "location": "Porto" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = put_json_auth(
        app,
        "/api/v1/users/me",
        &token,
        json!({ "location": "Faro" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["location"], "Faro");
    assert_eq!(json["data"]["bio"], "I teach guitar", "untouched field must survive");
}

/// Private profiles are visible to their owner only.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_private_profile_gate(pool: PgPool) {
    let alice = seed_user(&pool, "alice", false).await;
    let bob = seed_user(&pool, "bob", false).await;
    sqlx::query("UPDATE users SET is_public = FALSE WHERE id = $1")
        .bind(bob.id)
        .execute(&pool)
        .await
        .unwrap();
    let app = common::build_test_app(pool);

    let response = get_auth(
        app.clone(),
        &format!("/api/v1/users/{}", bob.id),
        &token_for(&alice),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["error"], "This profile is private");

    // The owner still sees it, and the skill listings share the gate.
    let response = get_auth(
        app.clone(),
        &format!("/api/v1/users/{}", bob.id),
        &token_for(&bob),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(
        app,
        &format!("/api/v1/users/{}/skills/offered", bob.id),
        &token_for(&alice),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// Public profile responses omit the email address.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_public_profile_omits_email(pool: PgPool) {
    let alice = seed_user(&pool, "alice", false).await;
    let bob = seed_user(&pool, "bob", false).await;
    let app = common::build_test_app(pool);

    let response = get_auth(
        app,
        &format!("/api/v1/users/{}", bob.id),
        &token_for(&alice),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["username"], "bob");
    assert!(json["data"].get("email").is_none(), "public view must omit email");
}

/// Adding twice and removing twice are no-op successes, and
/// membership reflects in the listing.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_skill_set_idempotency(pool: PgPool) {
    let alice = seed_user(&pool, "alice", false).await;
    let guitar = seed_skill(&pool, "Guitar").await;
    let app = common::build_test_app(pool);
    let token = token_for(&alice);
    let uri = format!("/api/v1/users/me/skills/offered/{}", guitar.id);

    for _ in 0..2 {
        let response = post_auth(app.clone(), &uri, &token).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = get_auth(
        app.clone(),
        &format!("/api/v1/users/{}/skills/offered", alice.id),
        &token,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1, "no duplicate membership");

    for _ in 0..2 {
        let response = delete_auth(app.clone(), &uri, &token).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = get_auth(
        app,
        &format!("/api/v1/users/{}/skills/offered", alice.id),
        &token,
    )
    .await;
    let json = body_json(response).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}

/// Adding a nonexistent skill to a set fails NotFound.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_skill_set_unknown_skill(pool: PgPool) {
    let alice = seed_user(&pool, "alice", false).await;
    let app = common::build_test_app(pool);

    let response = post_auth(
        app,
        "/api/v1/users/me/skills/wanted/999999",
        &token_for(&alice),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Search matches offered skills, excludes the caller, and hides private or
/// banned members.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_search_users(pool: PgPool) {
    let alice = seed_user(&pool, "alice", false).await;
    let bob = seed_user(&pool, "bob", false).await;
    let carol = seed_user(&pool, "carol", false).await;
    let dave = seed_user(&pool, "dave", false).await;
    let guitar = seed_skill(&pool, "Guitar").await;

    give_offered_skill(&pool, &alice, &guitar).await;
    give_offered_skill(&pool, &bob, &guitar).await;
    give_offered_skill(&pool, &carol, &guitar).await;
    give_offered_skill(&pool, &dave, &guitar).await;

    sqlx::query("UPDATE users SET is_public = FALSE WHERE id = $1")
        .bind(carol.id)
        .execute(&pool)
        .await
        .unwrap();
    skillswap_db::repositories::UserRepo::set_active(&pool, dave.id, false)
        .await
        .unwrap();

    let app = common::build_test_app(pool);

    let response = get_auth(
        app.clone(),
        "/api/v1/users/search?skill=guit",
        &token_for(&alice),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let usernames: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["username"].as_str().unwrap())
        .collect();
    assert_eq!(usernames, vec!["bob"], "only public, active, non-caller members match");

    // A needle matching no offered skill returns nothing.
    let response = get_auth(app, "/api/v1/users/search?skill=violin", &token_for(&alice)).await;
    let json = body_json(response).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}
