//! HTTP-level integration tests for the feedback ledger: party constraints,
//! rating bounds, and the rollup arithmetic.

mod common;

use axum::http::StatusCode;
use axum::Router;
use common::{
    body_json, get_auth, give_offered_skill, post_json_auth, put_json_auth, seed_skill, seed_user,
    token_for,
};
use serde_json::json;
use skillswap_core::types::DbId;
use skillswap_db::models::user::User;
use sqlx::PgPool;

/// Seed Alice/Bob with a swap request between them, returning its id.
async fn seed_swap(pool: &PgPool, app: Router) -> (User, User, DbId) {
    let alice = seed_user(pool, "alice", false).await;
    let bob = seed_user(pool, "bob", false).await;
    let guitar = seed_skill(pool, "Guitar").await;
    let spanish = seed_skill(pool, "Spanish").await;
    give_offered_skill(pool, &alice, &guitar).await;
    give_offered_skill(pool, &bob, &spanish).await;

    let body = json!({
        "requested_id": bob.id,
        "skill_offered_id": guitar.id,
        "skill_wanted_id": spanish.id,
    });
    let response = post_json_auth(app, "/api/v1/swaps", &token_for(&alice), body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();
    (alice, bob, id)
}

/// After completion, Alice rates Bob 5 stars and the
/// ledger-wide average becomes 5.0.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_feedback_after_completed_swap(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (alice, bob, swap_id) = seed_swap(&pool, app.clone()).await;
    let admin = seed_user(&pool, "root", true).await;

    // Bob accepts, Alice completes.
    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/swaps/{swap_id}"),
        &token_for(&bob),
        json!({ "status": "accepted" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/swaps/{swap_id}"),
        &token_for(&alice),
        json!({ "status": "completed" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Alice leaves 5-star feedback for Bob.
    let body = json!({
        "swap_request_id": swap_id,
        "receiver_id": bob.id,
        "rating": 5,
        "comment": "Great teacher!",
    });
    let response = post_json_auth(app.clone(), "/api/v1/feedback", &token_for(&alice), body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["giver_id"], alice.id);
    assert_eq!(json["data"]["receiver_id"], bob.id);
    assert_eq!(json["data"]["rating"], 5);

    // Bob's received-feedback listing has exactly this entry.
    let response = get_auth(
        app.clone(),
        &format!("/api/v1/users/{}/feedback", bob.id),
        &token_for(&alice),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["comment"], "Great teacher!");

    // Ledger rollup: one entry, average 5.0.
    let response = get_auth(app, "/api/v1/admin/reports/feedback", &token_for(&admin)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["total_feedback"], 1);
    assert_eq!(json["data"]["average_rating"], 5.0);
    assert_eq!(json["data"]["min_rating"], 5);
    assert_eq!(json["data"]["max_rating"], 5);
}

/// Feedback is accepted regardless of the request's status.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_feedback_allowed_while_pending(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (alice, bob, swap_id) = seed_swap(&pool, app.clone()).await;

    let body = json!({
        "swap_request_id": swap_id,
        "receiver_id": bob.id,
        "rating": 3,
    });
    let response = post_json_auth(app, "/api/v1/feedback", &token_for(&alice), body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

/// Giver and receiver must be the two distinct parties.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_feedback_party_constraints(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (alice, bob, swap_id) = seed_swap(&pool, app.clone()).await;
    let carol = seed_user(&pool, "carol", false).await;

    // A stranger cannot give feedback on the request.
    let body = json!({
        "swap_request_id": swap_id,
        "receiver_id": bob.id,
        "rating": 4,
    });
    let response = post_json_auth(app.clone(), "/api/v1/feedback", &token_for(&carol), body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");

    // The receiver must be a party.
    let body = json!({
        "swap_request_id": swap_id,
        "receiver_id": carol.id,
        "rating": 4,
    });
    let response = post_json_auth(app.clone(), "/api/v1/feedback", &token_for(&alice), body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Giver and receiver must differ.
    let body = json!({
        "swap_request_id": swap_id,
        "receiver_id": alice.id,
        "rating": 4,
    });
    let response = post_json_auth(app.clone(), "/api/v1/feedback", &token_for(&alice), body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Either direction between the real parties is fine.
    let body = json!({
        "swap_request_id": swap_id,
        "receiver_id": alice.id,
        "rating": 4,
    });
    let response = post_json_auth(app, "/api/v1/feedback", &token_for(&bob), body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

/// Out-of-range ratings fail validation; the boundaries pass.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_rating_bounds(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (alice, bob, swap_id) = seed_swap(&pool, app.clone()).await;

    for rating in [0, 6, -3] {
        let body = json!({
            "swap_request_id": swap_id,
            "receiver_id": bob.id,
            "rating": rating,
        });
        let response =
            post_json_auth(app.clone(), "/api/v1/feedback", &token_for(&alice), body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "rating {rating} must fail");
        let json = body_json(response).await;
        assert_eq!(json["error"], "Rating must be between 1 and 5");
    }

    for rating in [1, 5] {
        let body = json!({
            "swap_request_id": swap_id,
            "receiver_id": bob.id,
            "rating": rating,
        });
        let response =
            post_json_auth(app.clone(), "/api/v1/feedback", &token_for(&alice), body).await;
        assert_eq!(response.status(), StatusCode::CREATED, "rating {rating} must pass");
    }
}

/// Feedback on a nonexistent request fails NotFound.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_feedback_unknown_request(pool: PgPool) {
    let alice = seed_user(&pool, "alice", false).await;
    let app = common::build_test_app(pool);

    let body = json!({
        "swap_request_id": 999_999,
        "receiver_id": alice.id,
        "rating": 5,
    });
    let response = post_json_auth(app, "/api/v1/feedback", &token_for(&alice), body).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
