//! Integration tests for the swap-request repository against a real
//! database: the pending-tuple partial unique index, patch semantics, and
//! the per-user listing contract.

use assert_matches::assert_matches;
use skillswap_core::swap::Direction;
use skillswap_core::types::DbId;
use skillswap_db::models::skill::CreateSkill;
use skillswap_db::models::swap_request::CreateSwapRequest;
use skillswap_db::models::user::CreateUser;
use skillswap_db::repositories::{SkillRepo, SwapRequestRepo, UserRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn new_user(pool: &PgPool, username: &str) -> DbId {
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
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
        .id
}

async fn new_skill(pool: &PgPool, name: &str) -> DbId {
    let input = CreateSkill {
        name: name.to_string(),
        category: None,
        description: None,
    };
    SkillRepo::create(pool, &input)
        .await
        .expect("skill creation should succeed")
        .id
}

fn tuple(requester: DbId, requested: DbId, offered: DbId, wanted: DbId) -> CreateSwapRequest {
    CreateSwapRequest {
        requester_id: requester,
        requested_id: requested,
        skill_offered_id: offered,
        skill_wanted_id: wanted,
        message: None,
    }
}

/// Assert an error is a 23505 on the given constraint/index name.
fn assert_unique_violation(err: sqlx::Error, constraint: &str) {
    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.code().as_deref(), Some("23505"));
            assert_eq!(db_err.constraint(), Some(constraint));
        }
        other => panic!("expected a database error, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// The pending-tuple invariant lives in the database
// ---------------------------------------------------------------------------

/// Two pending rows with the identical tuple cannot coexist; the second
/// insert fails on uq_swap_requests_pending_tuple. This is what serializes
/// racing duplicate creations regardless of any application precheck.
#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_pending_tuple_rejected_by_index(pool: PgPool) {
    let alice = new_user(&pool, "alice").await;
    let bob = new_user(&pool, "bob").await;
    let guitar = new_skill(&pool, "Guitar").await;
    let spanish = new_skill(&pool, "Spanish").await;

    let input = tuple(alice, bob, guitar, spanish);
    SwapRequestRepo::create(&pool, &input)
        .await
        .expect("first insert should succeed");

    let err = SwapRequestRepo::create(&pool, &input)
        .await
        .expect_err("duplicate pending insert must fail");
    assert_unique_violation(err, "uq_swap_requests_pending_tuple");
}

/// A settled request with the same tuple does not block a new pending one.
#[sqlx::test(migrations = "./migrations")]
async fn test_settled_tuple_frees_the_slot(pool: PgPool) {
    let alice = new_user(&pool, "alice").await;
    let bob = new_user(&pool, "bob").await;
    let guitar = new_skill(&pool, "Guitar").await;
    let spanish = new_skill(&pool, "Spanish").await;

    let input = tuple(alice, bob, guitar, spanish);
    let first = SwapRequestRepo::create(&pool, &input).await.unwrap();

    SwapRequestRepo::update(&pool, first.id, Some("cancelled"), None)
        .await
        .unwrap()
        .expect("request must exist");

    let second = SwapRequestRepo::create(&pool, &input)
        .await
        .expect("tuple must be free once the first request left pending");
    assert_ne!(first.id, second.id);

    assert!(
        SwapRequestRepo::exists_pending_tuple(&pool, alice, bob, guitar, spanish)
            .await
            .unwrap()
    );
}

/// Tuples differing in any component coexist while pending.
#[sqlx::test(migrations = "./migrations")]
async fn test_distinct_tuples_coexist(pool: PgPool) {
    let alice = new_user(&pool, "alice").await;
    let bob = new_user(&pool, "bob").await;
    let carol = new_user(&pool, "carol").await;
    let guitar = new_skill(&pool, "Guitar").await;
    let spanish = new_skill(&pool, "Spanish").await;
    let french = new_skill(&pool, "French").await;

    SwapRequestRepo::create(&pool, &tuple(alice, bob, guitar, spanish)).await.unwrap();
    SwapRequestRepo::create(&pool, &tuple(alice, bob, guitar, french)).await.unwrap();
    SwapRequestRepo::create(&pool, &tuple(alice, carol, guitar, spanish)).await.unwrap();
    SwapRequestRepo::create(&pool, &tuple(bob, alice, spanish, guitar)).await.unwrap();
}

/// The distinct-parties CHECK rejects self-swaps even at the storage layer.
#[sqlx::test(migrations = "./migrations")]
async fn test_self_swap_rejected_by_check(pool: PgPool) {
    let alice = new_user(&pool, "alice").await;
    let guitar = new_skill(&pool, "Guitar").await;

    let err = SwapRequestRepo::create(&pool, &tuple(alice, alice, guitar, guitar))
        .await
        .expect_err("self-swap must violate the CHECK constraint");
    assert_matches!(err, sqlx::Error::Database(_));
}

// ---------------------------------------------------------------------------
// Patch semantics
// ---------------------------------------------------------------------------

/// Only supplied fields change, and updated_at always refreshes.
#[sqlx::test(migrations = "./migrations")]
async fn test_update_patches_only_supplied_fields(pool: PgPool) {
    let alice = new_user(&pool, "alice").await;
    let bob = new_user(&pool, "bob").await;
    let guitar = new_skill(&pool, "Guitar").await;
    let spanish = new_skill(&pool, "Spanish").await;

    let mut input = tuple(alice, bob, guitar, spanish);
    input.message = Some("original message".to_string());
    let created = SwapRequestRepo::create(&pool, &input).await.unwrap();

    // Status-only patch: message untouched.
    let updated = SwapRequestRepo::update(&pool, created.id, Some("accepted"), None)
        .await
        .unwrap()
        .expect("request must exist");
    assert_eq!(updated.status, "accepted");
    assert_eq!(updated.message.as_deref(), Some("original message"));
    assert!(updated.updated_at >= created.updated_at);

    // Message-only patch: status untouched.
    let updated = SwapRequestRepo::update(&pool, created.id, None, Some("new message"))
        .await
        .unwrap()
        .expect("request must exist");
    assert_eq!(updated.status, "accepted");
    assert_eq!(updated.message.as_deref(), Some("new message"));
}

/// Updating a missing row returns None; a status outside the CHECK fails.
#[sqlx::test(migrations = "./migrations")]
async fn test_update_edge_cases(pool: PgPool) {
    let alice = new_user(&pool, "alice").await;
    let bob = new_user(&pool, "bob").await;
    let guitar = new_skill(&pool, "Guitar").await;
    let spanish = new_skill(&pool, "Spanish").await;

    let result = SwapRequestRepo::update(&pool, 999_999, Some("accepted"), None)
        .await
        .unwrap();
    assert!(result.is_none());

    let created = SwapRequestRepo::create(&pool, &tuple(alice, bob, guitar, spanish))
        .await
        .unwrap();
    let err = SwapRequestRepo::update(&pool, created.id, Some("approved"), None)
        .await
        .expect_err("a status outside the CHECK constraint must fail");
    assert_matches!(err, sqlx::Error::Database(_));
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// Direction arms partition sent/received; `All` unions them.
#[sqlx::test(migrations = "./migrations")]
async fn test_list_for_user_directions(pool: PgPool) {
    let alice = new_user(&pool, "alice").await;
    let bob = new_user(&pool, "bob").await;
    let carol = new_user(&pool, "carol").await;
    let guitar = new_skill(&pool, "Guitar").await;
    let spanish = new_skill(&pool, "Spanish").await;

    let sent = SwapRequestRepo::create(&pool, &tuple(alice, bob, guitar, spanish))
        .await
        .unwrap();
    let received = SwapRequestRepo::create(&pool, &tuple(carol, alice, spanish, guitar))
        .await
        .unwrap();
    // Unrelated to alice.
    SwapRequestRepo::create(&pool, &tuple(bob, carol, guitar, spanish))
        .await
        .unwrap();

    let rows = SwapRequestRepo::list_for_user(&pool, alice, Direction::Sent, None)
        .await
        .unwrap();
    assert_eq!(rows.iter().map(|r| r.id).collect::<Vec<_>>(), vec![sent.id]);

    let rows = SwapRequestRepo::list_for_user(&pool, alice, Direction::Received, None)
        .await
        .unwrap();
    assert_eq!(rows.iter().map(|r| r.id).collect::<Vec<_>>(), vec![received.id]);

    let rows = SwapRequestRepo::list_for_user(&pool, alice, Direction::All, None)
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);

    // Status filter restricts to exact matches.
    SwapRequestRepo::update(&pool, sent.id, Some("completed"), None)
        .await
        .unwrap();
    let rows = SwapRequestRepo::list_for_user(&pool, alice, Direction::All, Some("completed"))
        .await
        .unwrap();
    assert_eq!(rows.iter().map(|r| r.id).collect::<Vec<_>>(), vec![sent.id]);
}

/// Deletion removes the row; deleting again reports false.
#[sqlx::test(migrations = "./migrations")]
async fn test_delete(pool: PgPool) {
    let alice = new_user(&pool, "alice").await;
    let bob = new_user(&pool, "bob").await;
    let guitar = new_skill(&pool, "Guitar").await;
    let spanish = new_skill(&pool, "Spanish").await;

    let created = SwapRequestRepo::create(&pool, &tuple(alice, bob, guitar, spanish))
        .await
        .unwrap();

    assert!(SwapRequestRepo::delete(&pool, created.id).await.unwrap());
    assert!(!SwapRequestRepo::delete(&pool, created.id).await.unwrap());
    assert!(SwapRequestRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .is_none());
}
