//! User entity model and DTOs.

use serde::{Deserialize, Serialize};
use skillswap_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`UserResponse`] (own profile / admin views) or
/// [`PublicUser`] (what other members see).
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub full_name: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub availability: Option<String>,
    pub profile_photo: Option<String>,
    pub is_public: bool,
    pub is_active: bool,
    pub is_admin: bool,
    pub failed_login_count: i32,
    pub locked_until: Option<Timestamp>,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for the owner's own profile and admin listings.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub availability: Option<String>,
    pub profile_photo: Option<String>,
    pub is_public: bool,
    pub is_active: bool,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            full_name: user.full_name,
            location: user.location,
            bio: user.bio,
            availability: user.availability,
            profile_photo: user.profile_photo,
            is_public: user.is_public,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

/// What other members see of a public profile (no email, no flags).
#[derive(Debug, Clone, Serialize)]
pub struct PublicUser {
    pub id: DbId,
    pub username: String,
    pub full_name: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub profile_photo: Option<String>,
    pub availability: Option<String>,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        PublicUser {
            id: user.id,
            username: user.username,
            full_name: user.full_name,
            location: user.location,
            bio: user.bio,
            profile_photo: user.profile_photo,
            availability: user.availability,
        }
    }
}

/// DTO for inserting a new user. `password_hash` is already hashed.
#[derive(Debug)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub full_name: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub availability: Option<String>,
    pub is_public: bool,
}

/// Patch DTO for profile updates. Only supplied fields are applied.
#[derive(Debug, Deserialize)]
pub struct UpdateUser {
    pub full_name: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub availability: Option<String>,
    pub profile_photo: Option<String>,
    pub is_public: Option<bool>,
}

/// Filters for the public member search.
#[derive(Debug, Default)]
pub struct UserSearchFilter {
    /// Substring match on offered skill names.
    pub skill: Option<String>,
    /// Substring match on offered skill categories.
    pub category: Option<String>,
    /// Substring match on the user's location.
    pub location: Option<String>,
}
