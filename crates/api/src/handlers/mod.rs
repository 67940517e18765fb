//! Request handlers.
//!
//! Each submodule provides async handler functions for a single resource.
//! Handlers delegate to the corresponding repository in `skillswap_db`,
//! enforce domain rules via `skillswap_core`, and map errors via
//! [`crate::error::AppError`].

pub mod admin;
pub mod auth;
pub mod feedback;
pub mod skills;
pub mod swaps;
pub mod users;
