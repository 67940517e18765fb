//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - Request-body DTOs for the API layer where the resource has them
//! - A create DTO for inserts, built by handlers (never directly from a body
//!   when the row carries caller identity)
//! - Safe `Serialize` response structs where the entity has private fields

pub mod admin_message;
pub mod feedback;
pub mod session;
pub mod skill;
pub mod stats;
pub mod swap_request;
pub mod user;
