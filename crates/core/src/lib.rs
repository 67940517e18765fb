//! Domain logic for the SkillSwap platform.
//!
//! This crate is I/O-free: it defines the error taxonomy, shared type
//! aliases, and the pure validation/authorization rules that the `db` and
//! `api` crates enforce at their boundaries. The swap-request state machine
//! in [`swap`] is the heart of the platform.

pub mod error;
pub mod feedback;
pub mod roles;
pub mod skill;
pub mod swap;
pub mod types;
