//! Typed session entries.
//!
//! Each submodule wraps one piece of session state (logged in user, pending flash
//! messages) with methods for inserting, reading and removing it through tower-sessions.

pub mod message;
pub mod user;
