//! Database fixtures and in-memory model factories.
//!
//! - `user` - auth users
//! - `group` - auth groups

pub mod group;
pub mod user;
