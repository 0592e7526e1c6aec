//! SeaORM entities for hearth's authentication tables.

pub mod prelude;

pub mod auth_group;
pub mod auth_permission;
pub mod auth_user;
pub mod auth_user_permission;
