//! HTTP request handlers.

pub mod auth;
pub mod page;
pub mod util;
