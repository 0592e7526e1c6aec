//! Application data models: API DTOs, shared state, flash messages, forms, the rendered
//! page context and typed session entries.

pub mod api;
pub mod app;
pub mod form;
pub mod message;
pub mod page;
pub mod session;
