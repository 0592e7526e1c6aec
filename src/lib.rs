//! Hearth web application.
//!
//! A small axum application that owns user authentication, sessions, flash messages,
//! form validation and per-user permissions. `hearth-test-utils` drives it in-process
//! from test suites.

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
