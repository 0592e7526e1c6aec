//! Error types for the Hearth application.
//!
//! Domain errors (authentication, configuration) live in submodules and are aggregated
//! into [`Error`] together with the external library errors. Every error maps to an HTTP
//! response through `IntoResponse`.

pub mod auth;
pub mod config;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    error::{auth::AuthError, config::ConfigError},
    model::api::ErrorDto,
};

/// Main error type for the Hearth application.
///
/// Uses `thiserror`'s `#[from]` conversions so the `?` operator lifts database, session and
/// password hashing failures into a single type.
#[derive(Error, Debug)]
pub enum Error {
    /// `DATABASE_URL` missing or `SESSION_COOKIE_NAME` malformed.
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Authentication error (credentials, session user).
    #[error(transparent)]
    AuthError(#[from] AuthError),
    /// User, permission or grant query failed.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Session store or session value (de)serialization failure.
    #[error(transparent)]
    SessionError(#[from] tower_sessions::session::Error),
    /// Password hashing error (malformed hash parameters).
    #[error(transparent)]
    PasswordHashError(#[from] argon2::password_hash::Error),
    /// Server I/O error (binding the listener, serving connections).
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

/// Maps errors to HTTP responses.
///
/// # Returns
/// - 401 Unauthorized - Invalid credentials
/// - 404 Not Found - No user in session
/// - 500 Internal Server Error - Everything else (logged)
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::AuthError(err) => err.into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper converting any displayable error into a 500 response.
///
/// Logs the full message and returns a generic body so internal details are not exposed.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}
