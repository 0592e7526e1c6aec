use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("User ID is not present in session")]
    UserNotInSession,
    #[error("Please enter a correct username and password")]
    InvalidCredentials,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::UserNotInSession => {
                tracing::debug!("{}", self);

                StatusCode::NOT_FOUND
            }
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
        };

        let error = match self {
            Self::UserNotInSession => "User not found".to_string(),
            err => err.to_string(),
        };

        (status, Json(ErrorDto { error })).into_response()
    }
}
