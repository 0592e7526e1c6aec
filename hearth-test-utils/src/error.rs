use thiserror::Error;

use crate::query::ResultSetError;

#[derive(Error, Debug)]
pub enum TestError {
    #[error("Can't login with user {0}")]
    LoginFailed(String),
    #[error("Invalid permission name {0:?}, expected \"app_label.codename\"")]
    InvalidPermissionName(String),
    #[error("Permission {0:?} does not exist")]
    PermissionNotFound(String),
    #[error(transparent)]
    ResultSetError(#[from] ResultSetError),
    #[error(transparent)]
    HearthError(#[from] hearth::error::Error),
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    #[error(transparent)]
    SessionError(#[from] tower_sessions::session::Error),
    #[error(transparent)]
    HttpError(#[from] axum::http::Error),
    #[error(transparent)]
    BodyError(#[from] axum::Error),
    #[error(transparent)]
    FormError(#[from] serde_urlencoded::ser::Error),
    #[error(transparent)]
    JsonError(#[from] serde_json::Error),
}
