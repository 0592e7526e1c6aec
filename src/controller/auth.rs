use axum::{extract::State, http::StatusCode, response::IntoResponse, Form, Json};
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    data::permission::PermissionRepository,
    error::{auth::AuthError, Error},
    model::{api::UserDto, app::AppState, session::message::SessionMessages},
    service::auth::{self, AuthService},
};

#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Logs a user in with username and password
///
/// # Responses
/// - 200 (OK): The logged in user
/// - 401 (Unauthorized): Unknown user, wrong password or inactive user
/// - 500 (Internal Server Error): Database or session failure
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<impl IntoResponse, Error> {
    let Some(user) = AuthService::new(&state.db)
        .authenticate(&form.username, &form.password)
        .await?
    else {
        return Err(AuthError::InvalidCredentials.into());
    };

    auth::login(&session, &user).await?;
    SessionMessages::success(&session, format!("Logged in as {}", user.username)).await?;

    let permissions = PermissionRepository::new(&state.db)
        .get_user_permissions(user.id)
        .await?;

    Ok(Json(UserDto {
        id: user.id,
        username: user.username,
        permissions,
    }))
}

/// Logs the user out by deleting their session
///
/// # Responses
/// - 204 (No Content): Session deleted, or there was none
/// - 500 (Internal Server Error): The session store failed
pub async fn logout(session: Session) -> Result<impl IntoResponse, Error> {
    auth::logout(&session).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Returns the logged in user
///
/// # Responses
/// - 200 (OK): The user and their permissions
/// - 404 (Not Found): No user in session, or the session user no longer exists
/// - 500 (Internal Server Error): Database or session failure
pub async fn get_user(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let Some(user) = AuthService::new(&state.db).current_user(&session).await? else {
        return Err(AuthError::UserNotInSession.into());
    };

    let permissions = PermissionRepository::new(&state.db)
        .get_user_permissions(user.id)
        .await?;

    Ok(Json(UserDto {
        id: user.id,
        username: user.username,
        permissions,
    }))
}
