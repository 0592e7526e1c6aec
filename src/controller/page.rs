//! Sample pages exercised by the test utilities.

use axum::{extract::State, response::IntoResponse, Form};
use tower_sessions::Session;

use crate::{
    controller::util::render_page,
    error::Error,
    model::{
        app::AppState,
        form::{UserCreationData, UserCreationForm},
        page::PageContext,
        session::message::SessionMessages,
    },
};

/// Page that queues a success and an error message and renders them
///
/// # Responses
/// - 200 (OK): Page context with the messages "test success" and "test error"
/// - 500 (Internal Server Error): Session storage failed
pub async fn get_test(session: Session) -> Result<impl IntoResponse, Error> {
    SessionMessages::success(&session, "test success").await?;
    SessionMessages::error(&session, "test error").await?;

    render_page(&session, PageContext::default()).await
}

/// Renders an unbound user creation form
pub async fn show_post_test(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let form = UserCreationForm::unbound().validate(&state.db).await?;

    render_page(&session, PageContext::default().with_form("form", form)).await
}

/// Binds the submitted data to a user creation form and renders it with its errors
///
/// The user is not created; the page only reports validation results.
///
/// # Responses
/// - 200 (OK): Page context with the bound form under `"form"`
/// - 500 (Internal Server Error): Username lookup failed
pub async fn post_test(
    State(state): State<AppState>,
    session: Session,
    Form(data): Form<UserCreationData>,
) -> Result<impl IntoResponse, Error> {
    let form = UserCreationForm::bound(data).validate(&state.db).await?;

    render_page(&session, PageContext::default().with_form("form", form)).await
}
