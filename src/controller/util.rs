use axum::Json;
use tower_sessions::Session;

use crate::{
    error::Error,
    model::{page::PageContext, session::message::SessionMessages},
};

/// Renders a page context, consuming the session's pending flash messages.
pub async fn render_page(session: &Session, context: PageContext) -> Result<Json<PageContext>, Error> {
    let mut messages = SessionMessages::drain(session).await?;
    messages.extend(context.messages);

    Ok(Json(PageContext { messages, ..context }))
}
