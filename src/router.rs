//! HTTP routing.

use axum::{
    routing::{get, post},
    Router,
};
use tower_sessions::{MemoryStore, SessionManagerLayer};

use crate::{controller, model::app::AppState};

/// Builds the application's routes.
///
/// # Registered Endpoints
/// - `GET /test/get/` - Page that renders two flash messages
/// - `GET /test/post/` - Unbound user creation form
/// - `POST /test/post/` - Bound user creation form with validation errors
/// - `POST /auth/login` - Log in with username and password
/// - `POST /auth/logout` - Log out
/// - `GET /auth/user` - Current user
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/test/get/", get(controller::page::get_test))
        .route(
            "/test/post/",
            get(controller::page::show_post_test).post(controller::page::post_test),
        )
        .route("/auth/login", post(controller::auth::login))
        .route("/auth/logout", post(controller::auth::logout))
        .route("/auth/user", get(controller::auth::get_user))
}

/// Applies state and the session layer, producing a router ready to serve.
pub fn app(state: AppState, session: SessionManagerLayer<MemoryStore>) -> Router {
    routes().with_state(state).layer(session)
}
