//! Test context structure and utilities.
//!
//! [`TestContext`] is returned by [`TestBuilder::build`](crate::TestBuilder::build) and owns
//! everything a test talks to: a private in-memory SQLite database, the session store the
//! hearth router reads sessions from, and the configuration the router is built with.

use axum::Router;
use hearth::{
    config::{Config, DEFAULT_BIND_ADDRESS},
    model::app::AppState,
};
use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};
use tower_sessions::MemoryStore;

use crate::{client::Client, constant::TEST_DATABASE_URL, error::TestError};

/// Test context structure returned by `TestBuilder`
///
/// ```ignore
/// let test = TestBuilder::new().with_auth_tables().build().await?;
///
/// let user = test.user().insert_user("alice").await?;
///
/// let mut client = test.client();
/// client.login_as(LoginAs::new().user(user)).await?;
///
/// let response = client.get("/test/get/").await?;
/// response.assert_message_count(2);
/// ```
pub struct TestContext {
    /// Connection to the in-memory SQLite database
    pub db: DatabaseConnection,
    /// Session store shared by the router and every client of this context
    pub store: MemoryStore,
    /// Configuration the router is built with
    pub config: Config,
}

impl TestContext {
    /// Create a new test context with an empty database.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Database connected, no tables created yet
    /// - `Err(TestError::DbErr)` - Database connection failed
    pub(crate) async fn new(session_cookie_name: String) -> Result<Self, TestError> {
        let db = Database::connect(TEST_DATABASE_URL).await?;

        Ok(Self {
            db,
            store: MemoryStore::default(),
            config: Config {
                database_url: TEST_DATABASE_URL.to_string(),
                session_cookie_name,
                bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            },
        })
    }

    /// Create database tables from schema statements.
    pub(crate) async fn with_tables(
        &self,
        stmts: Vec<TableCreateStatement>,
    ) -> Result<(), TestError> {
        for stmt in stmts {
            self.db.execute(&stmt).await?;
        }

        Ok(())
    }

    pub fn app_state(&self) -> AppState {
        AppState {
            db: self.db.clone(),
        }
    }

    /// The hearth application, wired to this context's database and session store.
    pub fn router(&self) -> Router {
        hearth::router::app(
            self.app_state(),
            hearth::startup::session_layer(&self.config, self.store.clone()),
        )
    }

    /// A client with an empty cookie jar.
    pub fn client(&self) -> Client {
        Client::new(
            self.router(),
            self.db.clone(),
            self.store.clone(),
            self.config.session_cookie_name.clone(),
        )
    }
}
