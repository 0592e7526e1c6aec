use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend, Schema};
use time::Duration;
use tower_sessions::{cookie::SameSite, Expiry, MemoryStore, SessionManagerLayer};
use tracing_subscriber::EnvFilter;

use crate::{config::Config, data::permission::PermissionRepository, error::Error};

/// Models that receive default permissions under the `auth` app label.
pub const AUTH_PERMISSION_MODELS: [&str; 3] = ["user", "group", "permission"];

/// Initialize the tracing subscriber, honoring `RUST_LOG`
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Connect to the database and create any missing tables
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, Error> {
    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;
    create_tables(&db).await?;

    Ok(db)
}

/// Creates the auth tables if missing and seeds the default auth permissions
pub async fn create_tables<C: ConnectionTrait>(db: &C) -> Result<(), Error> {
    let schema = Schema::new(DbBackend::Sqlite);
    let mut stmts = vec![
        schema.create_table_from_entity(entity::prelude::AuthUser),
        schema.create_table_from_entity(entity::prelude::AuthGroup),
        schema.create_table_from_entity(entity::prelude::AuthPermission),
        schema.create_table_from_entity(entity::prelude::AuthUserPermission),
    ];

    for stmt in stmts.iter_mut() {
        stmt.if_not_exists();
        db.execute(&*stmt).await?;
    }

    PermissionRepository::new(db)
        .create_defaults("auth", &AUTH_PERMISSION_MODELS)
        .await?;

    Ok(())
}

/// Configure session management over the given store
///
/// Clones of a [`MemoryStore`] share their sessions, so callers can keep a handle to the
/// store to inspect or seed sessions out of band.
pub fn session_layer(config: &Config, store: MemoryStore) -> SessionManagerLayer<MemoryStore> {
    // Set secure based on build mode: in development (debug) use false, otherwise true.
    let secure_cookies = !cfg!(debug_assertions);

    SessionManagerLayer::new(store)
        .with_name(config.session_cookie_name.clone())
        .with_secure(secure_cookies)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(Duration::days(14)))
}
