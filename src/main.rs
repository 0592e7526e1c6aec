use hearth::{
    config::Config,
    model::app::AppState,
    router,
    startup::{connect_to_database, init_tracing, session_layer},
};
use tower_sessions::MemoryStore;

#[tokio::main]
async fn main() -> Result<(), hearth::error::Error> {
    dotenvy::dotenv().ok();
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    init_tracing();

    let db = connect_to_database(&config).await?;
    let session = session_layer(&config, MemoryStore::default());
    let app = router::app(AppState { db }, session);

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    tracing::info!("Starting server on {}", config.bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
