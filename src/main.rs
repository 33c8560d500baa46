//! CodexMind backend server binary.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use codexmind::config::Config;
use codexmind::{build_context, create_router, db, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting CodexMind backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Bind address: {}", config.bind_addr);
    tracing::info!(
        "Simulated latency: {:?}, search debounce: {:?}",
        config.simulated_latency,
        config.search_debounce
    );

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;

    // Wire services; a missing provider aborts startup here
    let context = build_context(pool, &config).await;
    let state = AppState::from_context(&context)?;

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
