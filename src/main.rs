// src/main.rs

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::FmtSubscriber;

use willow::api::http::api_router;
use willow::config::CONFIG;
use willow::db::{create_pool, run_migrations};
use willow::llm::GeminiClient;
use willow::state::AppState;

/// Graceful shutdown signal handler for SIGTERM and Ctrl+C
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, draining connections...");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(CONFIG.tracing_level())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting Willow backend");
    info!("Model: {}", CONFIG.gemini_model);

    let pool = create_pool(&CONFIG.database_url, CONFIG.sqlite_max_connections).await?;
    run_migrations(&pool).await?;
    info!("Database ready at {}", CONFIG.database_url);

    let gemini = GeminiClient::from_env()?;
    let app_state = Arc::new(AppState::new(pool, gemini));

    app_state.exercise_store.seed_defaults().await?;

    let app = api_router(app_state);

    let bind_address = CONFIG.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("Willow listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutdown complete");
    Ok(())
}
