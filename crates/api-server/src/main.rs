use application::UserApp;
use config::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod error;
mod routes;
mod users;

use routes::{router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing; RUST_LOG overrides the default filter
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("api_server=debug,domain=debug,infrastructure=debug,tower_http=debug")
        }))
        .init();

    info!("🚀 Starting user registry API server");

    // Resolved once, then passed down
    let config = Config::from_env()?;
    info!("🌐 API server will bind to: {}", config.api_address());

    let user_app = UserApp::new(&config)?;
    let app = router(AppState::new(user_app));

    let bind_address = config.api_address();
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("🌐 API Server listening on http://{}", bind_address);
    info!("📖 API Documentation:");
    info!("   GET    /users                      - List all users");
    info!("   GET    /users/username/:username   - Get user by username");
    info!("   GET    /users/id/:id               - Get user by numeric id");
    info!("   POST   /users                      - Create user");
    info!("   PUT    /users/:uuid                - Update user");
    info!("   DELETE /users/:uuid                - Delete user");
    info!("   GET    /health                     - Health check");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("👋 Shutdown signal received");
}
