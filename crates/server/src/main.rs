use anyhow::Result;
use byteshop_core::AppService;
use byteshop_server::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with INFO level by default
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::load_default()?;

    tracing::info!("Byte Shop server starting...");
    tracing::info!("Backend: {}", config.database.backend);

    let store = byteshop_server::open_store(&config.database).await?;
    let app = byteshop_server::router(AppService::new(store));

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Byte Shop server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
