use std::net::SocketAddr;

use classroom::config::ServerConfig;
use classroom::logging::{init_tracing, shutdown_tracer};
use classroom::metrics::{init_metrics, metrics_app};
use classroom::router::init_router;
use classroom::state::AppState;
use classroom_db::{init_db_pool, run_migrations};
use dotenvy::dotenv;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing();

    let server_config = ServerConfig::from_env();

    let db = init_db_pool().await?;
    run_migrations(&db).await?;

    if let Some(handle) = init_metrics() {
        let metrics_address = server_config.metrics_address();
        let listener = tokio::net::TcpListener::bind(&metrics_address).await?;
        info!("Metrics available at http://{}/metrics", metrics_address);
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, metrics_app(handle)).await {
                error!(error = %e, "Metrics server stopped");
            }
        });
    }

    let app = init_router(AppState::from_env(db));

    let address = server_config.address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("🚀 Server running on http://{}", address);
    info!("📚 Swagger UI available at http://{}/swagger-ui", address);
    info!("📖 Scalar UI available at http://{}/scalar", address);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    shutdown_tracer().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}
