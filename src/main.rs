use std::net::SocketAddr;

use dotenvy::dotenv;
use tracing::{error, info};

use yoklama::logging::{init_tracing, shutdown_tracer};
use yoklama::metrics::{init_metrics, metrics_app};
use yoklama::router::init_router;
use yoklama::state::init_app_state;
use yoklama_config::ServerConfig;

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_tracing();

    if let Err(e) = run().await {
        error!(error = %e, "Server stopped with an error");
        shutdown_tracer();
        std::process::exit(1);
    }

    shutdown_tracer();
}

async fn run() -> anyhow::Result<()> {
    let metrics_handle = init_metrics();

    let state = init_app_state()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to build application state: {}", e.message()))?;

    let mut app = init_router(state);
    if let Some(handle) = metrics_handle {
        app = app.merge(metrics_app(handle));
    }

    let server = ServerConfig::from_env();
    let address = server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;

    info!(address = %address, "Server listening");
    info!("Swagger UI available at http://{}/swagger-ui", address);
    info!("Scalar UI available at http://{}/scalar", address);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
