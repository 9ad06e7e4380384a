use std::net::SocketAddr;
use std::sync::Arc;

use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use energy_api::handlers::AppState;
use energy_api::repositories::{PostgresDeviceRepository, PostgresReadingRepository};
use energy_api::services::{EnergyService, PredictionService};
use energy_api::{create_pool, db, routes, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,energy_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting energy-api");

    let config = Config::from_env()?;

    tracing::info!("Connecting to database...");
    let pool = create_pool(&config).await?;
    db::init_schema(&pool).await?;
    tracing::info!("Database connection established");

    let devices = Arc::new(PostgresDeviceRepository::new(pool.clone()));
    let readings = Arc::new(PostgresReadingRepository::new(pool));

    let energy = EnergyService::new(devices, readings, config.tariff.unit_rate);
    let predictor = PredictionService::from_config(&config.predictor);

    let app = routes::create_router(AppState { energy, predictor });

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!("Starting API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Application shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
