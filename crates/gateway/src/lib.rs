//! Placement Tracker HTTP gateway.
//!
//! Serves the REST API over the placement services: JWT authentication,
//! role checks, Redis rate limiting and OpenAPI docs.

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::signal;
use tracing::info;

use placement_service_lib::{infra::Database, Services};

use crate::config::GatewayConfig;
use crate::middleware::{RateLimiter, RedisRateLimiter};
use crate::routes::create_router;
use crate::state::{AppState, RateLimits, StoreHealth};

/// Connect to Postgres and Redis, apply pending migrations, then serve
/// until Ctrl-C or SIGTERM.
pub async fn run_server(config: GatewayConfig) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect(&config.database).await?;
    info!("Database connected and migrations applied");

    let limiter: Arc<dyn RateLimiter> = Arc::new(RedisRateLimiter::connect(&config.cache.url).await?);
    info!("Redis connected");

    let services = Services::new(db.get_connection(), config.jwt.clone());
    let health = Arc::new(StoreHealth::new(db, limiter.clone()));
    let limits = RateLimits {
        general: config.rate_limit,
        auth: config.auth_rate_limit,
    };
    let state = AppState::new(services, limiter, health, limits);

    let app = create_router(state);

    let addr: SocketAddr = config.addr().parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Placement tracker listening on {}", addr);

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
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
