//! Application state for dependency injection.

use std::sync::Arc;

use async_trait::async_trait;
use common::{AppResult, RateLimitConfig};
use placement_service_lib::{infra::Database, Services};

use crate::middleware::RateLimiter;

/// Reachability of the backing stores, reported by `/health`.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    async fn database(&self) -> AppResult<()>;

    async fn cache(&self) -> AppResult<()>;
}

/// Probes the live Postgres pool and the rate limiter's Redis.
pub struct StoreHealth {
    db: Database,
    limiter: Arc<dyn RateLimiter>,
}

impl StoreHealth {
    pub fn new(db: Database, limiter: Arc<dyn RateLimiter>) -> Self {
        Self { db, limiter }
    }
}

#[async_trait]
impl HealthProbe for StoreHealth {
    async fn database(&self) -> AppResult<()> {
        Ok(self.db.ping().await?)
    }

    async fn cache(&self) -> AppResult<()> {
        self.limiter.ping().await
    }
}

/// Rate limits applied per route group.
#[derive(Debug, Clone, Copy, Default)]
pub struct RateLimits {
    pub general: RateLimitConfig,
    pub auth: RateLimitConfig,
}

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
    pub rate_limiter: Arc<dyn RateLimiter>,
    pub health: Arc<dyn HealthProbe>,
    pub limits: RateLimits,
}

impl AppState {
    /// Create new app state.
    pub fn new(
        services: Services,
        rate_limiter: Arc<dyn RateLimiter>,
        health: Arc<dyn HealthProbe>,
        limits: RateLimits,
    ) -> Self {
        Self {
            services,
            rate_limiter,
            health,
            limits,
        }
    }
}
