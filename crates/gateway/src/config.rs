//! Gateway configuration.

use common::{env_or, CacheConfig, ConfigError, DatabaseConfig, JwtConfig, RateLimitConfig};

/// Everything the HTTP server needs, loaded from the environment.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    /// Redis backing the rate limiter
    pub cache: CacheConfig,
    /// Limits for every API route
    pub rate_limit: RateLimitConfig,
    /// Stricter limits for `/api/auth`
    pub auth_rate_limit: RateLimitConfig,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    /// A missing `DATABASE_URL`, a missing or short `JWT_SECRET`, or any
    /// unparsable numeric value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env_or("GATEWAY_HOST", "0.0.0.0".to_string())?,
            port: env_or("GATEWAY_PORT", 5000)?,
            database: DatabaseConfig::from_env()?,
            jwt: JwtConfig::from_env()?,
            cache: CacheConfig::from_env()?,
            rate_limit: RateLimitConfig::general_from_env()?,
            auth_rate_limit: RateLimitConfig::auth_from_env()?,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
