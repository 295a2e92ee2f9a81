//! Fixed-window rate limiting backed by Redis counters.

use async_trait::async_trait;
use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{HeaderMap, HeaderValue, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use redis::{aio::ConnectionManager, AsyncCommands, RedisError};
use std::net::SocketAddr;
use tracing::{debug, warn};

use common::{AppResult, ErrorBody, RateLimitConfig};

use crate::state::AppState;

/// Cache key prefix for rate limiting
const RATE_LIMIT_PREFIX: &str = "rate_limit:";

/// Counts requests per identifier within a window.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Increment the counter for `identifier`. Returns the count so far and
    /// whether the request is within the limit.
    async fn check(&self, identifier: &str, limit: RateLimitConfig) -> AppResult<(u64, bool)>;

    async fn ping(&self) -> AppResult<()>;
}

/// Redis-backed limiter.
#[derive(Clone)]
pub struct RedisRateLimiter {
    conn: ConnectionManager,
}

impl RedisRateLimiter {
    /// Connect to Redis.
    pub async fn connect(url: &str) -> Result<Self, RedisError> {
        debug!("Connecting to Redis at {}", url);
        let client = redis::Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self { conn })
    }
}

#[async_trait]
impl RateLimiter for RedisRateLimiter {
    async fn check(&self, identifier: &str, limit: RateLimitConfig) -> AppResult<(u64, bool)> {
        let mut conn = self.conn.clone();
        let key = format!("{}{}", RATE_LIMIT_PREFIX, identifier);

        let (count, ttl): (u64, i64) = redis::pipe()
            .atomic()
            .incr(&key, 1)
            .ttl(&key)
            .query_async(&mut conn)
            .await?;
        // Also re-arms a counter whose earlier EXPIRE never landed
        if lacks_expiry(ttl) {
            let _: () = conn.expire(&key, limit.window_seconds as i64).await?;
        }

        Ok((count, count <= limit.max_requests))
    }

    async fn ping(&self) -> AppResult<()> {
        let mut conn = self.conn.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}

/// TTL reply for a key that exists without an expiry.
fn lacks_expiry(ttl: i64) -> bool {
    ttl == -1
}

/// Rate limit middleware for general endpoints.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let limit = state.limits.general;
    rate_limit_internal(state, connect_info, request, next, "api", limit).await
}

/// Rate limit middleware for auth endpoints (stricter).
pub async fn rate_limit_auth_middleware(
    State(state): State<AppState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let limit = state.limits.auth;
    rate_limit_internal(state, connect_info, request, next, "auth", limit).await
}

async fn rate_limit_internal(
    state: AppState,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    request: Request<Body>,
    next: Next,
    scope: &str,
    limit: RateLimitConfig,
) -> Response {
    let ip = client_ip(request.headers(), connect_info);
    let identifier = format!("{}:{}", scope, ip);

    let count = match state.rate_limiter.check(&identifier, limit).await {
        Ok((count, true)) => count,
        Ok((_, false)) => {
            debug!(%identifier, "Rate limit exceeded");
            return rate_limit_exceeded_response(limit);
        }
        Err(e) => {
            // Fail closed
            warn!(error = %e, "Rate limiter unavailable, rejecting request");
            return rate_limit_exceeded_response(limit);
        }
    };

    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    headers.insert("X-RateLimit-Limit", HeaderValue::from(limit.max_requests));
    headers.insert(
        "X-RateLimit-Remaining",
        HeaderValue::from(limit.max_requests.saturating_sub(count)),
    );

    response
}

fn client_ip(headers: &HeaderMap, connect_info: Option<ConnectInfo<SocketAddr>>) -> String {
    if let Some(ip) = headers
        .get("X-Forwarded-For")
        .and_then(|h| h.to_str().ok())
        .and_then(|forwarded| forwarded.split(',').next())
    {
        return ip.trim().to_string();
    }

    if let Some(real_ip) = headers.get("X-Real-IP").and_then(|h| h.to_str().ok()) {
        return real_ip.to_string();
    }

    connect_info
        .map(|ci| ci.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn rate_limit_exceeded_response(limit: RateLimitConfig) -> Response {
    let body = ErrorBody {
        msg: "Too many requests, please try again later".to_string(),
    };
    let mut response = (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response();

    let headers = response.headers_mut();
    headers.insert("Retry-After", HeaderValue::from(limit.window_seconds));
    headers.insert("X-RateLimit-Remaining", HeaderValue::from_static("0"));
    headers.insert("X-RateLimit-Limit", HeaderValue::from(limit.max_requests));

    response
}
