//! Health check handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

use common::AppResult;

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub services: ServiceStatus,
}

/// Individual service status.
#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceStatus {
    pub database: ServiceHealth,
    pub redis: ServiceHealth,
}

/// Service health with optional error message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceHealth {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ServiceHealth {
    fn from_probe(result: AppResult<()>) -> Self {
        match result {
            Ok(()) => Self {
                status: "healthy".to_string(),
                error: None,
            },
            Err(e) => {
                tracing::warn!(error = ?e, "Health probe failed");
                Self {
                    status: "unhealthy".to_string(),
                    error: Some(e.user_message()),
                }
            }
        }
    }

    fn is_healthy(&self) -> bool {
        self.error.is_none()
    }
}

/// Banner for the bare root path
pub async fn root() -> &'static str {
    "Placement Tracker API is running"
}

/// Report database and Redis reachability
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "All backing services reachable", body = HealthResponse),
        (status = 503, description = "At least one backing service is down", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Response {
    let (database, redis) = tokio::join!(state.health.database(), state.health.cache());
    let services = ServiceStatus {
        database: ServiceHealth::from_probe(database),
        redis: ServiceHealth::from_probe(redis),
    };

    let all_healthy = services.database.is_healthy() && services.redis.is_healthy();
    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        services,
    };

    if all_healthy {
        (StatusCode::OK, Json(response)).into_response()
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Json(response)).into_response()
    }
}
