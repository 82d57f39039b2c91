//! Health check endpoint.

use actix_web::{HttpResponse, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the database does not answer.
    #[schema(example = "ok")]
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: String,
    /// `up`, `down` or `in-memory`.
    pub database: &'static str,
}

/// Health check endpoint - returns server status.
///
/// GET /api/v1/health
#[utoipa::path(
    get,
    path = "/api/v1/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Database unreachable", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let database = database_status(&state).await;
    let healthy = database != "down";

    let response = HealthResponse {
        status: if healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().to_rfc3339(),
        database,
    };

    if healthy {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

#[cfg(feature = "postgres")]
async fn database_status(state: &AppState) -> &'static str {
    match &state.db {
        Some(db) => match db.ping().await {
            Ok(()) => "up",
            Err(e) => {
                tracing::warn!("Database ping failed: {}", e);
                "down"
            }
        },
        None => "in-memory",
    }
}

#[cfg(not(feature = "postgres"))]
async fn database_status(_state: &AppState) -> &'static str {
    "in-memory"
}
