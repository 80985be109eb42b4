use crate::models::envelope::now_timestamp;
use crate::models::HealthResponse;
use axum::Json;

/// Liveness probe. Unconditionally healthy; never touches the model provider.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: now_timestamp(),
        version: env!("CARGO_PKG_VERSION"),
    })
}
