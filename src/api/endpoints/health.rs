use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::types::ApiContext;
use crate::config;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub model: String,
    /// Whether a service credential is configured. A missing credential
    /// still only surfaces as a failure at prediction time.
    pub credential_configured: bool,
}

/// `GET /api/health`
pub async fn check(State(ctx): State<ApiContext>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: config::APP_VERSION,
        model: ctx.model.model_name().to_string(),
        credential_configured: ctx.model.is_configured(),
    })
}
