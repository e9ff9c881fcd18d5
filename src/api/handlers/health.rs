use crate::AppState;
use axum::{Json, extract::State, response::IntoResponse};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub staging: String,
    pub staging_dir: String,
    pub staged_files: Vec<String>,
    pub version: String,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health and current staging state", body = HealthResponse)
    ),
    tag = "system"
)]
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let (staging_status, staged_files) = match state.stager.staged_files().await {
        Ok(files) => ("ready", files),
        Err(e) => {
            tracing::warn!("Staging directory unavailable: {}", e);
            ("unavailable", Vec::new())
        }
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        staging: staging_status.to_string(),
        staging_dir: state.stager.store().root().display().to_string(),
        staged_files,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
