use super::types::{PcbPathRequest, ValidatePathResponse};
use crate::AppState;
use crate::api::error::AppError;
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

#[utoipa::path(
    post,
    path = "/api/validate-path",
    request_body = PcbPathRequest,
    responses(
        (status = 200, description = "Validation verdict; file_info only present when valid", body = ValidatePathResponse),
        (status = 400, description = "Malformed request body")
    ),
    tag = "pcb"
)]
pub async fn validate_path(
    State(state): State<AppState>,
    payload: Result<Json<PcbPathRequest>, JsonRejection>,
) -> Result<Json<ValidatePathResponse>, AppError> {
    let Json(req) = payload?;
    let path = req.path().to_string();

    let file_info = state.stager.validate(&path).await;

    Ok(Json(ValidatePathResponse {
        valid: file_info.is_some(),
        path,
        file_info,
    }))
}
