use super::types::{LoadPcbResponse, PcbPathRequest};
use crate::AppState;
use crate::api::error::AppError;
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

#[utoipa::path(
    post,
    path = "/api/load-pcb",
    request_body = PcbPathRequest,
    responses(
        (status = 200, description = "PCB staged and ready to fetch", body = LoadPcbResponse),
        (status = 400, description = "Missing path, or not an existing .kicad_pcb/.pcb file"),
        (status = 500, description = "Copy into the staging directory failed")
    ),
    tag = "pcb"
)]
pub async fn load_pcb(
    State(state): State<AppState>,
    payload: Result<Json<PcbPathRequest>, JsonRejection>,
) -> Result<Json<LoadPcbResponse>, AppError> {
    let Json(req) = payload?;

    let staged = state.stager.stage(req.path()).await?;

    Ok(Json(LoadPcbResponse {
        success: true,
        filename: staged.filename,
        original_path: staged.original_path,
        url: staged.url,
    }))
}
