use crate::AppState;
use crate::api::error::AppError;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{StatusCode, header},
    response::Response,
};
use tokio_util::io::ReaderStream;

#[utoipa::path(
    get,
    path = "/pcb/{filename}",
    params(
        ("filename" = String, Path, description = "Staged file name, e.g. current_pcb.kicad_pcb")
    ),
    responses(
        (status = 200, description = "Raw staged file bytes"),
        (status = 404, description = "Nothing staged under that name")
    ),
    tag = "pcb"
)]
pub async fn serve_pcb(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, AppError> {
    let staged = state.stager.open_staged(&filename).await?;

    tracing::debug!("Serving {} ({} bytes)", filename, staged.size);

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, mime::APPLICATION_OCTET_STREAM.as_ref())
        .header(header::CONTENT_LENGTH, staged.size)
        .body(Body::from_stream(ReaderStream::new(staged.file)))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {}", e)))
}
