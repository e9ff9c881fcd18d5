pub mod api;
pub mod config;
pub mod infrastructure;
pub mod services;
pub mod utils;

use crate::config::StagingConfig;
use crate::services::stager::PcbStager;
use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::handlers::pcb::load::load_pcb,
        api::handlers::pcb::validate::validate_path,
        api::handlers::pcb::serve::serve_pcb,
        api::handlers::health::health_check,
    ),
    components(
        schemas(
            api::handlers::pcb::PcbPathRequest,
            api::handlers::pcb::LoadPcbResponse,
            api::handlers::pcb::ValidatePathResponse,
            api::handlers::health::HealthResponse,
            utils::validation::PcbFileInfo,
        )
    ),
    tags(
        (name = "pcb", description = "PCB staging endpoints"),
        (name = "system", description = "Service status")
    )
)]
pub struct ApiDoc;

#[derive(Clone)]
pub struct AppState {
    pub stager: Arc<PcbStager>,
    pub config: StagingConfig,
}

impl AppState {
    pub fn new(stager: Arc<PcbStager>) -> Self {
        let config = stager.config().clone();
        Self { stager, config }
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(api::handlers::health::health_check))
        .route("/api/load-pcb", post(api::handlers::pcb::load_pcb))
        .route("/api/validate-path", post(api::handlers::pcb::validate_path))
        .route("/pcb/:filename", get(api::handlers::pcb::serve_pcb))
        .layer(from_fn(api::middleware::metrics::metrics_middleware))
        .layer(from_fn(api::middleware::request_id::request_id_middleware))
        // The browser frontend is hosted separately
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(axum::extract::DefaultBodyLimit::max(
            state.config.max_request_body,
        ))
        .with_state(state)
}
