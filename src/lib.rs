pub mod api;
pub mod config;
pub mod entities;
pub mod infrastructure;
pub mod services;

use crate::config::GatewayConfig;
use crate::services::executor::OperationExecutor;
use axum::{
    Router,
    routing::{get, post},
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::handlers::upload::submit_hf_upload,
        api::handlers::health::health_check,
    ),
    components(
        schemas(
            api::handlers::upload::UploadSubmissionRequest,
            api::handlers::health::HealthResponse,
        )
    ),
    tags(
        (name = "submissions", description = "Delegated upload submission endpoints"),
        (name = "system", description = "Service health endpoints")
    )
)]
pub struct ApiDoc;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub executor: Arc<dyn OperationExecutor>,
    pub config: GatewayConfig,
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(api::handlers::health::health_check))
        .route(
            "/submit-hf-upload",
            post(api::handlers::upload::submit_hf_upload),
        )
        .with_state(state)
}
