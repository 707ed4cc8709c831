use axum::{
    routing::{get, post},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{self, AppState};
use super::openapi::ApiDoc;

/// Create the API router with Swagger UI
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/api/v1/health", get(handlers::health_check))
        .route("/api/v1/items", get(handlers::get_price_records))
        .route("/api/v1/items/:record_id", get(handlers::get_price_record_by_id))
        .route("/api/v1/items/name/:name", get(handlers::get_price_record_by_name))
        .route("/api/v1/refresh", post(handlers::trigger_refresh))
        .with_state(state)
}
