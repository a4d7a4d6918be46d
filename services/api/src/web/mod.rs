pub mod middleware;
pub mod protocol;
pub mod rest;
pub mod state;

pub use middleware::trace_requests;
pub use rest::{get_points_handler, process_receipt_handler};

use crate::config::ConfigError;
use crate::error::ApiError;
use axum::{
    extract::DefaultBodyLimit,
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use rest::ApiDoc;
use state::AppState;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Builds the complete application router: receipt routes, Swagger UI and
/// the CORS, body limit and tracing layers.
pub fn router(app_state: Arc<AppState>) -> Result<Router, ApiError> {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);
    let cors = match &app_state.config.cors_allowed_origin {
        Some(origin) => cors.allow_origin(origin.parse::<HeaderValue>().map_err(|e| {
            ConfigError::InvalidValue("CORS_ALLOWED_ORIGIN".to_string(), e.to_string())
        })?),
        None => cors.allow_origin(Any),
    };

    let api_router = Router::new()
        .route("/receipts/process", post(process_receipt_handler))
        .route("/receipts/{id}/points", get(get_points_handler))
        .layer(DefaultBodyLimit::max(app_state.config.max_body_bytes))
        .layer(cors)
        .with_state(app_state);

    Ok(Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(axum_middleware::from_fn(trace_requests)))
}
