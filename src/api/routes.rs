//! API route definitions

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{self, BfhlRequest, Envelope};
use crate::config::Config;
use crate::dispatch::Dispatcher;
use crate::error::Result;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "bfhl API",
        version = "0.1.0",
        description = "Fibonacci, prime filtering, LCM/HCF and one-word AI answers"
    ),
    tags(
        (name = "operations", description = "Operation dispatch"),
        (name = "health", description = "Health checks")
    ),
    paths(handlers::health, handlers::bfhl),
    components(schemas(BfhlRequest, Envelope))
)]
pub struct ApiDoc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    pub official_email: Arc<str>,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            dispatcher: Arc::new(Dispatcher::new(config)?),
            official_email: Arc::from(config.official_email.as_str()),
        })
    }
}

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/bfhl", post(handlers::bfhl))

        // OpenAPI document and Swagger UI
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))

        .fallback(handlers::not_found)

        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
