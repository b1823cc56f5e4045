use crate::handlers::{self, AppState};
use axum::{routing::get, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Maximum accepted request body (1 MiB).
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Builds the HTTP router.
///
/// Health endpoints sit outside the body limit; lead endpoints sit inside it.
pub fn router(state: Arc<AppState>) -> Router {
    let lead_routes = Router::new()
        .route(
            "/leads",
            get(handlers::list_leads).post(handlers::create_lead),
        )
        .route("/leads/:id", get(handlers::get_lead))
        .layer(ServiceBuilder::new().layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES)));

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .merge(lead_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
