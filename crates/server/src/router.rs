use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

use crate::handlers::{self, ServiceState};

/// Builds the JSON API. Uploads larger than `max_upload_bytes` get a 413.
pub fn create_router(service: ServiceState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api/transactions", get(handlers::list_transactions))
        .route("/api/transactions/recent", get(handlers::recent_transactions))
        .route("/api/summary", get(handlers::summary))
        .route("/api/upload/{source}", post(handlers::upload))
        .with_state(service)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
}
