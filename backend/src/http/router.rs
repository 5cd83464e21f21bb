//! Router configuration for the HTTP API.
//!
//! Sets up the routes and middleware (admission control, tracing, CORS) and
//! creates the axum router ready for serving. Admission is the outermost layer.

use axum::{extract::DefaultBodyLimit, middleware, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::admission::admit_request;
use super::handlers;
use super::state::AppState;

const MAX_BODY_BYTES: usize = 64 * 1024;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route(
            "/bookings",
            get(handlers::list_bookings).post(handlers::create_booking),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(middleware::from_fn_with_state(
            state.admission.clone(),
            admit_request,
        ))
        .with_state(state)
}
