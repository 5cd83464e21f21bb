//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for business logic.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};

use super::dto::{BookingListResponse, HealthResponse};
use super::error::AppError;
use super::state::AppState;
use crate::models::{Booking, BookingRequest};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// GET /health
///
/// Reports whether the booking store answers, plus limiter and pool figures.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let database = match state.repository.health_check().await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database,
        tracked_clients: state.admission.tracked_clients(),
        pool: state.repository.pool_stats(),
    }))
}

/// POST /bookings
///
/// Validate and store a booking. Returns 201 with the stored booking.
pub async fn create_booking(
    State(state): State<AppState>,
    payload: Result<Json<BookingRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    let Json(request) = payload?;
    let booking = state.bookings.create_booking(request).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// GET /bookings
pub async fn list_bookings(State(state): State<AppState>) -> HandlerResult<BookingListResponse> {
    let bookings = state.bookings.list_bookings().await?;
    let total = bookings.len();
    Ok(Json(BookingListResponse { bookings, total }))
}
