//! Data Transfer Objects for the HTTP API.
//!
//! Bookings travel as the model types themselves; only the envelope
//! responses are defined here.

use serde::{Deserialize, Serialize};

use crate::db::repository::PoolStats;
use crate::models::Booking;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// `connected`, `disconnected` or `error: ...`
    pub database: String,
    /// Identities currently held by the rate limiter
    pub tracked_clients: usize,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub pool: Option<PoolStats>,
}

/// Response for listing bookings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingListResponse {
    pub bookings: Vec<Booking>,
    pub total: usize,
}
