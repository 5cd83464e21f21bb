//! HTTP server module for the booking service.
//!
//! This module provides an axum-based HTTP server exposing the booking
//! workflow as a REST API.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum)                                        │
//! │  - Admission control (per-peer token buckets)             │
//! │  - JSON serialization/deserialization                     │
//! │  - CORS, tracing, error mapping                           │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Service Layer (services/)                                │
//! │  - Conflict resolution against the launch feed            │
//! │  - Destination rotation                                   │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Repository Layer (db/)                                   │
//! │  - LocalRepository / PostgresRepository                   │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! # Endpoints
//!
//! | Method | Path        | Success |
//! |--------|-------------|---------|
//! | GET    | `/health`   | 200     |
//! | POST   | `/bookings` | 201     |
//! | GET    | `/bookings` | 200     |

pub mod admission;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use error::{ApiError, AppError};
pub use router::create_router;
pub use state::AppState;
