//! # Launch Booking Backend
//!
//! Booking service for scheduled launches to off-world destinations.
//!
//! A booking names a launch site, a destination and a launch date. It is
//! accepted only when no externally scheduled launch uses the same site on the
//! same day, and when the destination matches the weekday rotation. All
//! inbound traffic first passes a per-client token-bucket rate limiter.
//!
//! ## Architecture
//!
//! - [`models`]: Booking, destination and launch-feed record types
//! - [`services`]: Admission control, launch feed, conflict resolution, booking workflow
//! - [`db`]: Repository traits with in-memory and Postgres backends
//! - [`config`]: TOML + environment configuration
//! - [`http`]: Axum-based HTTP server and request handlers

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod config;
pub mod db;
pub mod models;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
