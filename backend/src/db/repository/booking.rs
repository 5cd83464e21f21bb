//! Booking persistence trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use super::PoolStats;
use crate::models::{Booking, NewBooking};

/// Repository trait for booking storage.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Check if the store is reachable.
    ///
    /// # Returns
    /// - `Ok(true)` if connection is healthy
    /// - `Ok(false)` if connection is unhealthy but no error occurred
    /// - `Err(RepositoryError)` if an error occurred during the check
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Insert a validated booking and return it with its assigned id.
    ///
    /// No conflict check happens here; callers validate first.
    async fn create_booking(&self, booking: &NewBooking) -> RepositoryResult<Booking>;

    /// List every stored booking in ascending id order.
    async fn list_bookings(&self) -> RepositoryResult<Vec<Booking>>;

    /// Connection pool statistics, for backends that pool connections.
    fn pool_stats(&self) -> Option<PoolStats> {
        None
    }
}
