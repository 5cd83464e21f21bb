//! Booking orchestration: validate, then persist.

use std::sync::Arc;

use super::conflict::{ConflictResolver, Rejection};
use crate::db::repository::{FullRepository, RepositoryError};
use crate::models::{Booking, BookingRequest};

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error(transparent)]
    Rejected(#[from] Rejection),

    #[error("failed to store booking: {0}")]
    Repository(#[from] RepositoryError),
}

/// Creates and lists bookings.
///
/// Validation and insert are separate steps with no lock held in between, so
/// two concurrent requests for the same site and day can both be stored.
#[derive(Clone)]
pub struct BookingService {
    resolver: ConflictResolver,
    repository: Arc<dyn FullRepository>,
}

impl BookingService {
    pub fn new(resolver: ConflictResolver, repository: Arc<dyn FullRepository>) -> Self {
        Self {
            resolver,
            repository,
        }
    }

    pub async fn create_booking(&self, request: BookingRequest) -> Result<Booking, BookingError> {
        let accepted = self.resolver.validate(&request).await.map_err(|rejection| {
            log::info!(
                "booking rejected for launchpad {}: {}",
                request.launchpad_id,
                rejection
            );
            rejection
        })?;

        // validate() already refused requests without both dates.
        let new_booking = request.into_new_booking().ok_or(Rejection::MissingFields)?;
        let booking = self.repository.create_booking(&new_booking).await?;

        log::info!(
            "booking {} stored: launchpad {} on {} to destination {} ({} feed records skipped)",
            booking.id,
            booking.launchpad_id,
            booking.launch_date,
            accepted.expected_destination,
            accepted.skipped_records
        );
        Ok(booking)
    }

    pub async fn list_bookings(&self) -> Result<Vec<Booking>, BookingError> {
        Ok(self.repository.list_bookings().await?)
    }
}
