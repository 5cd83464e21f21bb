//! Application state for the HTTP server.

use std::sync::Arc;

use crate::db::repository::FullRepository;
use crate::services::admission::AdmissionController;
use crate::services::booking::BookingService;
use crate::services::conflict::ConflictResolver;
use crate::services::launch_feed::LaunchFeed;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for database operations
    pub repository: Arc<dyn FullRepository>,
    /// Validate-then-store booking workflow
    pub bookings: BookingService,
    /// Per-client rate limiter consulted before any handler runs
    pub admission: Arc<AdmissionController>,
}

impl AppState {
    /// Wire the booking service from its collaborators.
    pub fn new(
        repository: Arc<dyn FullRepository>,
        feed: Arc<dyn LaunchFeed>,
        admission: Arc<AdmissionController>,
    ) -> Self {
        let resolver = ConflictResolver::new(feed, repository.clone());
        Self {
            bookings: BookingService::new(resolver, repository.clone()),
            repository,
            admission,
        }
    }
}
