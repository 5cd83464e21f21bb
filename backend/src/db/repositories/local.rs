//! In-memory local repository implementation.
//!
//! All data is held in memory behind a single `RwLock`, providing fast,
//! deterministic and isolated execution for unit tests and local development.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::db::repository::*;
use crate::models::{default_destinations, Booking, BookingId, Destination, DestinationId, NewBooking};

/// In-memory local repository.
///
/// # Example
/// ```
/// use launch_booking::db::repositories::LocalRepository;
/// use launch_booking::models::Destination;
///
/// let repo = LocalRepository::with_destinations(vec![Destination::new(1, "Mars")]);
/// assert_eq!(repo.destination_count(), 1);
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    bookings: BTreeMap<BookingId, Booking>,
    destinations: BTreeMap<DestinationId, Destination>,
    next_booking_id: i64,
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            bookings: BTreeMap::new(),
            destinations: BTreeMap::new(),
            next_booking_id: 1,
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository (no destinations).
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Create a repository seeded with the given destinations.
    pub fn with_destinations(destinations: impl IntoIterator<Item = Destination>) -> Self {
        let repo = Self::new();
        if let Ok(mut data) = repo.data.write() {
            for destination in destinations {
                data.destinations.insert(destination.id, destination);
            }
        }
        repo
    }

    /// Create a repository seeded with the standard seven destinations.
    pub fn with_default_destinations() -> Self {
        Self::with_destinations(default_destinations())
    }

    /// Add or replace a destination.
    pub fn insert_destination(&self, destination: Destination) -> RepositoryResult<()> {
        let mut data = self.write("insert_destination")?;
        data.destinations.insert(destination.id, destination);
        Ok(())
    }

    /// Remove a destination, reshaping the rotation for every future date.
    pub fn remove_destination(&self, id: DestinationId) -> RepositoryResult<bool> {
        let mut data = self.write("remove_destination")?;
        Ok(data.destinations.remove(&id).is_some())
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        if let Ok(mut data) = self.data.write() {
            data.is_healthy = healthy;
        }
    }

    /// Clear all bookings, keeping destinations and health state.
    pub fn clear_bookings(&self) {
        if let Ok(mut data) = self.data.write() {
            data.bookings.clear();
            data.next_booking_id = 1;
        }
    }

    /// Get the number of bookings stored.
    pub fn booking_count(&self) -> usize {
        self.data.read().map(|d| d.bookings.len()).unwrap_or(0)
    }

    /// Get the number of destinations stored.
    pub fn destination_count(&self) -> usize {
        self.data.read().map(|d| d.destinations.len()).unwrap_or(0)
    }

    fn read(&self, operation: &str) -> RepositoryResult<RwLockReadGuard<'_, LocalData>> {
        self.data.read().map_err(|_| {
            RepositoryError::internal_with_context("lock poisoned", ErrorContext::new(operation))
        })
    }

    fn write(&self, operation: &str) -> RepositoryResult<RwLockWriteGuard<'_, LocalData>> {
        self.data.write().map_err(|_| {
            RepositoryError::internal_with_context("lock poisoned", ErrorContext::new(operation))
        })
    }

    /// Read guard that also fails when the repository is marked unhealthy.
    fn read_healthy(&self, operation: &str) -> RepositoryResult<RwLockReadGuard<'_, LocalData>> {
        let data = self.read(operation)?;
        if !data.is_healthy {
            return Err(RepositoryError::connection_with_context(
                "Database is not healthy",
                ErrorContext::new(operation),
            ));
        }
        Ok(data)
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookingRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.read("health_check")?.is_healthy)
    }

    async fn create_booking(&self, booking: &NewBooking) -> RepositoryResult<Booking> {
        let mut data = self.write("create_booking")?;
        if !data.is_healthy {
            return Err(RepositoryError::connection_with_context(
                "Database is not healthy",
                ErrorContext::new("create_booking").with_entity("booking"),
            ));
        }

        let id = BookingId::new(data.next_booking_id);
        data.next_booking_id += 1;

        let stored = Booking::from_new(id, booking.clone());
        data.bookings.insert(id, stored.clone());
        Ok(stored)
    }

    async fn list_bookings(&self) -> RepositoryResult<Vec<Booking>> {
        let data = self.read_healthy("list_bookings")?;
        Ok(data.bookings.values().cloned().collect())
    }
}

#[async_trait]
impl DestinationRepository for LocalRepository {
    async fn list_destinations(&self) -> RepositoryResult<Vec<Destination>> {
        let data = self.read_healthy("list_destinations")?;
        Ok(data.destinations.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn new_booking(destination: i64) -> NewBooking {
        NewBooking {
            first_name: "Test".into(),
            last_name: "User".into(),
            gender: "Non-binary".into(),
            birthday: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            launchpad_id: "test_launchpad".into(),
            destination_id: DestinationId::new(destination),
            launch_date: NaiveDate::from_ymd_opt(2049, 12, 25).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let repo = LocalRepository::new();
        let first = repo.create_booking(&new_booking(6)).await.unwrap();
        let second = repo.create_booking(&new_booking(6)).await.unwrap();
        assert_eq!(first.id, BookingId::new(1));
        assert_eq!(second.id, BookingId::new(2));

        let all = repo.list_bookings().await.unwrap();
        assert_eq!(all, vec![first, second]);
    }

    #[tokio::test]
    async fn test_destination_ids_are_ascending() {
        let repo = LocalRepository::with_destinations(vec![
            Destination::new(30, "c"),
            Destination::new(10, "a"),
            Destination::new(20, "b"),
        ]);
        let ids = repo.list_destination_ids().await.unwrap();
        assert_eq!(
            ids,
            vec![
                DestinationId::new(10),
                DestinationId::new(20),
                DestinationId::new(30)
            ]
        );
    }

    #[tokio::test]
    async fn test_unhealthy_repository_fails_operations() {
        let repo = LocalRepository::with_default_destinations();
        repo.set_healthy(false);

        assert!(!repo.health_check().await.unwrap());
        let err = repo.create_booking(&new_booking(1)).await.unwrap_err();
        assert!(matches!(err, RepositoryError::ConnectionError { .. }));
        assert_eq!(err.context().operation.as_deref(), Some("create_booking"));
        assert!(repo.list_destination_ids().await.is_err());
        assert_eq!(repo.booking_count(), 0);
    }

    #[tokio::test]
    async fn test_remove_destination() {
        let repo = LocalRepository::with_default_destinations();
        assert!(repo.remove_destination(DestinationId::new(7)).unwrap());
        assert!(!repo.remove_destination(DestinationId::new(7)).unwrap());
        assert_eq!(repo.list_destination_ids().await.unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_clear_bookings_resets_ids() {
        let repo = LocalRepository::new();
        repo.create_booking(&new_booking(1)).await.unwrap();
        repo.clear_bookings();
        assert_eq!(repo.booking_count(), 0);
        let again = repo.create_booking(&new_booking(1)).await.unwrap();
        assert_eq!(again.id, BookingId::new(1));
    }
}
