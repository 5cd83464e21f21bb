//! Repository trait definitions for database operations.
//!
//! # Module Organization
//!
//! - [`error`]: Error types for repository operations
//! - [`booking`]: Booking inserts and listing
//! - [`destination`]: Destination lookups backing the weekday rotation
//!
//! # Convenience Trait Bound
//!
//! For code that needs both capabilities, use the [`FullRepository`] bound:
//!
//! ```ignore
//! async fn seed_and_list<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<usize> {
//!     let ids = repo.list_destination_ids().await?;
//!     let bookings = repo.list_bookings().await?;
//!     Ok(ids.len() + bookings.len())
//! }
//! ```

pub mod booking;
pub mod destination;
pub mod error;

pub use booking::BookingRepository;
pub use destination::DestinationRepository;
pub use error::{ErrorContext, RepositoryError, RepositoryResult};

use serde::{Deserialize, Serialize};

/// Composite trait bound for a complete repository implementation.
pub trait FullRepository: BookingRepository + DestinationRepository {}

impl<T> FullRepository for T where T: BookingRepository + DestinationRepository {}

/// Pool health statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolStats {
    /// Number of connections currently in use
    pub connections_in_use: u32,
    /// Number of idle connections
    pub idle_connections: u32,
    /// Total number of connections in the pool
    pub total_connections: u32,
    /// Maximum pool size
    pub max_size: u32,
    /// Total successful queries executed
    pub total_queries: u64,
    /// Total failed queries
    pub failed_queries: u64,
}
