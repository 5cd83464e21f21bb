//! Read-only access to the destination table.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{Destination, DestinationId};

#[async_trait]
pub trait DestinationRepository: Send + Sync {
    /// All destinations, ascending by id.
    async fn list_destinations(&self) -> RepositoryResult<Vec<Destination>>;

    /// All destination ids, ascending.
    ///
    /// The order is load-bearing: position `i` is the destination for ISO
    /// weekday `i` (Monday = 0).
    async fn list_destination_ids(&self) -> RepositoryResult<Vec<DestinationId>> {
        let destinations = self.list_destinations().await?;
        Ok(destinations.into_iter().map(|d| d.id).collect())
    }
}
