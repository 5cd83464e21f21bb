//! Booking conflict resolution.
//!
//! A request is accepted only when
//! 1. both the launch date and the birthday are present,
//! 2. no externally scheduled launch uses the same launch site on the same
//!    (site-local) day, and
//! 3. the requested destination is the one the weekday rotation assigns to
//!    the launch date.
//!
//! The rotation is the ascending list of destination ids; weekday `i`
//! (Monday = 0) maps to `ids[i % ids.len()]`. Checks run in that order and
//! stop at the first rejection. Any collaborator failure rejects the request
//! (fail closed).

use chrono::{Datelike, NaiveDate};
use std::sync::Arc;

use super::launch_feed::LaunchFeed;
use crate::db::repository::{DestinationRepository, FullRepository};
use crate::models::{BookingRequest, DestinationId, ExternalLaunchRecord};

/// Coarse category of a rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionKind {
    /// The request itself is incomplete.
    Validation,
    /// The request collides with the launch schedule or the rotation.
    Conflict,
    /// A collaborator could not answer.
    Upstream,
}

/// Why a booking request was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("launch_date and birthday are required")]
    MissingFields,

    #[error(
        "launch site {launchpad_id} is taken on {launch_date} by scheduled launch {record_id}"
    )]
    LaunchSiteConflict {
        launchpad_id: String,
        launch_date: NaiveDate,
        record_id: String,
    },

    #[error(
        "destination {requested} is not served on {launch_date}; the rotation expects destination {expected}"
    )]
    DestinationRotationMismatch {
        requested: DestinationId,
        expected: DestinationId,
        launch_date: NaiveDate,
    },

    #[error("upstream dependency failed: {0}")]
    Upstream(String),
}

impl Rejection {
    pub fn kind(&self) -> RejectionKind {
        match self {
            Self::MissingFields => RejectionKind::Validation,
            Self::LaunchSiteConflict { .. } | Self::DestinationRotationMismatch { .. } => {
                RejectionKind::Conflict
            }
            Self::Upstream(_) => RejectionKind::Upstream,
        }
    }
}

/// Outcome of a successful validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accepted {
    /// Destination the rotation assigns to the launch date.
    pub expected_destination: DestinationId,
    /// Feed records ignored because their timestamp did not parse.
    pub skipped_records: usize,
}

/// Result of scanning the feed for one launch site and day.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct FeedScan<'a> {
    pub conflict: Option<&'a ExternalLaunchRecord>,
    pub skipped_records: usize,
}

/// Look for a scheduled launch at `launchpad_id` on `launch_date`.
///
/// Records whose `date_local` is not RFC 3339 are logged, counted and
/// otherwise ignored.
pub fn scan_feed<'a>(
    records: &'a [ExternalLaunchRecord],
    launchpad_id: &str,
    launch_date: NaiveDate,
) -> FeedScan<'a> {
    let mut scan = FeedScan::default();

    for record in records {
        let day = match record.launch_day() {
            Ok(day) => day,
            Err(e) => {
                log::warn!(
                    "skipping launch record {:?}: bad date_local {:?}: {}",
                    record.id,
                    record.date_local,
                    e
                );
                scan.skipped_records += 1;
                continue;
            }
        };

        if record.launchpad == launchpad_id && day == launch_date {
            scan.conflict = Some(record);
            break;
        }
    }

    scan
}

/// Destination the rotation assigns to `launch_date`, or `None` without destinations.
pub fn expected_destination(ids: &[DestinationId], launch_date: NaiveDate) -> Option<DestinationId> {
    if ids.is_empty() {
        return None;
    }
    let weekday = launch_date.weekday().num_days_from_monday() as usize;
    Some(ids[weekday % ids.len()])
}

/// Validates booking requests against the launch feed and the destination rotation.
pub struct ConflictResolver<D: ?Sized + DestinationRepository = dyn FullRepository> {
    feed: Arc<dyn LaunchFeed>,
    destinations: Arc<D>,
}

impl<D: ?Sized + DestinationRepository> Clone for ConflictResolver<D> {
    fn clone(&self) -> Self {
        Self {
            feed: self.feed.clone(),
            destinations: self.destinations.clone(),
        }
    }
}

impl<D: ?Sized + DestinationRepository> ConflictResolver<D> {
    pub fn new(feed: Arc<dyn LaunchFeed>, destinations: Arc<D>) -> Self {
        Self { feed, destinations }
    }

    /// Run every check against `request`.
    ///
    /// Each call fetches the feed and the destination list afresh; the
    /// destination list is only read if the launch-site check passes.
    pub async fn validate(&self, request: &BookingRequest) -> Result<Accepted, Rejection> {
        let Some((_, launch_date)) = request.required_dates() else {
            return Err(Rejection::MissingFields);
        };

        let skipped_records = self
            .check_launch_site(&request.launchpad_id, launch_date)
            .await?;
        let expected_destination = self
            .check_rotation(request.destination_id, launch_date)
            .await?;

        Ok(Accepted {
            expected_destination,
            skipped_records,
        })
    }

    async fn check_launch_site(
        &self,
        launchpad_id: &str,
        launch_date: NaiveDate,
    ) -> Result<usize, Rejection> {
        let records = self.feed.fetch_launches().await.map_err(|e| {
            log::error!("launch feed fetch failed: {}", e);
            Rejection::Upstream(e.to_string())
        })?;

        let scan = scan_feed(&records, launchpad_id, launch_date);
        if let Some(record) = scan.conflict {
            return Err(Rejection::LaunchSiteConflict {
                launchpad_id: launchpad_id.to_owned(),
                launch_date,
                record_id: record.id.clone(),
            });
        }

        Ok(scan.skipped_records)
    }

    async fn check_rotation(
        &self,
        requested: DestinationId,
        launch_date: NaiveDate,
    ) -> Result<DestinationId, Rejection> {
        let ids = self.destinations.list_destination_ids().await.map_err(|e| {
            log::error!("destination lookup failed: {}", e);
            Rejection::Upstream(e.to_string())
        })?;

        let expected = expected_destination(&ids, launch_date)
            .ok_or_else(|| Rejection::Upstream("no destinations configured".to_string()))?;

        if requested != expected {
            return Err(Rejection::DestinationRotationMismatch {
                requested,
                expected,
                launch_date,
            });
        }

        Ok(expected)
    }
}
