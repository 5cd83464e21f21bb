//! Service layer for business logic and orchestration.
//!
//! Services sit between the HTTP handlers and the repositories:
//! - [`admission`]: per-client token-bucket rate limiting
//! - [`launch_feed`]: the external launch schedule
//! - [`conflict`]: launch-site and destination-rotation checks
//! - [`booking`]: validate-then-persist orchestration

pub mod admission;
pub mod booking;
pub mod conflict;
pub mod launch_feed;

pub use admission::{AdmissionConfig, AdmissionController, Clock, ManualClock, SystemClock};
pub use booking::{BookingError, BookingService};
pub use conflict::{Accepted, ConflictResolver, Rejection, RejectionKind};
pub use launch_feed::{FeedError, HttpLaunchFeed, InMemoryLaunchFeed, LaunchFeed, DEFAULT_FEED_URL};
