//! Destinations served by the launch rotation.

use serde::{Deserialize, Serialize};

crate::define_id_type!(
    /// Destination identifier. Ascending order of these ids is the weekday rotation.
    i64,
    DestinationId
);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    pub id: DestinationId,
    pub name: String,
}

impl Destination {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: DestinationId::new(id),
            name: name.into(),
        }
    }
}

/// The destinations seeded at setup, one per weekday.
pub fn default_destinations() -> Vec<Destination> {
    vec![
        Destination::new(1, "Mars"),
        Destination::new(2, "Moon"),
        Destination::new(3, "Pluto"),
        Destination::new(4, "Asteroid Belt"),
        Destination::new(5, "Europa"),
        Destination::new(6, "Titan"),
        Destination::new(7, "Ganymede"),
    ]
}
