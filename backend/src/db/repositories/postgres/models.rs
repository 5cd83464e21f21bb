use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

use super::schema::{bookings, destinations};
use crate::models::{Booking, BookingId, Destination, DestinationId, NewBooking};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = destinations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DestinationRow {
    pub id: i64,
    pub name: String,
}

impl From<DestinationRow> for Destination {
    fn from(row: DestinationRow) -> Self {
        Destination {
            id: DestinationId::new(row.id),
            name: row.name,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = bookings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[allow(dead_code)] // created_at is only read for ordering/debugging
pub struct BookingRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub birthday: NaiveDate,
    pub launchpad_id: String,
    pub destination_id: i64,
    pub launch_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl From<BookingRow> for Booking {
    fn from(row: BookingRow) -> Self {
        Booking {
            id: BookingId::new(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            gender: row.gender,
            birthday: row.birthday,
            launchpad_id: row.launchpad_id,
            destination_id: DestinationId::new(row.destination_id),
            launch_date: row.launch_date,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = bookings)]
pub struct NewBookingRow {
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub birthday: NaiveDate,
    pub launchpad_id: String,
    pub destination_id: i64,
    pub launch_date: NaiveDate,
}

impl From<&NewBooking> for NewBookingRow {
    fn from(booking: &NewBooking) -> Self {
        Self {
            first_name: booking.first_name.clone(),
            last_name: booking.last_name.clone(),
            gender: booking.gender.clone(),
            birthday: booking.birthday,
            launchpad_id: booking.launchpad_id.clone(),
            destination_id: booking.destination_id.value(),
            launch_date: booking.launch_date,
        }
    }
}
