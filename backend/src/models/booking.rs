//! Booking request and persisted booking types.

use chrono::{DateTime, Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

use super::destination::DestinationId;

crate::define_id_type!(
    /// Store-assigned booking identifier.
    i64,
    BookingId
);

/// Inbound booking request, before validation.
///
/// Both dates are optional here so that a request missing them can be
/// decoded and rejected as a validation failure rather than a decode error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default, deserialize_with = "flexible_date::deserialize")]
    pub birthday: Option<NaiveDate>,
    pub launchpad_id: String,
    pub destination_id: DestinationId,
    #[serde(default, deserialize_with = "flexible_date::deserialize")]
    pub launch_date: Option<NaiveDate>,
}

impl BookingRequest {
    /// True when both the launch date and the birthday are present.
    pub fn has_required_dates(&self) -> bool {
        self.required_dates().is_some()
    }

    /// `(birthday, launch_date)` when both are present and non-zero.
    pub fn required_dates(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((present(self.birthday)?, present(self.launch_date)?))
    }

    /// Convert into an insertable booking. Returns `None` when a date is missing
    /// or zero.
    pub fn into_new_booking(self) -> Option<NewBooking> {
        let (birthday, launch_date) = self.required_dates()?;

        Some(NewBooking {
            first_name: self.first_name,
            last_name: self.last_name,
            gender: self.gender,
            birthday,
            launchpad_id: self.launchpad_id,
            destination_id: self.destination_id,
            launch_date,
        })
    }
}

/// A validated booking ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBooking {
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub birthday: NaiveDate,
    pub launchpad_id: String,
    pub destination_id: DestinationId,
    pub launch_date: NaiveDate,
}

/// A persisted booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub birthday: NaiveDate,
    pub launchpad_id: String,
    pub destination_id: DestinationId,
    pub launch_date: NaiveDate,
}

impl Booking {
    pub fn from_new(id: BookingId, booking: NewBooking) -> Self {
        Self {
            id,
            first_name: booking.first_name,
            last_name: booking.last_name,
            gender: booking.gender,
            birthday: booking.birthday,
            launchpad_id: booking.launchpad_id,
            destination_id: booking.destination_id,
            launch_date: booking.launch_date,
        }
    }
}

/// Parse a calendar date given either as `YYYY-MM-DD` or as an RFC 3339
/// timestamp. For timestamps the day is taken in the timestamp's own offset.
/// True for 0001-01-01, the day of a zero timestamp (`0001-01-01T00:00:00Z`)
/// that some clients send for an unset date.
pub fn is_zero_date(date: NaiveDate) -> bool {
    date.year() == 1 && date.ordinal() == 1
}

fn present(date: Option<NaiveDate>) -> Option<NaiveDate> {
    date.filter(|d| !is_zero_date(*d))
}

pub fn parse_calendar_date(raw: &str) -> Result<NaiveDate, chrono::ParseError> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|ts| ts.date_naive()))
}

mod flexible_date {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => parse_calendar_date(value)
                .map(|date| present(Some(date)))
                .map_err(|e| serde::de::Error::custom(format!("invalid date '{value}': {e}"))),
        }
    }
}
