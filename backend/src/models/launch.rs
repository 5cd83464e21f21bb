//! Records from the external launch schedule feed.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

/// One launch as published by the external feed.
///
/// Missing or `null` fields decode as empty strings so that one incomplete
/// record fails timestamp parsing and is skipped instead of failing the whole
/// feed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExternalLaunchRecord {
    /// Launch-site identifier.
    #[serde(default, deserialize_with = "string_or_null")]
    pub launchpad: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub name: String,
    /// Launch time in RFC 3339 form, expressed in the site's local offset.
    #[serde(default, deserialize_with = "string_or_null")]
    pub date_local: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub id: String,
}

impl ExternalLaunchRecord {
    pub fn new(
        launchpad: impl Into<String>,
        name: impl Into<String>,
        date_local: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        Self {
            launchpad: launchpad.into(),
            name: name.into(),
            date_local: date_local.into(),
            id: id.into(),
        }
    }

    /// Calendar day of the launch at the launch site.
    ///
    /// The timestamp must be strict RFC 3339; the day is read in the offset
    /// the timestamp carries.
    pub fn launch_day(&self) -> Result<NaiveDate, chrono::ParseError> {
        DateTime::parse_from_rfc3339(&self.date_local).map(|ts| ts.date_naive())
    }
}

fn string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
