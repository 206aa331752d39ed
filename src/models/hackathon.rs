//! Hackathon metadata records.
//!
//! A hackathon is a name plus ten optional text fields the operator tracks while
//! deciding where to apply. Every optional field is stored as a string and is the
//! empty string when unset.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// The editable text fields of a hackathon.
///
/// A field may be missing or `null` in a request body; either way it is stored as
/// the empty string. Used both as the request body for create/update and, flattened, inside
/// [`HackathonRecord`].
///
/// # JSON Example
///
/// ```json
/// {
///   "hackathon_name": "HackX",
///   "organizer": "ACM",
///   "registration_deadline": "2025-03-01",
///   "event_date": "2025-03-15 (48h)",
///   "location": "Online",
///   "registration_fee": "Free",
///   "prize_pool": "$10,000",
///   "description": "",
///   "eligibility": "Students",
///   "team_size": "1-4",
///   "link": "https://hackx.example.com"
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(default)]
pub struct HackathonFields {
    #[serde(deserialize_with = "null_as_empty")]
    pub hackathon_name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub organizer: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub registration_deadline: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub event_date: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub location: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub registration_fee: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub prize_pool: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub eligibility: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub team_size: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub link: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl HackathonFields {
    /// Fields with only a name set.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            hackathon_name: name.into(),
            ..Self::default()
        }
    }

    /// Trim surrounding whitespace from every field.
    pub fn normalized(self) -> Self {
        let trim = |s: String| s.trim().to_string();
        Self {
            hackathon_name: trim(self.hackathon_name),
            organizer: trim(self.organizer),
            registration_deadline: trim(self.registration_deadline),
            event_date: trim(self.event_date),
            location: trim(self.location),
            registration_fee: trim(self.registration_fee),
            prize_pool: trim(self.prize_pool),
            description: trim(self.description),
            eligibility: trim(self.eligibility),
            team_size: trim(self.team_size),
            link: trim(self.link),
        }
    }

    /// Label/value pairs for the optional fields, in display order.
    pub fn optional_fields(&self) -> [(&'static str, &str); 10] {
        [
            ("Organizer", self.organizer.as_str()),
            ("Registration deadline", self.registration_deadline.as_str()),
            ("Event date", self.event_date.as_str()),
            ("Location", self.location.as_str()),
            ("Registration fee", self.registration_fee.as_str()),
            ("Prize pool", self.prize_pool.as_str()),
            ("Eligibility", self.eligibility.as_str()),
            ("Team size", self.team_size.as_str()),
            ("Description", self.description.as_str()),
            ("Link", self.link.as_str()),
        ]
    }
}

/// Represents a hackathon record from the store.
///
/// # Database Table
///
/// Maps to the `hackathons` table: one TEXT column per field in
/// [`HackathonFields`] plus `id`, `created_at` and `updated_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct HackathonRecord {
    #[serde(rename = "_id")]
    pub id: Uuid,

    #[serde(flatten)]
    #[sqlx(flatten)]
    pub fields: HackathonFields,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    /// Refreshed on every update; equals `created_at` until the first one.
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}
