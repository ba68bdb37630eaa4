use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// Storage/ISO format of `RingEvent::timestamp` (second precision).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Column order of the durable log.
pub const COLUMNS: [&str; 7] = [
    "timestamp",
    "name",
    "username",
    "badge",
    "note",
    "shift",
    "photo_ref",
];

/// One persisted visitor check-in.
///
/// Every column defaults to an empty string so that logs written by older
/// kiosks (fewer columns) still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RingEvent {
    #[serde(default)]
    pub timestamp: String, // ⇔ "YYYY-MM-DDTHH:MM:SS"
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub badge: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub shift: String,
    #[serde(default, alias = "photo", deserialize_with = "empty_as_none")]
    pub photo_ref: Option<String>,
}

impl RingEvent {
    /// Build a new event; text fields are trimmed.
    pub fn new(
        at: NaiveDateTime,
        name: &str,
        username: &str,
        badge: &str,
        note: &str,
        shift: &str,
        photo_ref: Option<String>,
    ) -> Self {
        Self {
            timestamp: at.format(TIMESTAMP_FORMAT).to_string(),
            name: name.trim().to_string(),
            username: username.trim().to_string(),
            badge: badge.trim().to_string(),
            note: note.trim().to_string(),
            shift: shift.to_string(),
            photo_ref: photo_ref.filter(|p| !p.is_empty()),
        }
    }

    /// Parsed timestamp, if the stored text is a valid ISO date-time.
    pub fn instant(&self) -> Option<NaiveDateTime> {
        let raw = self.timestamp.trim();
        NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S"))
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
            .ok()
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.instant().map(|dt| dt.date())
    }

    pub fn photo_str(&self) -> &str {
        self.photo_ref.as_deref().unwrap_or("")
    }

    /// Row in `COLUMNS` order.
    pub fn to_row(&self) -> [String; 7] {
        [
            self.timestamp.clone(),
            self.name.clone(),
            self.username.clone(),
            self.badge.clone(),
            self.note.clone(),
            self.shift.clone(),
            self.photo_str().to_string(),
        ]
    }
}

fn empty_as_none<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let raw = Option::<String>::deserialize(d)?;
    Ok(raw.filter(|s| !s.trim().is_empty()))
}
