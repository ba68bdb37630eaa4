use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// A named time-of-day window. `end < start` means the window spans midnight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftWindow {
    pub name: String,
    #[serde(with = "hhmm")]
    pub start: NaiveTime, // ⇔ config "HH:MM"
    #[serde(with = "hhmm")]
    pub end: NaiveTime, // ⇔ config "HH:MM"
}

impl ShiftWindow {
    pub fn new(name: &str, start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            name: name.to_string(),
            start,
            end,
        }
    }

    pub fn is_overnight(&self) -> bool {
        self.end < self.start
    }

    /// Half-open membership test: start inclusive, end exclusive.
    pub fn contains(&self, t: NaiveTime) -> bool {
        if self.is_overnight() {
            t >= self.start || t < self.end
        } else {
            self.start <= t && t < self.end
        }
    }

    /// "Day: 06:00–17:00"
    pub fn describe(&self) -> String {
        format!(
            "{}: {}–{}",
            self.name,
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

/// Default kiosk schedule.
pub fn default_shifts() -> Vec<ShiftWindow> {
    let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap_or(NaiveTime::MIN);
    vec![
        ShiftWindow::new("Day", t(6, 0), t(17, 0)),
        ShiftWindow::new("Night", t(17, 30), t(4, 0)),
    ]
}

mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(t: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&t.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveTime::parse_from_str(raw.trim(), "%H:%M")
            .map_err(|_| D::Error::custom(format!("invalid shift time '{raw}', expected HH:MM")))
    }
}
