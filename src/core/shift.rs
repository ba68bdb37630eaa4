//! Shift detection over configured time-of-day windows.

use crate::errors::{AppError, AppResult};
use crate::models::shift::ShiftWindow;
use chrono::{Local, NaiveDateTime, NaiveTime, Timelike};

/// Returned when no window matches (or none is configured).
pub const UNSCHEDULED: &str = "Unscheduled";

/// Immutable, ordered list of shift windows. First match wins.
#[derive(Debug, Clone)]
pub struct ShiftScheduler {
    windows: Vec<ShiftWindow>,
}

impl ShiftScheduler {
    pub fn new(windows: Vec<ShiftWindow>) -> Self {
        Self { windows }
    }

    pub fn windows(&self) -> &[ShiftWindow] {
        &self.windows
    }

    /// Name of the first window containing the time-of-day of `at`.
    pub fn detect_shift(&self, at: NaiveDateTime) -> &str {
        self.detect_at_time(at.time())
    }

    pub fn detect_at_time(&self, t: NaiveTime) -> &str {
        // sub-second precision is irrelevant for a wall-clock window
        let t = t.with_nanosecond(0).unwrap_or(t);
        self.windows
            .iter()
            .find(|w| w.contains(t))
            .map(|w| w.name.as_str())
            .unwrap_or(UNSCHEDULED)
    }

    pub fn detect_now(&self) -> &str {
        self.detect_shift(Local::now().naive_local())
    }

    pub fn is_configured(&self, name: &str) -> bool {
        self.windows.iter().any(|w| w.name == name)
    }

    /// One-line summary for banners: "Day: 06:00–17:00 | Night: 17:30–04:00".
    pub fn describe(&self) -> String {
        if self.windows.is_empty() {
            return "no shifts configured".to_string();
        }
        self.windows
            .iter()
            .map(ShiftWindow::describe)
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

/// Administrator choice of which shift label new rings get.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ShiftMode {
    #[default]
    Auto,
    Pinned(String),
}

impl ShiftMode {
    /// `auto` (any case) or a configured shift name.
    pub fn parse(s: &str, scheduler: &ShiftScheduler) -> AppResult<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("auto") {
            return Ok(ShiftMode::Auto);
        }
        if scheduler.is_configured(s) {
            Ok(ShiftMode::Pinned(s.to_string()))
        } else {
            Err(AppError::UnknownShift(format!(
                "'{s}' (configured: {})",
                scheduler.describe()
            )))
        }
    }

    pub fn pinned(&self) -> Option<&str> {
        match self {
            ShiftMode::Auto => None,
            ShiftMode::Pinned(name) => Some(name),
        }
    }

    /// Effective shift label for `at`.
    pub fn resolve<'a>(&'a self, scheduler: &'a ShiftScheduler, at: NaiveDateTime) -> &'a str {
        match self {
            ShiftMode::Auto => scheduler.detect_shift(at),
            ShiftMode::Pinned(name) => name,
        }
    }
}
