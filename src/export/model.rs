// src/export/model.rs

use crate::models::ring_event::{COLUMNS, RingEvent};

/// Header for CSV / XLSX / PDF
pub(crate) fn get_headers() -> Vec<&'static str> {
    COLUMNS.to_vec()
}

/// Ring event as a row of strings, in header order.
pub(crate) fn event_to_row(e: &RingEvent) -> Vec<String> {
    e.to_row().to_vec()
}

pub(crate) fn events_to_table(events: &[RingEvent]) -> Vec<Vec<String>> {
    events.iter().map(event_to_row).collect()
}
