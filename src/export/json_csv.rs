// src/export/json_csv.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::{event_to_row, get_headers};
use crate::export::notify_export_success;
use crate::models::ring_event::RingEvent;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Pretty-printed JSON array of ring events.
pub(crate) fn export_json(events: &[RingEvent], path: &Path) -> AppResult<()> {
    let mut out = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut out, events)
        .map_err(|e| AppError::Export(format!("JSON serialization error: {e}")))?;
    out.write_all(b"\n")?;
    out.flush()?;

    notify_export_success("JSON", path);
    Ok(())
}

/// CSV with the same columns, in the same order, as the CSV ring log.
pub(crate) fn export_csv(events: &[RingEvent], path: &Path) -> AppResult<()> {
    let mut wtr = csv::Writer::from_writer(BufWriter::new(File::create(path)?));

    wtr.write_record(get_headers())?;
    for ev in events {
        wtr.write_record(event_to_row(ev))?;
    }
    wtr.flush()?;

    notify_export_success("CSV", path);
    Ok(())
}
