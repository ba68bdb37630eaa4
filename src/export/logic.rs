// src/export/logic.rs

use crate::db::RingEventLog;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::prepare_output;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::pdf_export::export_pdf;
use crate::export::xlsx::export_xlsx;
use crate::models::filter::RingFilter;
use crate::models::ring_event::RingEvent;
use crate::ui::messages::{info, warning};
use chrono::{Local, NaiveDate};
use std::path::Path;

/// High level export entry point.
pub struct ExportLogic;

impl ExportLogic {
    /// Export the rings matching `filter`.
    ///
    /// - `file`: absolute path of the output file
    /// - `shift_names`: configured shifts, listed first in the PDF summary
    ///
    /// Returns the number of exported rings; nothing is written when the
    /// selection is empty.
    pub fn export(
        log: &RingEventLog,
        format: ExportFormat,
        file: &str,
        filter: &RingFilter,
        shift_names: &[String],
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "Output file path must be absolute: {file}"
            )));
        }

        let events = log.query(filter)?;

        if events.is_empty() {
            warning("No rings found for the selected filter.");
            return Ok(0);
        }

        prepare_output(path, force)?;
        info(format!(
            "Exporting {} ring(s) to {}",
            events.len(),
            path.display()
        ));

        match format {
            ExportFormat::Csv => export_csv(&events, path)?,
            ExportFormat::Json => export_json(&events, path)?,
            ExportFormat::Xlsx => export_xlsx(&events, path)?,
            ExportFormat::Pdf => {
                let title = build_pdf_title(filter.range);
                let summary = build_summary(&events, filter.range, shift_names);
                export_pdf(&events, path, &title, &summary)?
            }
        }

        Ok(events.len())
    }
}

fn build_pdf_title(range: Option<(NaiveDate, NaiveDate)>) -> String {
    match range {
        None => "Doorbell rings".to_string(),
        Some((a, b)) if a == b => format!("Doorbell rings for {a}"),
        Some((a, b)) => format!("Doorbell rings from {a} to {b}"),
    }
}

/// Summary block: date range, total, per-shift counts, generation time.
pub(crate) fn build_summary(
    events: &[RingEvent],
    range: Option<(NaiveDate, NaiveDate)>,
    shift_names: &[String],
) -> Vec<String> {
    let range_line = match range {
        Some((a, b)) => format!("Date range: {a} to {b}"),
        None => match (
            events.iter().filter_map(RingEvent::date).min(),
            events.iter().filter_map(RingEvent::date).max(),
        ) {
            (Some(a), Some(b)) => format!("Date range: all ({a} to {b})"),
            _ => "Date range: all".to_string(),
        },
    };

    let mut lines = vec![range_line, format!("Total rings: {}", events.len())];

    for (name, count) in shift_counts(events, shift_names) {
        lines.push(format!("{name}: {count}"));
    }

    lines.push(format!(
        "Generated: {}",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    ));
    lines
}

/// Configured shifts first (zero counts included), then any other label in
/// order of first appearance.
fn shift_counts(events: &[RingEvent], shift_names: &[String]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = shift_names.iter().map(|n| (n.clone(), 0)).collect();

    for ev in events {
        match counts.iter_mut().find(|(n, _)| *n == ev.shift) {
            Some((_, c)) => *c += 1,
            None => counts.push((ev.shift.clone(), 1)),
        }
    }
    counts
}
