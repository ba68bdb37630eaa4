// src/export/pdf_export.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::{events_to_table, get_headers};
use crate::export::notify_export_success;
use crate::export::pdf::PdfManager;
use crate::models::ring_event::RingEvent;
use std::path::Path;

/// Title, summary block, then the paginated ring table.
pub(crate) fn export_pdf(
    events: &[RingEvent],
    path: &Path,
    title: &str,
    summary: &[String],
) -> AppResult<()> {
    let mut pdf = PdfManager::new();
    pdf.write_table(title, summary, &get_headers(), &events_to_table(events));

    pdf.save(path)
        .map_err(|e| AppError::Export(format!("PDF write error: {e}")))?;

    notify_export_success("PDF", path);
    Ok(())
}
