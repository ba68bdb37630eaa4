use crate::errors::{AppError, AppResult};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

/// Zip the log store next to itself as `<YYYYmmdd_HHMMSS>-<file>-backup.zip`.
/// Returns `None` when there is nothing to archive.
pub fn archive_log(store: &Path) -> AppResult<Option<PathBuf>> {
    if !store.exists() {
        return Ok(None);
    }

    let file_name = store
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| AppError::Other(format!("invalid log path: {}", store.display())))?;

    let zip_path = store.with_file_name(format!(
        "{}-{}-backup.zip",
        Local::now().format("%Y%m%d_%H%M%S"),
        file_name
    ));

    let file = fs::File::create(&zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let mut f = fs::File::open(store)?;
    zip.start_file(file_name, options)
        .map_err(std::io::Error::other)?;

    std::io::copy(&mut f, &mut zip)?;
    zip.finish().map_err(std::io::Error::other)?;

    Ok(Some(zip_path))
}
