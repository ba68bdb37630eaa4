//! Photo storage for ring events.

use crate::errors::{AppError, AppResult};
use chrono::NaiveDateTime;
use std::fs;
use std::path::PathBuf;

const MAX_IDENT_LEN: usize = 30;

/// Persists a captured photo and returns an opaque reference to it.
pub trait PhotoStore {
    fn store(&self, bytes: &[u8], ident: &str, at: NaiveDateTime) -> AppResult<String>;
}

/// Writes `<dir>/<YYYYmmdd_HHMMSS>_<ident>.jpg`.
pub struct DirPhotoStore {
    dir: PathBuf,
}

impl DirPhotoStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn file_name(ident: &str, at: NaiveDateTime) -> String {
        format!("{}_{}.jpg", at.format("%Y%m%d_%H%M%S"), sanitize_ident(ident))
    }
}

impl PhotoStore for DirPhotoStore {
    fn store(&self, bytes: &[u8], ident: &str, at: NaiveDateTime) -> AppResult<String> {
        let path = self.dir.join(Self::file_name(ident, at));

        fs::create_dir_all(&self.dir)
            .and_then(|_| fs::write(&path, bytes))
            .map_err(|e| AppError::Photo(format!("{}: {e}", path.display())))?;

        Ok(path.to_string_lossy().to_string())
    }
}

/// Keep ASCII alphanumerics, `-` and `_`, at most 30 characters.
pub fn sanitize_ident(ident: &str) -> String {
    let clean: String = ident
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .take(MAX_IDENT_LEN)
        .collect();

    if clean.is_empty() {
        "visitor".to_string()
    } else {
        clean
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 9, 1)
            .unwrap()
            .and_hms_opt(7, 5, 9)
            .unwrap()
    }

    #[test]
    fn ident_is_sanitized_and_truncated() {
        assert_eq!(sanitize_ident("j.doe@corp/42"), "jdoecorp42");
        assert_eq!(sanitize_ident("A-b_c"), "A-b_c");
        assert_eq!(sanitize_ident(&"x".repeat(40)).len(), 30);
        assert_eq!(sanitize_ident("  ¿?  "), "visitor");
    }

    #[test]
    fn file_name_is_timestamp_prefixed() {
        assert_eq!(
            DirPhotoStore::file_name("12345", at()),
            "20250901_070509_12345.jpg"
        );
    }

    #[test]
    fn store_writes_bytes_and_returns_path() {
        let dir = std::env::temp_dir().join("doorbell_photo_store_unit");
        fs::remove_dir_all(&dir).ok();

        let store = DirPhotoStore::new(&dir);
        let r = store.store(b"\xFF\xD8jpeg", "badge 9", at()).unwrap();

        assert!(r.ends_with("20250901_070509_badge9.jpg"));
        assert_eq!(fs::read(&r).unwrap(), b"\xFF\xD8jpeg");
    }
}
