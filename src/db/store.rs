//! Durable storage seam for the ring log.

use crate::config::{Backend, Config};
use crate::db::csv_store::CsvStore;
use crate::db::sqlite_store::SqliteStore;
use crate::errors::AppResult;
use crate::models::ring_event::RingEvent;
use std::fs::{self, File};
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;
use std::time::SystemTime;

/// Cheap fingerprint of the underlying store, compared by the read cache to
/// notice writes made by someone else (another kiosk, an admin, `rm`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreStamp {
    Missing,
    Present {
        len: u64,
        modified: Option<SystemTime>,
        /// (row count, last id) for table stores
        rows: Option<(i64, i64)>,
        /// last bytes of text stores
        tail: Option<Vec<u8>>,
    },
}

/// How much of the end of a text store goes into its stamp.
const TAIL_LEN: u64 = 512;

impl StoreStamp {
    pub fn of_file(path: &Path) -> Self {
        match fs::metadata(path) {
            Ok(meta) => StoreStamp::Present {
                len: meta.len(),
                modified: meta.modified().ok(),
                rows: None,
                tail: None,
            },
            Err(_) => StoreStamp::Missing,
        }
    }

    /// File stamp plus the trailing bytes, so a rewrite of the same length
    /// inside one mtime tick is still noticed.
    pub fn of_text_file(path: &Path) -> Self {
        match Self::of_file(path) {
            StoreStamp::Present {
                len,
                modified,
                rows,
                ..
            } => StoreStamp::Present {
                len,
                modified,
                rows,
                tail: read_tail(path, len),
            },
            StoreStamp::Missing => StoreStamp::Missing,
        }
    }
}

fn read_tail(path: &Path, len: u64) -> Option<Vec<u8>> {
    let mut file = File::open(path).ok()?;
    file.seek(SeekFrom::Start(len.saturating_sub(TAIL_LEN))).ok()?;
    let mut buf = Vec::with_capacity(TAIL_LEN as usize);
    file.take(TAIL_LEN).read_to_end(&mut buf).ok()?;
    Some(buf)
}

/// Append-only tabular store.
///
/// `load` never fails: a missing store is an empty log and an unreadable one
/// is reported and treated as empty so it cannot block new rings.
pub trait LogStore: Send + Sync {
    fn path(&self) -> &Path;
    fn stamp(&self) -> StoreStamp;
    fn load(&self) -> Vec<RingEvent>;
    fn append(&self, event: &RingEvent) -> AppResult<()>;
    fn clear(&self) -> AppResult<()>;
    /// Create an empty store if none exists.
    fn init(&self) -> AppResult<()>;
}

/// Build the store selected by the configuration.
pub fn open_store(cfg: &Config) -> Box<dyn LogStore> {
    let path = cfg.log_file();
    match cfg.backend {
        Backend::Csv => Box::new(CsvStore::new(path)),
        Backend::Sqlite => Box::new(SqliteStore::new(path)),
    }
}
