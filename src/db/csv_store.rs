//! CSV file backend (`timestamp,name,username,badge,note,shift,photo_ref`).

use crate::db::store::{LogStore, StoreStamp};
use crate::errors::AppResult;
use crate::models::ring_event::{COLUMNS, RingEvent};
use crate::ui::messages::warning;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Bytes of the file after appending `event`.
    fn next_contents(&self, existing: Option<Vec<u8>>, event: &RingEvent) -> AppResult<Vec<u8>> {
        let mut buf = match existing {
            Some(bytes) if !bytes.iter().all(u8::is_ascii_whitespace) => {
                self.with_canonical_header(bytes)?
            }
            _ => encode(None::<&RingEvent>, true)?,
        };

        if buf.last().is_some_and(|b| *b != b'\n') {
            buf.push(b'\n');
        }
        buf.extend(encode(Some(event), false)?);
        Ok(buf)
    }

    /// Older logs may lack columns (e.g. no photo column). They are rewritten
    /// with the full header when they parse. A log that does not parse is
    /// moved aside to `<name>.corrupt` and a fresh one is started, so the new
    /// record stays readable.
    fn with_canonical_header(&self, bytes: Vec<u8>) -> AppResult<Vec<u8>> {
        let events = match parse(&bytes) {
            Ok(events) => events,
            Err(e) => {
                let aside = self.corrupt_path();
                fs::write(&aside, &bytes)?;
                warning(format!(
                    "Ring log {} is malformed ({e}); moved to {} and started afresh.",
                    self.path.display(),
                    aside.display()
                ));
                return encode(None::<&RingEvent>, true);
            }
        };

        let canonical = csv::ReaderBuilder::new()
            .from_reader(bytes.as_slice())
            .headers()
            .is_ok_and(|h| h.iter().eq(COLUMNS.iter().copied()));
        if canonical {
            return Ok(bytes);
        }

        warning(format!(
            "Upgrading log header of {} to: {}",
            self.path.display(),
            COLUMNS.join(",")
        ));
        let mut out = encode(None::<&RingEvent>, true)?;
        for ev in &events {
            out.extend(encode(Some(ev), false)?);
        }
        Ok(out)
    }

    fn corrupt_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".corrupt");
        PathBuf::from(name)
    }

    fn tmp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "doorbell_log.csv".to_string());
        self.path.with_file_name(format!(".{name}.tmp"))
    }

    /// Replace the file in one step so readers see either the old or the new log.
    fn write_atomic(&self, contents: &[u8]) -> io::Result<()> {
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }
        let tmp = self.tmp_path();
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, &self.path)
    }
}

impl LogStore for CsvStore {
    fn path(&self) -> &Path {
        &self.path
    }

    fn stamp(&self) -> StoreStamp {
        StoreStamp::of_text_file(&self.path)
    }

    fn load(&self) -> Vec<RingEvent> {
        let bytes = match fs::read(&self.path) {
            Ok(b) => b,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warning(format!("Ring log unreadable ({e}); showing it as empty."));
                return Vec::new();
            }
        };

        parse(&bytes).unwrap_or_else(|e| {
            warning(format!(
                "Ring log {} is malformed ({e}); showing it as empty.",
                self.path.display()
            ));
            Vec::new()
        })
    }

    fn append(&self, event: &RingEvent) -> AppResult<()> {
        let existing = match fs::read(&self.path) {
            Ok(b) => Some(b),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };

        let contents = self.next_contents(existing, event)?;
        self.write_atomic(&contents)?;
        Ok(())
    }

    fn clear(&self) -> AppResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn init(&self) -> AppResult<()> {
        if !self.path.exists() {
            self.write_atomic(&encode(None::<&RingEvent>, true)?)?;
        }
        Ok(())
    }
}

fn parse(bytes: &[u8]) -> Result<Vec<RingEvent>, csv::Error> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(bytes);
    rdr.deserialize().collect()
}

/// Header and/or one record as CSV bytes.
fn encode(event: Option<&RingEvent>, header: bool) -> AppResult<Vec<u8>> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    if header {
        wtr.write_record(COLUMNS)?;
    }
    if let Some(ev) = event {
        wtr.write_record(ev.to_row())?;
    }
    wtr.into_inner()
        .map_err(|e| io::Error::other(e.to_string()).into())
}
