//! SQLite backend: one `rings` row per event plus the `log` audit table.

use crate::db::log::audit;
use crate::db::migrate::{run_pending_migrations, table_columns, table_exists};
use crate::db::pool::DbPool;
use crate::db::store::{LogStore, StoreStamp};
use crate::errors::AppResult;
use crate::models::ring_event::{COLUMNS, RingEvent};
use crate::ui::messages::warning;
use rusqlite::{Connection, params};
use std::fs;
use std::path::{Path, PathBuf};

pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read-write connection with a current schema. Creates the file.
    pub fn open(&self) -> AppResult<DbPool> {
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }
        let pool = DbPool::new(&self.path)?;
        run_pending_migrations(&pool.conn)?;
        Ok(pool)
    }

    fn read_rows(&self) -> rusqlite::Result<Vec<RingEvent>> {
        let pool = DbPool::read_only(&self.path)?;
        let conn = &pool.conn;

        if !table_exists(conn, "rings")? {
            return Ok(Vec::new());
        }

        let sql = select_all_sql(conn)?;
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map([], |row| {
            let photo: String = row.get(6)?;
            Ok(RingEvent {
                timestamp: row.get(0)?,
                name: row.get(1)?,
                username: row.get(2)?,
                badge: row.get(3)?,
                note: row.get(4)?,
                shift: row.get(5)?,
                photo_ref: Some(photo).filter(|p| !p.is_empty()),
            })
        })?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    fn row_stamp(&self) -> Option<(i64, i64)> {
        let pool = DbPool::read_only(&self.path).ok()?;
        if !table_exists(&pool.conn, "rings").ok()? {
            return Some((0, 0));
        }
        pool.conn
            .query_row("SELECT COUNT(*), IFNULL(MAX(id), 0) FROM rings", [], |r| {
                Ok((r.get(0)?, r.get(1)?))
            })
            .ok()
    }
}

/// SELECT of every log column; columns missing from an old table read as ''.
fn select_all_sql(conn: &Connection) -> rusqlite::Result<String> {
    let present = table_columns(conn, "rings")?;
    let cols: Vec<String> = COLUMNS
        .iter()
        .map(|c| {
            if present.iter().any(|p| p == c) {
                format!("CAST(IFNULL({c}, '') AS TEXT)")
            } else {
                "''".to_string()
            }
        })
        .collect();
    Ok(format!("SELECT {} FROM rings ORDER BY id ASC", cols.join(", ")))
}

impl LogStore for SqliteStore {
    fn path(&self) -> &Path {
        &self.path
    }

    fn stamp(&self) -> StoreStamp {
        match StoreStamp::of_file(&self.path) {
            StoreStamp::Present { len, modified, .. } => StoreStamp::Present {
                len,
                modified,
                rows: self.row_stamp(),
                tail: None,
            },
            StoreStamp::Missing => StoreStamp::Missing,
        }
    }

    fn load(&self) -> Vec<RingEvent> {
        if !self.path.exists() {
            return Vec::new();
        }
        self.read_rows().unwrap_or_else(|e| {
            warning(format!(
                "Ring database {} is unreadable ({e}); showing it as empty.",
                self.path.display()
            ));
            Vec::new()
        })
    }

    fn append(&self, event: &RingEvent) -> AppResult<()> {
        let mut pool = self.open()?;
        let tx = pool.conn.transaction()?;
        tx.execute(
            "INSERT INTO rings (timestamp, name, username, badge, note, shift, photo_ref)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                event.timestamp,
                event.name,
                event.username,
                event.badge,
                event.note,
                event.shift,
                event.photo_str(),
            ],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn clear(&self) -> AppResult<()> {
        if !self.path.exists() {
            return Ok(());
        }
        let mut pool = self.open()?;
        let tx = pool.conn.transaction()?;
        let removed = tx.execute("DELETE FROM rings", [])?;
        audit(
            &tx,
            "clear",
            &self.path.to_string_lossy(),
            &format!("Ring log reset ({removed} events removed)"),
        )?;
        tx.commit()?;
        Ok(())
    }

    fn init(&self) -> AppResult<()> {
        let pool = self.open()?;
        audit(
            &pool.conn,
            "init",
            &self.path.to_string_lossy(),
            "Ring database initialized",
        )?;
        Ok(())
    }
}
