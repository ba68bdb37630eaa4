//! Schema creation and upgrades for the SQLite backend.

use crate::models::ring_event::COLUMNS;
use crate::ui::messages::{success, warning};
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` audit table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check if a table exists.
pub fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Column names of `table`, in declaration order.
pub fn table_columns(conn: &Connection, table: &str) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{table}')"))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    let mut out = Vec::new();
    for c in cols {
        out.push(c?);
    }
    Ok(out)
}

/// Create the `rings` table with the full schema.
fn create_rings_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS rings (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            timestamp  TEXT NOT NULL DEFAULT '',
            name       TEXT NOT NULL DEFAULT '',
            username   TEXT NOT NULL DEFAULT '',
            badge      TEXT NOT NULL DEFAULT '',
            note       TEXT NOT NULL DEFAULT '',
            shift      TEXT NOT NULL DEFAULT '',
            photo_ref  TEXT NOT NULL DEFAULT ''
        );

        CREATE INDEX IF NOT EXISTS idx_rings_timestamp ON rings(timestamp);
        "#,
    )?;
    Ok(())
}

/// Add any log column an older `rings` table lacks.
fn add_missing_columns(conn: &Connection) -> Result<()> {
    let present = table_columns(conn, "rings")?;

    for col in COLUMNS.iter().filter(|c| !present.iter().any(|p| p == *c)) {
        warning(format!("Adding '{col}' column to rings table..."));
        conn.execute(
            &format!("ALTER TABLE rings ADD COLUMN {col} TEXT NOT NULL DEFAULT ''"),
            [],
        )?;
        conn.execute(
            "INSERT INTO log (date, operation, target, message)
             VALUES (datetime('now'), 'migration_applied', ?1, 'Added missing column to rings')",
            [col],
        )?;
        success(format!("Migration applied: added '{col}' to rings table"));
    }

    Ok(())
}

/// Public entry point: make sure the schema is current.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    if table_exists(conn, "rings")? {
        add_missing_columns(conn)?;
    } else {
        create_rings_table(conn)?;
    }

    Ok(())
}
