use crate::cli::commands::admin::{ask_confirmation, require_admin};
use crate::cli::parser::Commands;
use crate::config::{Backend, Config};
use crate::core::backup::archive_log;
use crate::db::RingEventLog;
use crate::db::log::audit;
use crate::db::sqlite_store::SqliteStore;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use std::path::Path;

/// Admin reset of the ring log, archived to a zip first unless `--no-backup`.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Clear {
        yes,
        no_backup,
        admin,
    } = cmd
    {
        require_admin(admin, cfg)?;

        let path = cfg.log_file();
        if !path.exists() {
            info(format!("Nothing to clear at {}", path.display()));
            return Ok(());
        }

        if !*yes && !ask_confirmation(&format!("All rings in {} will be deleted.", path.display()))
        {
            warning("Clear cancelled.");
            return Ok(());
        }

        if !*no_backup && let Some(zip) = archive_log(&path)? {
            success(format!("Ring log archived to {}", zip.display()));
            if cfg.backend == Backend::Sqlite {
                record_backup(&path, &zip)?;
            }
        }

        RingEventLog::open(cfg).clear()?;
        success("Ring log cleared.");
    }
    Ok(())
}

fn record_backup(db: &Path, zip: &Path) -> AppResult<()> {
    let pool = SqliteStore::new(db).open()?;
    audit(
        &pool.conn,
        "backup",
        &zip.to_string_lossy(),
        "Ring log archived before clear",
    )
}
