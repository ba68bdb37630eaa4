use crate::cli::commands::admin::require_admin;
use crate::cli::commands::list::build_filter;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::RingEventLog;
use crate::errors::AppResult;
use crate::export::{ExportFormat, ExportLogic};
use crate::ui::messages::info;
use std::path::Path;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        range,
        shifts,
        search,
        force,
        admin,
    } = cmd
    {
        require_admin(admin, cfg)?;

        let filter = build_filter(range.as_deref(), shifts, search.as_deref())?;
        let log = RingEventLog::open(cfg);

        let format = ExportFormat::resolve(*format, Path::new(file));

        let n = ExportLogic::export(&log, format, file, &filter, &cfg.shift_names(), *force)?;
        if n > 0 {
            info(format!("{n} ring(s) exported as {}.", format.as_str()));
        }
    }
    Ok(())
}
