use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::RingEventLog;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use std::path::PathBuf;

/// Handle the `init` command
///
/// This initializes:
///  - the configuration file (written only if missing)
///  - an empty ring log (CSV header or SQLite schema)
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let path = cli
        .config
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(Config::config_file);

    info("Initializing doorbell…");

    if path.exists() {
        info(format!("Config file : {} (kept)", path.display()));
    } else {
        cfg.save(&path)?;
        info(format!("Config file : {} (created)", path.display()));
    }

    let log = RingEventLog::open(cfg);
    log.store().init()?;
    info(format!("Ring log    : {}", cfg.log_file().display()));

    success("doorbell initialization completed!");
    Ok(())
}
