use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::log::LogLogic;
use crate::errors::AppResult;
use crate::ui::messages::info;

/// `log --print`: the SQLite audit trail (init, clear, backup, migrations).
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    match cmd {
        Commands::Log { print: true } => LogLogic::print_log(cfg),
        Commands::Log { print: false } => {
            info("Nothing to do: use `doorbell log --print`.");
            Ok(())
        }
        _ => Ok(()),
    }
}
