use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::shift::ShiftScheduler;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::time::parse_at;
use chrono::Local;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Shift { at } = cmd {
        let scheduler = ShiftScheduler::new(cfg.shifts.clone());

        let now = Local::now().naive_local();
        let moment = match at {
            Some(s) => parse_at(s, now.date())?,
            None => now,
        };

        println!("Shift: {}", scheduler.detect_shift(moment));
        info(format!(
            "At {} | {}",
            moment.format("%Y-%m-%d %H:%M"),
            scheduler.describe()
        ));
    }
    Ok(())
}
