use crate::cli::parser::Commands;
use crate::core::tone::chime;
use crate::errors::AppResult;
use crate::ui::messages::success;
use std::fs;
use std::path::Path;

pub fn handle(cmd: &Commands) -> AppResult<()> {
    if let Commands::Tone { file } = cmd {
        let path = Path::new(file);
        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, chime())?;
        success(format!("Chime written to {}", path.display()));
    }
    Ok(())
}
