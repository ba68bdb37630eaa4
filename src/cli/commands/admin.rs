use crate::cli::parser::AdminArgs;
use crate::config::Config;
use crate::core::auth::{CredentialVerifier, PlainCredentials};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::warning;
use std::io::{self, Write};

/// Fail with `Unauthorized` unless the given (or prompted) credentials are
/// the configured admin pair.
pub fn require_admin(args: &AdminArgs, cfg: &Config) -> AppResult<()> {
    let user = match &args.user {
        Some(u) => u.clone(),
        None => prompt("Admin user: ")?,
    };
    let pass = match &args.password {
        Some(p) => p.clone(),
        None => prompt("Admin password: ")?,
    };

    if PlainCredentials::from_config(cfg).verify(&user, &pass) {
        Ok(())
    } else {
        warning("Admin login failed.");
        Err(AppError::Unauthorized)
    }
}

fn prompt(label: &str) -> AppResult<String> {
    print!("{label}");
    io::stdout().flush().ok();

    let mut s = String::new();
    io::stdin().read_line(&mut s)?;
    Ok(s.trim_end_matches(['\r', '\n']).to_string())
}

/// Yes/no question on stdin; anything but y/yes is a no.
pub fn ask_confirmation(question: &str) -> bool {
    warning(question);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}
