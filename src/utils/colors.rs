/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const GREEN: &str = "\x1b[32m";
pub const CYAN: &str = "\x1b[36m";

/// Grey placeholder for empty values, the value itself otherwise.
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() {
        format!("{GREY}-{RESET}")
    } else {
        value.to_string()
    }
}

/// "ON" in green / "off" in grey.
pub fn on_off(flag: bool) -> String {
    if flag {
        format!("{GREEN}ON{RESET}")
    } else {
        format!("{GREY}off{RESET}")
    }
}
