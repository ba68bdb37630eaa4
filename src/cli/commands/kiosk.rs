//! Line-driven kiosk: each stdin line is a key press, a command, or text to
//! type. A pending scanner auto-ring is attempted after every line.

use crate::cli::commands::ring::announce;
use crate::config::Config;
use crate::core::auth::PlainCredentials;
use crate::core::controller::{RingController, RingOutcome};
use crate::core::keyboard::KioskInputState;
use crate::core::photo::DirPhotoStore;
use crate::core::session::KioskSession;
use crate::core::shift::{ShiftMode, ShiftScheduler};
use crate::db::RingEventLog;
use crate::errors::AppResult;
use crate::models::field::FieldId;
use crate::models::key::KeyToken;
use crate::ui::messages::{error, header, info, success, warning};
use crate::utils::colors::{CYAN, RESET, colorize_optional, on_off};
use chrono::Local;
use std::fs;
use std::io::{self, BufRead};

const HELP: &str = "\
text            type on the on-screen keyboard
:space :back :clear :caps :sym
:field NAME     name | username | badge | note
:scan VALUE     badge scanner input
:ring           press RING
:photo FILE     attach a snapshot (:photo none drops it)
:keys           show the keyboard layer
:status         show the form
:admin USER PASS / :logout
:shift auto|NAME   (admin) pin the shift label
:reset          (admin) clear the form
:quit";

#[derive(Debug, PartialEq, Eq)]
enum Step {
    Continue { manual: bool },
    Quit,
}

pub fn handle(cfg: &Config) -> AppResult<()> {
    let scheduler = ShiftScheduler::new(cfg.shifts.clone());
    let log = RingEventLog::open(cfg);
    let photos = DirPhotoStore::new(cfg.photos_path());
    let creds = PlainCredentials::from_config(cfg);
    let controller = RingController::new(&scheduler, &log, &photos, cfg.require_photo);

    let mut session = KioskSession::new(
        KioskInputState::new(cfg.badge_auto_ring_len),
        controller,
        &scheduler,
        &creds,
    );

    header("doorbell kiosk");
    info(format!("Shifts: {}", scheduler.describe()));
    info("Type :help for commands, :quit to leave.");

    for line in io::stdin().lock().lines() {
        let line = line?;
        match apply_line(&mut session, &line) {
            Step::Quit => break,
            Step::Continue { manual } => poll(&mut session, manual),
        }
    }

    Ok(())
}

fn poll(session: &mut KioskSession<'_>, manual: bool) {
    match session.poll_ring(manual, Local::now().naive_local()) {
        Ok(Some(RingOutcome::Rejected(reason))) => warning(reason),
        Ok(Some(RingOutcome::Persisted { event, warning: w })) => {
            if let Some(w) = w {
                warning(w);
            }
            announce(&event);
        }
        Ok(None) => {}
        // form and pending flag are kept; the visitor can retry
        Err(e) => error(e),
    }
}

fn apply_line(session: &mut KioskSession<'_>, line: &str) -> Step {
    let line = line.trim_end_matches(['\r', '\n']);

    let Some(command) = line.strip_prefix(':') else {
        session.type_text(line);
        return Step::Continue { manual: false };
    };

    let (word, arg) = match command.split_once(' ') {
        Some((w, a)) => (w, a.trim()),
        None => (command, ""),
    };

    if let Some(key) = KeyToken::from_control(word) {
        session.press(key);
        return Step::Continue { manual: false };
    }

    match word.to_lowercase().as_str() {
        "quit" | "exit" => return Step::Quit,
        "ring" => return Step::Continue { manual: true },
        "help" => println!("{HELP}"),
        "field" => match FieldId::parse(arg) {
            Ok(id) => session.select_field(id),
            Err(e) => warning(e),
        },
        "scan" => session.scan(arg),
        "photo" => attach_photo(session, arg),
        "keys" => print_keys(session),
        "status" => print_status(session),
        "admin" => {
            let (user, pass) = arg.split_once(' ').unwrap_or((arg, ""));
            if session.login(user.trim(), pass.trim()) {
                success("Admin mode enabled.");
            } else {
                warning("Admin login failed.");
            }
        }
        "logout" => {
            session.logout();
            info("Admin mode disabled; shift back to auto.");
        }
        "shift" => match session.set_shift_mode(arg) {
            Ok(()) => info(format!("Shift mode: {}", describe_mode(session.shift_mode()))),
            Err(e) => warning(e),
        },
        "reset" => match session.clear_form() {
            Ok(()) => info("Form cleared."),
            Err(e) => warning(e),
        },
        other => warning(format!("Unknown command ':{other}' (try :help)")),
    }

    Step::Continue { manual: false }
}

fn attach_photo(session: &mut KioskSession<'_>, arg: &str) {
    if arg.is_empty() || arg.eq_ignore_ascii_case("none") {
        session.set_photo(None);
        info("Photo discarded.");
        return;
    }
    match fs::read(arg) {
        Ok(bytes) => {
            session.set_photo(Some(bytes));
            info(format!("Photo captured from {arg}"));
        }
        Err(e) => warning(format!("Cannot read photo {arg}: {e}")),
    }
}

fn describe_mode(mode: &ShiftMode) -> String {
    match mode.pinned() {
        Some(name) => format!("pinned to {name}"),
        None => "auto".to_string(),
    }
}

fn print_keys(session: &KioskSession<'_>) {
    for row in session.state().layout() {
        println!("  {}", row.join(" "));
    }
    println!("  SPACE ⌫ CLEAR CAPS SYM");
}

fn print_status(session: &KioskSession<'_>) {
    let st = session.state();
    for id in FieldId::ALL {
        let marker = if id == st.active_field() { ">" } else { " " };
        println!(
            "{marker} {CYAN}{:<17}{RESET} {}",
            id.label(),
            colorize_optional(st.field(id))
        );
    }
    println!(
        "  caps {} | symbols {} | photo {} | admin {}",
        on_off(st.caps_on()),
        on_off(st.symbols_on()),
        on_off(session.has_photo()),
        on_off(session.is_admin())
    );
    println!(
        "  shift {} ({})",
        session.effective_shift(Local::now().naive_local()),
        describe_mode(session.shift_mode())
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::csv_store::CsvStore;
    use crate::models::shift::default_shifts;

    fn log(name: &str) -> RingEventLog {
        let p = std::env::temp_dir().join(format!("doorbell_kiosk_{name}.csv"));
        fs::remove_file(&p).ok();
        RingEventLog::new(Box::new(CsvStore::new(p)))
    }

    #[test]
    fn lines_map_to_session_actions() {
        let sched = ShiftScheduler::new(default_shifts());
        let log = log("lines");
        let photos = DirPhotoStore::new(std::env::temp_dir().join("doorbell_kiosk_photos"));
        let creds = PlainCredentials::new("admin", "doorbell");
        let ctrl = RingController::new(&sched, &log, &photos, false);
        let mut s = KioskSession::new(KioskInputState::default(), ctrl, &sched, &creds);

        assert_eq!(apply_line(&mut s, ":field name"), Step::Continue { manual: false });
        apply_line(&mut s, "ann");
        apply_line(&mut s, ":space");
        apply_line(&mut s, ":caps");
        apply_line(&mut s, "b");
        assert_eq!(s.state().field(FieldId::Name), "ann B");
        assert!(s.state().caps_on());

        apply_line(&mut s, ":scan 00042");
        assert_eq!(s.state().field(FieldId::Badge), "00042");
        assert!(s.state().pending_auto_ring());

        assert_eq!(apply_line(&mut s, ":ring"), Step::Continue { manual: true });
        assert_eq!(apply_line(&mut s, ":quit"), Step::Quit);
    }

    #[test]
    fn admin_commands_are_gated() {
        let sched = ShiftScheduler::new(default_shifts());
        let log = log("gated");
        let photos = DirPhotoStore::new(std::env::temp_dir().join("doorbell_kiosk_photos"));
        let creds = PlainCredentials::new("admin", "doorbell");
        let ctrl = RingController::new(&sched, &log, &photos, false);
        let mut s = KioskSession::new(KioskInputState::default(), ctrl, &sched, &creds);

        apply_line(&mut s, ":shift Night");
        assert_eq!(s.shift_mode(), &ShiftMode::Auto);

        apply_line(&mut s, ":admin admin doorbell");
        assert!(s.is_admin());
        apply_line(&mut s, ":shift Night");
        assert_eq!(s.shift_mode(), &ShiftMode::Pinned("Night".into()));

        apply_line(&mut s, "123");
        apply_line(&mut s, ":reset");
        assert_eq!(s.state().field(FieldId::Badge), "");

        apply_line(&mut s, ":logout");
        assert!(!s.is_admin());
        assert_eq!(s.shift_mode(), &ShiftMode::Auto);
    }

    #[test]
    fn scan_then_poll_persists_once() {
        let sched = ShiftScheduler::new(default_shifts());
        let log = log("poll");
        let photos = DirPhotoStore::new(std::env::temp_dir().join("doorbell_kiosk_photos"));
        let creds = PlainCredentials::new("admin", "doorbell");
        let ctrl = RingController::new(&sched, &log, &photos, false);
        let mut s = KioskSession::new(KioskInputState::default(), ctrl, &sched, &creds);

        if let Step::Continue { manual } = apply_line(&mut s, ":scan 12345") {
            poll(&mut s, manual);
        }
        poll(&mut s, false);
        assert_eq!(log.snapshot().unwrap().len(), 1);
    }
}
