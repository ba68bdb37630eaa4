use crate::cli::commands::admin::require_admin;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::controller::{RingController, RingOutcome};
use crate::core::keyboard::KioskInputState;
use crate::core::photo::DirPhotoStore;
use crate::core::shift::{ShiftMode, ShiftScheduler};
use crate::db::RingEventLog;
use crate::errors::{AppError, AppResult};
use crate::models::field::FieldId;
use crate::models::ring_event::RingEvent;
use crate::ui::messages::{ring, warning};
use chrono::Local;
use std::fs;

/// One-shot manual ring from command-line values.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Ring {
        name,
        username,
        badge,
        note,
        photo,
        shift,
        admin,
    } = cmd
    {
        let scheduler = ShiftScheduler::new(cfg.shifts.clone());

        let mode = match shift {
            Some(s) => {
                require_admin(admin, cfg)?;
                ShiftMode::parse(s, &scheduler)?
            }
            None => ShiftMode::Auto,
        };

        let photo_bytes = match photo {
            Some(p) => Some(
                fs::read(p).map_err(|e| AppError::Photo(format!("cannot read {p}: {e}")))?,
            ),
            None => None,
        };

        let mut state = KioskInputState::new(cfg.badge_auto_ring_len);
        for (id, value) in [
            (FieldId::Name, name),
            (FieldId::Username, username),
            (FieldId::Badge, badge),
            (FieldId::Note, note),
        ] {
            if let Some(v) = value {
                state.set_field(id, v);
            }
        }

        let log = RingEventLog::open(cfg);
        let photos = DirPhotoStore::new(cfg.photos_path());
        let controller = RingController::new(&scheduler, &log, &photos, cfg.require_photo);

        let outcome = controller.ring(
            &mut state,
            photo_bytes.as_deref(),
            &mode,
            Local::now().naive_local(),
        )?;

        report(&outcome)?;
    }
    Ok(())
}

/// Print the outcome of a ring attempt; a rejection is an error.
pub(crate) fn report(outcome: &RingOutcome) -> AppResult<()> {
    match outcome {
        RingOutcome::Rejected(reason) => {
            warning(reason);
            Err(AppError::Rejected(reason.to_string()))
        }
        RingOutcome::Persisted { event, warning: w } => {
            if let Some(w) = w {
                warning(w);
            }
            announce(event);
            Ok(())
        }
    }
}

pub(crate) fn announce(event: &RingEvent) {
    ring(format!(
        "Ring sent to the {} shift at {}",
        event.shift, event.timestamp
    ));
}
