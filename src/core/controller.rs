//! One ring attempt: decide, validate, persist.

use crate::core::keyboard::KioskInputState;
use crate::core::photo::PhotoStore;
use crate::core::shift::{ShiftMode, ShiftScheduler};
use crate::db::RingEventLog;
use crate::errors::AppResult;
use crate::models::field::FieldId;
use crate::models::ring_event::RingEvent;
use chrono::NaiveDateTime;
use std::fmt;

/// What started the attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingTrigger {
    Manual,
    Auto,
}

/// Validation failures; shown to the visitor, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    NoIdentifyingData,
    PhotoRequired,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::NoIdentifyingData => {
                f.write_str("Please provide at least a name, username, or a scanned badge.")
            }
            Rejection::PhotoRequired => f.write_str("Please take a photo before ringing."),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RingOutcome {
    Rejected(Rejection),
    Persisted {
        event: RingEvent,
        /// Set when the photo could not be stored; the ring still counts.
        warning: Option<String>,
    },
}

impl RingOutcome {
    pub fn is_persisted(&self) -> bool {
        matches!(self, RingOutcome::Persisted { .. })
    }
}

/// Everything a ring attempt reads besides the form itself.
pub struct RingController<'a> {
    scheduler: &'a ShiftScheduler,
    log: &'a RingEventLog,
    photos: &'a dyn PhotoStore,
    require_photo: bool,
}

impl<'a> RingController<'a> {
    pub fn new(
        scheduler: &'a ShiftScheduler,
        log: &'a RingEventLog,
        photos: &'a dyn PhotoStore,
        require_photo: bool,
    ) -> Self {
        Self {
            scheduler,
            log,
            photos,
            require_photo,
        }
    }

    /// A manual press wins; otherwise a pending scanner auto-ring fires.
    /// Both at once still yield a single attempt.
    pub fn should_ring(manual: bool, state: &KioskInputState) -> Option<RingTrigger> {
        if manual {
            Some(RingTrigger::Manual)
        } else if state.pending_auto_ring() {
            Some(RingTrigger::Auto)
        } else {
            None
        }
    }

    pub fn validate(&self, state: &KioskInputState, photo: Option<&[u8]>) -> Result<(), Rejection> {
        let has_ident = [FieldId::Name, FieldId::Username, FieldId::Badge]
            .iter()
            .any(|f| !state.field(*f).trim().is_empty());
        if !has_ident {
            return Err(Rejection::NoIdentifyingData);
        }

        if self.require_photo && photo.is_none_or(|p| p.is_empty()) {
            return Err(Rejection::PhotoRequired);
        }

        Ok(())
    }

    /// Run one attempt. `Err` only for storage failures of the log itself;
    /// the form is left untouched in every case.
    pub fn ring(
        &self,
        state: &mut KioskInputState,
        photo: Option<&[u8]>,
        mode: &ShiftMode,
        now: NaiveDateTime,
    ) -> AppResult<RingOutcome> {
        if let Err(reason) = self.validate(state, photo) {
            return Ok(RingOutcome::Rejected(reason));
        }

        let shift = mode.resolve(self.scheduler, now).to_string();

        let mut warning = None;
        let photo_ref = match photo.filter(|p| !p.is_empty()) {
            Some(bytes) => match self.photos.store(bytes, &photo_ident(state), now) {
                Ok(r) => Some(r),
                Err(e) => {
                    warning = Some(format!("Photo save failed: {e}"));
                    None
                }
            },
            None => None,
        };

        let event = RingEvent::new(
            now,
            state.field(FieldId::Name),
            state.field(FieldId::Username),
            state.field(FieldId::Badge),
            state.field(FieldId::Note),
            &shift,
            photo_ref,
        );

        self.log.append(&event)?;
        state.acknowledge_ring();

        Ok(RingOutcome::Persisted { event, warning })
    }
}

/// Badge, else username, else name (first non-empty, trimmed).
fn photo_ident(state: &KioskInputState) -> String {
    [FieldId::Badge, FieldId::Username, FieldId::Name]
        .iter()
        .map(|f| state.field(*f).trim())
        .find(|s| !s.is_empty())
        .unwrap_or("visitor")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::shift::UNSCHEDULED;
    use crate::db::csv_store::CsvStore;
    use crate::errors::AppError;
    use crate::models::filter::RingFilter;
    use crate::models::shift::default_shifts;
    use chrono::NaiveDate;
    use std::cell::RefCell;
    use std::fs;
    use std::path::PathBuf;

    struct FakePhotos {
        fail: bool,
        seen: RefCell<Vec<String>>,
    }

    impl FakePhotos {
        fn ok() -> Self {
            Self {
                fail: false,
                seen: RefCell::new(Vec::new()),
            }
        }
        fn failing() -> Self {
            Self {
                fail: true,
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl PhotoStore for FakePhotos {
        fn store(&self, _bytes: &[u8], ident: &str, _at: NaiveDateTime) -> AppResult<String> {
            self.seen.borrow_mut().push(ident.to_string());
            if self.fail {
                Err(AppError::Photo("disk full".into()))
            } else {
                Ok(format!("photos/{ident}.jpg"))
            }
        }
    }

    fn log(name: &str) -> RingEventLog {
        let p: PathBuf = std::env::temp_dir().join(format!("doorbell_ctrl_{name}.csv"));
        fs::remove_file(&p).ok();
        RingEventLog::new(Box::new(CsvStore::new(p)))
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 9, 5)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn empty_form_is_rejected_and_nothing_is_stored() {
        let sched = ShiftScheduler::new(default_shifts());
        let log = log("empty");
        let photos = FakePhotos::ok();
        let ctrl = RingController::new(&sched, &log, &photos, false);

        let mut st = KioskInputState::default();
        st.select_field(FieldId::Note);
        st.type_text("just a note");

        let out = ctrl.ring(&mut st, None, &ShiftMode::Auto, at(9, 0)).unwrap();
        assert_eq!(out, RingOutcome::Rejected(Rejection::NoIdentifyingData));
        assert!(log.query(&RingFilter::all()).unwrap().is_empty());
    }

    #[test]
    fn whitespace_only_identity_is_rejected() {
        let sched = ShiftScheduler::new(default_shifts());
        let log = log("blank");
        let photos = FakePhotos::ok();
        let ctrl = RingController::new(&sched, &log, &photos, false);

        let mut st = KioskInputState::default();
        st.type_text("   ");
        let out = ctrl.ring(&mut st, None, &ShiftMode::Auto, at(9, 0)).unwrap();
        assert_eq!(out, RingOutcome::Rejected(Rejection::NoIdentifyingData));
    }

    #[test]
    fn badge_only_ring_is_persisted_with_detected_shift() {
        let sched = ShiftScheduler::new(default_shifts());
        let log = log("badge");
        let photos = FakePhotos::ok();
        let ctrl = RingController::new(&sched, &log, &photos, false);

        let mut st = KioskInputState::default();
        st.scan_completed("12345");
        assert_eq!(
            RingController::should_ring(false, &st),
            Some(RingTrigger::Auto)
        );

        let out = ctrl.ring(&mut st, None, &ShiftMode::Auto, at(23, 0)).unwrap();
        match out {
            RingOutcome::Persisted { event, warning } => {
                assert_eq!(event.shift, "Night");
                assert_eq!(event.badge, "12345");
                assert_eq!(event.timestamp, "2025-09-05T23:00:00");
                assert!(warning.is_none());
            }
            other => panic!("unexpected {other:?}"),
        }

        assert!(!st.pending_auto_ring());
        assert_eq!(st.field(FieldId::Badge), "12345");
        assert_eq!(log.query(&RingFilter::all()).unwrap().len(), 1);
    }

    #[test]
    fn pinned_shift_overrides_detection() {
        let sched = ShiftScheduler::new(default_shifts());
        let log = log("pinned");
        let photos = FakePhotos::ok();
        let ctrl = RingController::new(&sched, &log, &photos, false);

        let mut st = KioskInputState::default();
        st.scan_completed("12345");
        let mode = ShiftMode::Pinned("Day".into());
        let out = ctrl.ring(&mut st, None, &mode, at(2, 0)).unwrap();
        let RingOutcome::Persisted { event, .. } = out else {
            panic!("not persisted");
        };
        assert_eq!(event.shift, "Day");
    }

    #[test]
    fn unscheduled_time_still_rings() {
        let sched = ShiftScheduler::new(default_shifts());
        let log = log("unscheduled");
        let photos = FakePhotos::ok();
        let ctrl = RingController::new(&sched, &log, &photos, false);

        let mut st = KioskInputState::default();
        st.select_field(FieldId::Name);
        st.type_text("ann");
        let out = ctrl.ring(&mut st, None, &ShiftMode::Auto, at(17, 10)).unwrap();
        let RingOutcome::Persisted { event, .. } = out else {
            panic!("not persisted");
        };
        assert_eq!(event.shift, UNSCHEDULED);
    }

    #[test]
    fn fields_are_trimmed_on_persist() {
        let sched = ShiftScheduler::new(default_shifts());
        let log = log("trim");
        let photos = FakePhotos::ok();
        let ctrl = RingController::new(&sched, &log, &photos, false);

        let mut st = KioskInputState::default();
        st.scan_completed("  777  ");
        st.select_field(FieldId::Note);
        st.type_text(" hi ");
        let out = ctrl.ring(&mut st, None, &ShiftMode::Auto, at(9, 0)).unwrap();
        let RingOutcome::Persisted { event, .. } = out else {
            panic!("not persisted");
        };
        assert_eq!(event.badge, "777");
        assert_eq!(event.note, "hi");
    }

    #[test]
    fn required_photo_missing_is_rejected() {
        let sched = ShiftScheduler::new(default_shifts());
        let log = log("photo_required");
        let photos = FakePhotos::ok();
        let ctrl = RingController::new(&sched, &log, &photos, true);

        let mut st = KioskInputState::default();
        st.scan_completed("12345");
        let out = ctrl.ring(&mut st, None, &ShiftMode::Auto, at(9, 0)).unwrap();
        assert_eq!(out, RingOutcome::Rejected(Rejection::PhotoRequired));
        assert!(st.pending_auto_ring());

        let out = ctrl
            .ring(&mut st, Some(b"jpeg"), &ShiftMode::Auto, at(9, 0))
            .unwrap();
        assert!(out.is_persisted());
    }

    #[test]
    fn photo_is_named_after_first_identity() {
        let sched = ShiftScheduler::new(default_shifts());
        let log = log("photo_ident");
        let photos = FakePhotos::ok();
        let ctrl = RingController::new(&sched, &log, &photos, false);

        let mut st = KioskInputState::default();
        st.select_field(FieldId::Username);
        st.type_text("jdoe");
        let out = ctrl
            .ring(&mut st, Some(b"jpeg"), &ShiftMode::Auto, at(9, 0))
            .unwrap();
        let RingOutcome::Persisted { event, .. } = out else {
            panic!("not persisted");
        };
        assert_eq!(event.photo_ref.as_deref(), Some("photos/jdoe.jpg"));
        assert_eq!(photos.seen.borrow().as_slice(), ["jdoe"]);
    }

    #[test]
    fn photo_failure_is_only_a_warning() {
        let sched = ShiftScheduler::new(default_shifts());
        let log = log("photo_fail");
        let photos = FakePhotos::failing();
        let ctrl = RingController::new(&sched, &log, &photos, false);

        let mut st = KioskInputState::default();
        st.scan_completed("12345");
        let out = ctrl
            .ring(&mut st, Some(b"jpeg"), &ShiftMode::Auto, at(9, 0))
            .unwrap();
        match out {
            RingOutcome::Persisted { event, warning } => {
                assert_eq!(event.photo_ref, None);
                assert!(warning.unwrap().contains("disk full"));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(log.query(&RingFilter::all()).unwrap().len(), 1);
    }

    #[test]
    fn storage_failure_propagates_and_keeps_pending() {
        let sched = ShiftScheduler::new(default_shifts());
        let dir = std::env::temp_dir().join("doorbell_ctrl_dir_as_log.csv");
        fs::create_dir_all(&dir).unwrap();
        let log = RingEventLog::new(Box::new(CsvStore::new(dir)));
        let photos = FakePhotos::ok();
        let ctrl = RingController::new(&sched, &log, &photos, false);

        let mut st = KioskInputState::default();
        st.scan_completed("12345");
        let res = ctrl.ring(&mut st, None, &ShiftMode::Auto, at(9, 0));
        assert!(matches!(res, Err(AppError::Storage(_))));
        assert!(st.pending_auto_ring());
    }

    #[test]
    fn manual_press_and_pending_auto_ring_give_one_trigger() {
        let mut st = KioskInputState::default();
        assert_eq!(RingController::should_ring(false, &st), None);
        st.scan_completed("99999");
        assert_eq!(
            RingController::should_ring(true, &st),
            Some(RingTrigger::Manual)
        );
    }
}
