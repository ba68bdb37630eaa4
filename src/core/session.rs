//! A kiosk session: owns the input state for as long as the terminal runs
//! and routes ring attempts and admin actions.

use crate::core::auth::CredentialVerifier;
use crate::core::controller::{RingController, RingOutcome};
use crate::core::keyboard::KioskInputState;
use crate::core::shift::{ShiftMode, ShiftScheduler};
use crate::errors::{AppError, AppResult};
use crate::models::field::FieldId;
use crate::models::key::KeyToken;
use chrono::NaiveDateTime;

pub struct KioskSession<'a> {
    state: KioskInputState,
    photo: Option<Vec<u8>>,
    mode: ShiftMode,
    admin: bool,
    controller: RingController<'a>,
    scheduler: &'a ShiftScheduler,
    verifier: &'a dyn CredentialVerifier,
}

impl<'a> KioskSession<'a> {
    pub fn new(
        state: KioskInputState,
        controller: RingController<'a>,
        scheduler: &'a ShiftScheduler,
        verifier: &'a dyn CredentialVerifier,
    ) -> Self {
        Self {
            state,
            photo: None,
            mode: ShiftMode::Auto,
            admin: false,
            controller,
            scheduler,
            verifier,
        }
    }

    pub fn state(&self) -> &KioskInputState {
        &self.state
    }

    pub fn is_admin(&self) -> bool {
        self.admin
    }

    pub fn shift_mode(&self) -> &ShiftMode {
        &self.mode
    }

    pub fn has_photo(&self) -> bool {
        self.photo.is_some()
    }

    pub fn press(&mut self, key: KeyToken) {
        self.state.press(key);
    }

    pub fn type_text(&mut self, text: &str) {
        self.state.type_text(text);
    }

    pub fn select_field(&mut self, id: FieldId) {
        self.state.select_field(id);
    }

    pub fn scan(&mut self, value: &str) {
        self.state.scan_completed(value);
    }

    /// Latest captured photo; `None` discards it.
    pub fn set_photo(&mut self, bytes: Option<Vec<u8>>) {
        self.photo = bytes.filter(|b| !b.is_empty());
    }

    pub fn login(&mut self, user: &str, pass: &str) -> bool {
        self.admin = self.verifier.verify(user, pass);
        self.admin
    }

    pub fn logout(&mut self) {
        self.admin = false;
        self.mode = ShiftMode::Auto;
    }

    fn require_admin(&self) -> AppResult<()> {
        if self.admin {
            Ok(())
        } else {
            Err(AppError::Unauthorized)
        }
    }

    /// `auto` or a configured shift name.
    pub fn set_shift_mode(&mut self, raw: &str) -> AppResult<()> {
        self.require_admin()?;
        self.mode = ShiftMode::parse(raw, self.scheduler)?;
        Ok(())
    }

    pub fn clear_form(&mut self) -> AppResult<()> {
        self.require_admin()?;
        self.state.clear_form();
        Ok(())
    }

    pub fn effective_shift(&self, now: NaiveDateTime) -> &str {
        self.mode.resolve(self.scheduler, now)
    }

    /// Attempt a ring if the button was pressed or the scanner armed one.
    /// A persisted ring consumes the captured photo.
    pub fn poll_ring(&mut self, manual: bool, now: NaiveDateTime) -> AppResult<Option<RingOutcome>> {
        if RingController::should_ring(manual, &self.state).is_none() {
            return Ok(None);
        }

        let outcome =
            self.controller
                .ring(&mut self.state, self.photo.as_deref(), &self.mode, now)?;

        if outcome.is_persisted() {
            self.photo = None;
        }
        Ok(Some(outcome))
    }
}
