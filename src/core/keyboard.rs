//! On-screen keyboard state for one kiosk session.
//!
//! Holds the four form fields, the CAPS / symbols modifiers, the field the
//! keyboard currently types into, and the scanner auto-ring flag.

use crate::models::field::FieldId;
use crate::models::key::KeyToken;

/// Badge length (trimmed) that makes a scan ring on its own.
pub const DEFAULT_AUTO_RING_LEN: usize = 5;

const ALPHA_ROWS: [&str; 4] = ["1234567890", "qwertyuiop", "asdfghjkl", "zxcvbnm"];
const ALPHA_EXTRA: [char; 5] = ['@', '.', '-', '_', '/'];
const SYMBOL_ROWS: [&str; 4] = ["!@#$%^&*()", "~`|\\/?", "[]{}<>", ":;\"'.,+"];
const SYMBOL_EXTRA: [char; 4] = ['=', '-', '_', '+'];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KioskInputState {
    fields: [String; 4],
    active_field: FieldId,
    caps_on: bool,
    symbols_on: bool,
    pending_auto_ring: bool,
    auto_ring_len: usize,
}

impl Default for KioskInputState {
    fn default() -> Self {
        Self::new(DEFAULT_AUTO_RING_LEN)
    }
}

impl KioskInputState {
    /// Fresh session: empty fields, keyboard on the badge field, no modifiers.
    pub fn new(auto_ring_len: usize) -> Self {
        Self {
            fields: Default::default(),
            active_field: FieldId::Badge,
            caps_on: false,
            symbols_on: false,
            pending_auto_ring: false,
            auto_ring_len,
        }
    }

    pub fn field(&self, id: FieldId) -> &str {
        &self.fields[id.index()]
    }

    pub fn active_field(&self) -> FieldId {
        self.active_field
    }

    pub fn caps_on(&self) -> bool {
        self.caps_on
    }

    pub fn symbols_on(&self) -> bool {
        self.symbols_on
    }

    pub fn pending_auto_ring(&self) -> bool {
        self.pending_auto_ring
    }

    pub fn auto_ring_len(&self) -> usize {
        self.auto_ring_len
    }

    /// Re-target the keyboard. Selecting the active field is a no-op.
    pub fn select_field(&mut self, id: FieldId) {
        self.active_field = id;
    }

    /// Apply one key press to the active field.
    pub fn press(&mut self, key: KeyToken) {
        match key {
            KeyToken::CapsToggle => {
                // caps only exists on the alphabetic layer
                if !self.symbols_on {
                    self.caps_on = !self.caps_on;
                }
            }
            KeyToken::SymbolsToggle => self.symbols_on = !self.symbols_on,
            KeyToken::Backspace => self.edit_active(|s| {
                s.pop();
            }),
            KeyToken::Clear => self.edit_active(String::clear),
            KeyToken::Space => self.edit_active(|s| s.push(' ')),
            KeyToken::Char(c) => {
                let (caps, symbols) = (self.caps_on, self.symbols_on);
                self.edit_active(|s| push_folded(s, c, caps, symbols));
            }
        }
    }

    /// Press every character of `text` in order (blanks become SPACE).
    pub fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.press(KeyToken::from_char(c));
        }
    }

    /// A barcode scanner finished: the badge is replaced wholesale.
    pub fn scan_completed(&mut self, value: &str) {
        let badge = &mut self.fields[FieldId::Badge.index()];
        if badge.as_str() != value {
            *badge = value.to_string();
            self.badge_changed();
        }
    }

    /// Replace a field wholesale with text that did not come from the
    /// on-screen keys (command-line values). The badge goes through the
    /// scanner path so the auto-ring rule still applies.
    pub fn set_field(&mut self, id: FieldId, value: &str) {
        if id == FieldId::Badge {
            self.scan_completed(value);
        } else {
            self.fields[id.index()] = value.to_string();
        }
    }

    /// Explicit "clear form": every field back to empty. Modifiers and the
    /// active field are kept.
    pub fn clear_form(&mut self) {
        for f in self.fields.iter_mut() {
            f.clear();
        }
    }

    /// Called by the controller once a ring has been persisted.
    pub(crate) fn acknowledge_ring(&mut self) {
        self.pending_auto_ring = false;
    }

    /// Label rows of the current keyboard layer, extras last.
    pub fn layout(&self) -> Vec<Vec<String>> {
        let (rows, extra): (&[&str], &[char]) = if self.symbols_on {
            (&SYMBOL_ROWS, &SYMBOL_EXTRA)
        } else {
            (&ALPHA_ROWS, &ALPHA_EXTRA)
        };

        let label = |c: char| -> String {
            if !self.symbols_on && self.caps_on && c.is_alphabetic() {
                c.to_uppercase().collect()
            } else {
                c.to_string()
            }
        };

        let mut out: Vec<Vec<String>> = rows
            .iter()
            .map(|r| r.chars().map(&label).collect())
            .collect();
        out.push(extra.iter().map(|c| c.to_string()).collect());
        out
    }

    fn edit_active<F: FnOnce(&mut String)>(&mut self, f: F) {
        let target = self.active_field;
        let slot = &mut self.fields[target.index()];
        let snapshot = (target == FieldId::Badge).then(|| slot.clone());

        f(slot);

        if let Some(old) = snapshot
            && old != *slot
        {
            self.badge_changed();
        }
    }

    fn badge_changed(&mut self) {
        if self.field(FieldId::Badge).trim().chars().count() >= self.auto_ring_len {
            self.pending_auto_ring = true;
        }
    }
}

fn push_folded(s: &mut String, c: char, caps: bool, symbols: bool) {
    if !symbols && c.is_alphabetic() {
        if caps {
            s.extend(c.to_uppercase());
        } else {
            s.extend(c.to_lowercase());
        }
    } else {
        s.push(c);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press_all(st: &mut KioskInputState, keys: &[KeyToken]) {
        for k in keys {
            st.press(*k);
        }
    }

    #[test]
    fn new_session_targets_badge_with_no_modifiers() {
        let st = KioskInputState::default();
        assert_eq!(st.active_field(), FieldId::Badge);
        assert!(!st.caps_on());
        assert!(!st.symbols_on());
        assert!(!st.pending_auto_ring());
        assert!(FieldId::ALL.iter().all(|f| st.field(*f).is_empty()));
    }

    #[test]
    fn letters_caps_backspace_clear() {
        let mut st = KioskInputState::default();
        st.select_field(FieldId::Name);
        st.type_text("abc");
        assert_eq!(st.field(FieldId::Name), "abc");

        press_all(&mut st, &[KeyToken::CapsToggle, KeyToken::Char('d')]);
        assert_eq!(st.field(FieldId::Name), "abcD");

        st.press(KeyToken::Backspace);
        assert_eq!(st.field(FieldId::Name), "abc");

        st.press(KeyToken::Clear);
        assert_eq!(st.field(FieldId::Name), "");
    }

    #[test]
    fn letters_are_folded_to_current_case() {
        let mut st = KioskInputState::default();
        st.select_field(FieldId::Username);
        st.type_text("JDoe");
        assert_eq!(st.field(FieldId::Username), "jdoe");
    }

    #[test]
    fn symbol_layer_ignores_caps() {
        let mut st = KioskInputState::default();
        st.select_field(FieldId::Note);
        press_all(
            &mut st,
            &[
                KeyToken::CapsToggle,
                KeyToken::SymbolsToggle,
                KeyToken::Char('x'),
                KeyToken::Char('#'),
            ],
        );
        assert_eq!(st.field(FieldId::Note), "x#");
    }

    #[test]
    fn caps_toggle_is_inert_on_symbol_layer() {
        let mut st = KioskInputState::default();
        st.press(KeyToken::SymbolsToggle);
        st.press(KeyToken::CapsToggle);
        assert!(!st.caps_on());
        st.press(KeyToken::SymbolsToggle);
        st.press(KeyToken::CapsToggle);
        assert!(st.caps_on());
    }

    #[test]
    fn modifiers_never_touch_fields() {
        let mut st = KioskInputState::default();
        st.select_field(FieldId::Name);
        st.type_text("ann");
        let before = st.field(FieldId::Name).to_string();
        press_all(&mut st, &[KeyToken::CapsToggle, KeyToken::SymbolsToggle]);
        assert_eq!(st.field(FieldId::Name), before);
    }

    #[test]
    fn space_and_backspace_on_empty() {
        let mut st = KioskInputState::default();
        st.select_field(FieldId::Note);
        st.press(KeyToken::Backspace);
        assert_eq!(st.field(FieldId::Note), "");
        st.type_text("a b");
        assert_eq!(st.field(FieldId::Note), "a b");
    }

    #[test]
    fn keystrokes_only_reach_the_active_field() {
        let mut st = KioskInputState::default();
        st.select_field(FieldId::Name);
        st.type_text("jo");
        st.select_field(FieldId::Note);
        st.type_text("hi");
        assert_eq!(st.field(FieldId::Name), "jo");
        assert_eq!(st.field(FieldId::Note), "hi");
        assert_eq!(st.field(FieldId::Badge), "");
    }

    #[test]
    fn repeated_clear_is_idempotent() {
        let mut st = KioskInputState::default();
        st.press(KeyToken::Clear);
        let snapshot = st.clone();
        st.press(KeyToken::Clear);
        st.press(KeyToken::Clear);
        assert_eq!(st, snapshot);
    }

    #[test]
    fn select_field_is_idempotent() {
        let mut st = KioskInputState::default();
        let snapshot = st.clone();
        st.select_field(FieldId::Badge);
        assert_eq!(st, snapshot);
    }

    #[test]
    fn badge_auto_trigger_threshold() {
        let mut st = KioskInputState::default();
        st.scan_completed("1234");
        assert!(!st.pending_auto_ring());
        st.scan_completed("12345");
        assert!(st.pending_auto_ring());
    }

    #[test]
    fn badge_auto_trigger_measures_trimmed_length() {
        let mut st = KioskInputState::default();
        st.scan_completed("  1234 ");
        assert!(!st.pending_auto_ring());

        let mut st = KioskInputState::default();
        st.scan_completed("  12345");
        assert!(st.pending_auto_ring());
    }

    #[test]
    fn typing_into_badge_triggers_on_fifth_character() {
        let mut st = KioskInputState::default();
        st.type_text("abcd");
        assert!(!st.pending_auto_ring());
        st.type_text("e");
        assert!(st.pending_auto_ring());
    }

    #[test]
    fn long_text_in_other_fields_does_not_trigger() {
        let mut st = KioskInputState::default();
        st.select_field(FieldId::Name);
        st.type_text("jane doe");
        assert!(!st.pending_auto_ring());
    }

    #[test]
    fn threshold_is_configurable() {
        let mut st = KioskInputState::new(3);
        st.scan_completed("abc");
        assert!(st.pending_auto_ring());
    }

    #[test]
    fn set_field_keeps_text_verbatim() {
        let mut st = KioskInputState::default();
        st.set_field(FieldId::Name, "Jane Doe");
        assert_eq!(st.field(FieldId::Name), "Jane Doe");
        assert!(!st.pending_auto_ring());
        st.set_field(FieldId::Badge, "AB123");
        assert!(st.pending_auto_ring());
    }

    #[test]
    fn clear_form_empties_every_field() {
        let mut st = KioskInputState::default();
        st.scan_completed("12");
        st.select_field(FieldId::Name);
        st.type_text("x");
        st.clear_form();
        assert!(FieldId::ALL.iter().all(|f| st.field(*f).is_empty()));
        assert_eq!(st.active_field(), FieldId::Name);
    }

    #[test]
    fn layout_follows_layers() {
        let mut st = KioskInputState::default();
        assert_eq!(st.layout()[1][0], "q");
        st.press(KeyToken::CapsToggle);
        assert_eq!(st.layout()[1][0], "Q");
        st.press(KeyToken::SymbolsToggle);
        assert_eq!(st.layout()[0][0], "!");
        assert_eq!(st.layout().last().unwrap(), &vec!["=", "-", "_", "+"]);
    }
}
