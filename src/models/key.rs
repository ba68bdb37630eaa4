/// One press on the on-screen keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyToken {
    Char(char),
    Space,
    Backspace,
    Clear,
    CapsToggle,
    SymbolsToggle,
}

impl KeyToken {
    /// Parse a control key name as typed at the kiosk prompt (`:back`, `:caps`, ...).
    pub fn from_control(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "space" => Some(KeyToken::Space),
            "back" | "backspace" => Some(KeyToken::Backspace),
            "clear" => Some(KeyToken::Clear),
            "caps" => Some(KeyToken::CapsToggle),
            "sym" | "symbols" => Some(KeyToken::SymbolsToggle),
            _ => None,
        }
    }

    /// Plain characters; a literal blank is the SPACE key.
    pub fn from_char(c: char) -> Self {
        if c == ' ' {
            KeyToken::Space
        } else {
            KeyToken::Char(c)
        }
    }
}
