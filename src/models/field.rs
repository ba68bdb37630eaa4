use crate::errors::{AppError, AppResult};
use serde::Serialize;
use std::fmt;

/// The four kiosk form fields the on-screen keyboard can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FieldId {
    Name,
    Username,
    Badge,
    Note,
}

impl FieldId {
    pub const ALL: [FieldId; 4] = [
        FieldId::Name,
        FieldId::Username,
        FieldId::Badge,
        FieldId::Note,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldId::Name => "name",
            FieldId::Username => "username",
            FieldId::Badge => "badge",
            FieldId::Note => "note",
        }
    }

    /// Human label shown next to the input.
    pub fn label(&self) -> &'static str {
        match self {
            FieldId::Name => "Full name",
            FieldId::Username => "Username / Login",
            FieldId::Badge => "Badge ID",
            FieldId::Note => "Optional note",
        }
    }

    /// Helper: convert input code from CLI (lowercase or uppercase)
    pub fn parse(s: &str) -> AppResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(FieldId::Name),
            "username" | "user" | "login" => Ok(FieldId::Username),
            "badge" => Ok(FieldId::Badge),
            "note" => Ok(FieldId::Note),
            other => Err(AppError::UnknownField(other.to_string())),
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            FieldId::Name => 0,
            FieldId::Username => 1,
            FieldId::Badge => 2,
            FieldId::Note => 3,
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
