//! Field constraint snapshots and the inline error message table.
//!
//! Validity is read from the browser's native constraint validation and
//! copied into [`FieldConstraints`]; nothing here re-implements the checks.

#[cfg(test)]
#[path = "validity_test.rs"]
mod validity_test;

pub const MSG_REQUIRED: &str = "Este campo es obligatorio.";
pub const MSG_EMAIL: &str = "Introduce un email válido (ej. nombre@dominio.com).";
pub const MSG_GENERIC: &str = "Revisa este campo.";

/// Input kind, as far as message selection cares.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FieldKind {
    Email,
    #[default]
    Other,
}

impl FieldKind {
    /// Map an `<input type=...>` value.
    pub fn from_input_type(input_type: &str) -> Self {
        if input_type.eq_ignore_ascii_case("email") { Self::Email } else { Self::Other }
    }
}

/// Copy of the native `ValidityState` flags this crate consults.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Validity {
    pub valid: bool,
    pub value_missing: bool,
    pub type_mismatch: bool,
    pub too_short: bool,
    pub too_long: bool,
}

impl Validity {
    pub const VALID: Self = Self {
        valid: true,
        value_missing: false,
        type_mismatch: false,
        too_short: false,
        too_long: false,
    };

    /// Invalid for some reason other than the flags above (pattern, range, ...).
    pub const OTHER_INVALID: Self = Self { valid: false, ..Self::VALID };
}

impl Default for Validity {
    fn default() -> Self {
        Self::VALID
    }
}

/// Everything needed to pick a message for one field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FieldConstraints {
    pub kind: FieldKind,
    pub validity: Validity,
    pub min_length: Option<u32>,
    pub max_length: Option<u32>,
}

impl FieldConstraints {
    pub fn is_valid(&self) -> bool {
        self.validity.valid
    }
}

/// Per-field validation state for the page session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FieldState {
    #[default]
    Untouched,
    Valid,
    Invalid,
}

/// Inline error message for a field; empty when the field is valid.
///
/// The first matching rule wins: missing value, email type mismatch, too
/// short, too long, then a generic fallback.
pub fn message_for(field: &FieldConstraints) -> String {
    let v = field.validity;
    if v.valid {
        return String::new();
    }
    if v.value_missing {
        return MSG_REQUIRED.to_owned();
    }
    if v.type_mismatch && field.kind == FieldKind::Email {
        return MSG_EMAIL.to_owned();
    }
    if v.too_short {
        return format!("Debe tener al menos {} caracteres.", field.min_length.unwrap_or_default());
    }
    if v.too_long {
        return format!("Debe tener como máximo {} caracteres.", field.max_length.unwrap_or_default());
    }
    MSG_GENERIC.to_owned()
}
