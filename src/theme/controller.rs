//! Theme controller: persisted preference, resolution and application.
//!
//! The controller owns no DOM handles itself. Everything it touches in the
//! page goes through [`ThemeHost`], so the browser adapter and the test fake
//! share the same logic.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use std::cell::Cell;

use super::preference::{ResolvedTheme, ThemePreference, ToggleLabel};

/// Page capabilities the theme controller needs.
///
/// Every method must tolerate the underlying element being absent by doing
/// nothing.
pub trait ThemeHost {
    /// Raw persisted value for `key`, if any.
    fn read_stored(&self, key: &str) -> Option<String>;
    /// Persist `value` under `key`.
    fn write_stored(&self, key: &str, value: &str);
    /// Current OS dark color-scheme signal.
    fn prefers_dark(&self) -> bool;
    /// Set the document theme marker, or remove it when `None`.
    fn set_marker(&self, marker: Option<ResolvedTheme>);
    /// Update the toggle control's accessible label and visible text.
    fn set_toggle_label(&self, label: &ToggleLabel);
}

pub struct ThemeController<H> {
    host: H,
    storage_key: String,
    /// Last preference applied; stands in for storage when nothing can be read.
    applied: Cell<Option<ThemePreference>>,
}

impl<H: ThemeHost> ThemeController<H> {
    pub fn new(host: H, storage_key: impl Into<String>) -> Self {
        Self { host, storage_key: storage_key.into(), applied: Cell::new(None) }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Persisted preference; `System` when invalid.
    ///
    /// When nothing can be read (no stored value, or storage unavailable)
    /// the last applied preference is used, then `System`.
    pub fn get_preference(&self) -> ThemePreference {
        match self.host.read_stored(&self.storage_key) {
            Some(raw) => ThemePreference::from_stored(Some(&raw)),
            None => self.applied.get().unwrap_or_default(),
        }
    }

    pub fn set_preference(&self, preference: ThemePreference) {
        self.host.write_stored(&self.storage_key, preference.as_str());
    }

    pub fn resolve(&self, preference: ThemePreference) -> ResolvedTheme {
        preference.resolve(self.host.prefers_dark())
    }

    /// Write the document marker and refresh the toggle label.
    pub fn apply(&self, preference: ThemePreference) -> ResolvedTheme {
        self.applied.set(Some(preference));
        self.host.set_marker(preference.marker());
        let resolved = self.resolve(preference);
        self.host.set_toggle_label(&ToggleLabel::new(preference, resolved));
        resolved
    }

    /// Apply whatever is persisted. Called once at mount.
    pub fn init(&self) -> ThemePreference {
        let preference = self.get_preference();
        self.apply(preference);
        log::debug!("theme: applied stored preference {preference}");
        preference
    }

    /// Toggle control click: cycle, persist, apply.
    pub fn on_toggle(&self) -> ThemePreference {
        let next = self.get_preference().cycle();
        self.set_preference(next);
        self.apply(next);
        log::debug!("theme: toggled to {next}");
        next
    }

    /// OS color-scheme change. Only a `System` preference follows the OS.
    pub fn on_scheme_change(&self) -> bool {
        if self.get_preference() != ThemePreference::System {
            return false;
        }
        self.apply(ThemePreference::System);
        true
    }
}
