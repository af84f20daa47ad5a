//! Theme preference and resolved-theme values.
//!
//! A preference is what the user picked; the resolved theme is what the page
//! actually shows. The resolved theme is always derived from
//! `(preference, prefers_dark)` and never stored on its own.

#[cfg(test)]
#[path = "preference_test.rs"]
mod preference_test;

use std::fmt;
use std::str::FromStr;

/// User-chosen theme setting, persisted as its lowercase tag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ThemePreference {
    Light,
    Dark,
    #[default]
    System,
}

/// Theme that is actually applied after consulting the OS color scheme.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResolvedTheme {
    Light,
    Dark,
}

/// Returned by [`ThemePreference::from_str`] for anything but the three tags.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme preference: {0:?}")]
pub struct UnknownPreference(pub String);

impl ThemePreference {
    pub const ALL: [Self; 3] = [Self::Light, Self::Dark, Self::System];

    /// Storage tag for this preference.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }

    /// Parse a stored value, defaulting to `System` when it is absent or
    /// not one of the known tags.
    #[must_use]
    pub fn from_stored(raw: Option<&str>) -> Self {
        raw.and_then(|value| value.parse().ok()).unwrap_or_default()
    }

    /// Next preference in the toggle rotation `system -> dark -> light -> system`.
    #[must_use]
    pub fn cycle(self) -> Self {
        match self {
            Self::System => Self::Dark,
            Self::Dark => Self::Light,
            Self::Light => Self::System,
        }
    }

    /// Resolve against the OS dark-scheme signal.
    #[must_use]
    pub fn resolve(self, prefers_dark: bool) -> ResolvedTheme {
        match self {
            Self::Light => ResolvedTheme::Light,
            Self::Dark => ResolvedTheme::Dark,
            Self::System if prefers_dark => ResolvedTheme::Dark,
            Self::System => ResolvedTheme::Light,
        }
    }

    /// Document marker value, or `None` when the stylesheet's media query
    /// should decide.
    #[must_use]
    pub fn marker(self) -> Option<ResolvedTheme> {
        match self {
            Self::Light => Some(ResolvedTheme::Light),
            Self::Dark => Some(ResolvedTheme::Dark),
            Self::System => None,
        }
    }

    /// Human label with emblem, as shown on the toggle control.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Light => "☀️ Tema claro",
            Self::Dark => "🌙 Tema oscuro",
            Self::System => "🖥️ Tema del sistema",
        }
    }
}

impl FromStr for ThemePreference {
    type Err = UnknownPreference;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "system" => Ok(Self::System),
            other => Err(UnknownPreference(other.to_owned())),
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ResolvedTheme {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Resolved labels reuse the light/dark preference entries.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Light => ThemePreference::Light.label(),
            Self::Dark => ThemePreference::Dark.label(),
        }
    }
}

impl fmt::Display for ResolvedTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accessible label and visible text for the toggle control.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToggleLabel {
    pub aria_label: String,
    pub text: String,
}

impl ToggleLabel {
    /// Label for `preference` when it resolves to `resolved`.
    #[must_use]
    pub fn new(preference: ThemePreference, resolved: ResolvedTheme) -> Self {
        Self {
            aria_label: format!("{} (actual: {})", preference.label(), resolved.label()),
            text: resolved.label().to_owned(),
        }
    }
}
