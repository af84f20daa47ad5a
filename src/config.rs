//! Page-level configuration read from `data-*` attributes.
//!
//! There is no config file. The markup may tune a few knobs:
//!
//! - `data-theme-key` (on `<html>`): storage key, default `theme-preference`
//! - `data-log-level` (on `<html>`): `error|warn|info|debug|trace`, default `warn`
//! - `data-submit-mode` (on the form): `remote` or `local`; when absent the
//!   mode follows whether the form has an `action`

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use log::LevelFilter;

use crate::form::SubmitMode;

pub const DEFAULT_STORAGE_KEY: &str = "theme-preference";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Warn;

pub const ATTR_THEME_KEY: &str = "data-theme-key";
pub const ATTR_LOG_LEVEL: &str = "data-log-level";
pub const ATTR_SUBMIT_MODE: &str = "data-submit-mode";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("data-theme-key must not be empty")]
    EmptyStorageKey,
    #[error("invalid data-submit-mode: {0:?} (expected remote or local)")]
    InvalidSubmitMode(String),
    #[error("invalid data-log-level: {0:?}")]
    InvalidLogLevel(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    pub storage_key: String,
    /// Explicit submit mode; `None` means detect from the form.
    pub submit_mode: Option<SubmitMode>,
    pub log_level: LevelFilter,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self { storage_key: DEFAULT_STORAGE_KEY.to_owned(), submit_mode: None, log_level: DEFAULT_LOG_LEVEL }
    }
}

impl SiteConfig {
    /// Build config from an attribute lookup.
    ///
    /// Each attribute is parsed on its own: an unusable value falls back to
    /// that setting's default and is reported in the returned error list.
    pub fn from_lookup<F>(lookup: F) -> (Self, Vec<ConfigError>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let mut errors = Vec::new();
        let config = Self {
            storage_key: or_default(parse_storage_key(lookup(ATTR_THEME_KEY).as_deref()), defaults.storage_key, &mut errors),
            submit_mode: or_default(
                parse_submit_mode(lookup(ATTR_SUBMIT_MODE).as_deref()),
                defaults.submit_mode,
                &mut errors,
            ),
            log_level: or_default(parse_log_level(lookup(ATTR_LOG_LEVEL).as_deref()), defaults.log_level, &mut errors),
        };
        (config, errors)
    }

    /// Submit mode to use for a form with the given `action`.
    pub fn submit_mode_for(&self, action: Option<&str>) -> SubmitMode {
        self.submit_mode.unwrap_or_else(|| SubmitMode::detect(action))
    }
}

fn or_default<T>(parsed: Result<T, ConfigError>, default: T, errors: &mut Vec<ConfigError>) -> T {
    parsed.unwrap_or_else(|err| {
        errors.push(err);
        default
    })
}

fn parse_storage_key(raw: Option<&str>) -> Result<String, ConfigError> {
    match raw.map(str::trim) {
        None => Ok(DEFAULT_STORAGE_KEY.to_owned()),
        Some("") => Err(ConfigError::EmptyStorageKey),
        Some(key) => Ok(key.to_owned()),
    }
}

fn parse_submit_mode(raw: Option<&str>) -> Result<Option<SubmitMode>, ConfigError> {
    raw.map(|value| value.parse().map_err(ConfigError::InvalidSubmitMode)).transpose()
}

fn parse_log_level(raw: Option<&str>) -> Result<LevelFilter, ConfigError> {
    match raw {
        None => Ok(DEFAULT_LOG_LEVEL),
        Some(value) => value
            .trim()
            .parse::<LevelFilter>()
            .map_err(|_| ConfigError::InvalidLogLevel(value.to_owned())),
    }
}
