//! Theme switching between light, dark and the OS scheme.
//!
//! SYSTEM CONTEXT
//! ==============
//! The stylesheet reads a `data-theme` marker on `<html>` and otherwise falls
//! back to `prefers-color-scheme`. This module decides when that marker is
//! present and keeps the toggle control's label in sync.

mod controller;
#[cfg(feature = "hydrate")]
pub mod dom;
mod preference;

pub use controller::{ThemeController, ThemeHost};
pub use preference::{ResolvedTheme, ThemePreference, ToggleLabel, UnknownPreference};
