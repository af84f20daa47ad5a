//! # sitekit
//!
//! Progressive enhancement for a static site, compiled to WebAssembly:
//!
//! | Module | Role |
//! |--------|------|
//! | [`theme`] | Persisted light/dark/system theme and its toggle control |
//! | [`nav`] | Marks the navigation link for the current page |
//! | [`form`] | Accessible contact-form validation and submission |
//! | [`config`] | `data-*` attribute configuration |
//!
//! Each unit keeps its logic behind a small host trait so it runs natively
//! under `cargo test`. The `hydrate` feature adds the `web-sys` adapters and
//! the `start` entry point that mounts everything on page load.

pub mod config;
#[cfg(feature = "hydrate")]
pub mod context;
#[cfg(feature = "hydrate")]
mod dom;
pub mod form;
pub mod nav;
pub mod theme;

/// WASM start hook.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    context::start();
}
