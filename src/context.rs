//! Page context: the single owner of everything mounted at load time.
//!
//! SYSTEM CONTEXT
//! ==============
//! `start()` builds one [`PageContext`] per page load. It holds the parsed
//! [`SiteConfig`], the dark-scheme media query handle and every listener the
//! three units attached. The context is dropped on a non-persisted
//! `pagehide`, which detaches the listeners.

use std::cell::RefCell;

use wasm_bindgen::JsValue;
use web_sys::{Document, Event, MediaQueryList, Window};

use crate::config::{ATTR_SUBMIT_MODE, ConfigError, SiteConfig};
use crate::dom::Listener;
use crate::form::dom::FORM_ID;
use crate::{form, nav, theme};

const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

thread_local! {
    static PAGE: RefCell<Option<PageContext>> = const { RefCell::new(None) };
    static PAGEHIDE: RefCell<Option<Listener>> = const { RefCell::new(None) };
}

pub struct PageContext {
    pub config: SiteConfig,
    pub media: Option<MediaQueryList>,
    listeners: Vec<Listener>,
}

impl PageContext {
    pub fn new(window: &Window, config: SiteConfig) -> Self {
        let media = window.match_media(DARK_SCHEME_QUERY).ok().flatten();
        Self { config, media, listeners: Vec::new() }
    }

    /// Run the three units against `document`.
    pub fn mount(&mut self, window: &Window, document: &Document) {
        self.listeners
            .extend(theme::dom::mount(window, document, self.media.clone(), &self.config.storage_key));

        match window.location().pathname() {
            Ok(path) => {
                nav::dom::mount(document, &path);
            }
            Err(err) => crate::dom::warn_js("read location path", &err),
        }

        let action = document.get_element_by_id(FORM_ID).and_then(|el| el.get_attribute("action"));
        let mode = self.config.submit_mode_for(action.as_deref());
        self.listeners.extend(form::dom::mount(document, mode));
        log::debug!("page: {} listener(s) attached", self.listeners.len());
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

/// Read config from the root element and the contact form.
fn read_config(document: &Document) -> (SiteConfig, Vec<ConfigError>) {
    let root = document.document_element();
    let form_el = document.get_element_by_id(FORM_ID);
    SiteConfig::from_lookup(|name| {
        let source = if name == ATTR_SUBMIT_MODE { form_el.as_ref() } else { root.as_ref() };
        source.and_then(|el| el.get_attribute(name))
    })
}

fn init_logging(level: log::LevelFilter) {
    console_error_panic_hook::set_once();
    let Some(level) = level.to_level() else {
        return;
    };
    if let Err(err) = console_log::init_with_level(level) {
        // A logger is already installed when start() runs twice.
        web_sys::console::debug_1(&JsValue::from_str(&err.to_string()));
    }
}

/// Whether a `pagehide` event leaves the page in the back/forward cache.
fn is_persisted(event: &Event) -> bool {
    js_sys::Reflect::get(event, &JsValue::from_str("persisted"))
        .map(|value| value.is_truthy())
        .unwrap_or(false)
}

/// Page-load entry point.
pub fn start() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    let (config, errors) = read_config(&document);
    init_logging(config.log_level);
    for err in &errors {
        log::warn!("config: {err}; using the default for it");
    }

    let mut page = PageContext::new(&window, config);
    page.mount(&window, &document);
    PAGE.with(|slot| *slot.borrow_mut() = Some(page));

    let pagehide = Listener::attach(&window, "pagehide", |event| {
        if is_persisted(&event) {
            return;
        }
        if let Some(page) = PAGE.with(|slot| slot.borrow_mut().take()) {
            log::debug!("page: disposing {} listener(s)", page.listener_count());
        }
    });
    PAGEHIDE.with(|slot| *slot.borrow_mut() = pagehide);
}
