//! `web-sys` adapter for the theme controller.

use std::rc::Rc;

use web_sys::{Document, Element, MediaQueryList, Storage, Window};

use super::{ResolvedTheme, ThemeController, ThemeHost, ToggleLabel};
use crate::dom::{Listener, check};

/// Attribute on `<html>` the stylesheet keys off.
pub const MARKER_ATTRIBUTE: &str = "data-theme";
/// Identifier of the toggle control.
pub const TOGGLE_ID: &str = "theme-toggle";

pub struct DomThemeHost {
    storage: Option<Storage>,
    root: Option<Element>,
    toggle: Option<Element>,
    media: Option<MediaQueryList>,
}

impl DomThemeHost {
    pub fn new(window: &Window, document: &Document, media: Option<MediaQueryList>) -> Self {
        Self {
            storage: window.local_storage().ok().flatten(),
            root: document.document_element(),
            toggle: document.get_element_by_id(TOGGLE_ID),
            media,
        }
    }
}

impl ThemeHost for DomThemeHost {
    fn read_stored(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn write_stored(&self, key: &str, value: &str) {
        if let Some(storage) = &self.storage {
            check("store theme preference", storage.set_item(key, value));
        }
    }

    fn prefers_dark(&self) -> bool {
        self.media.as_ref().map_or(false, MediaQueryList::matches)
    }

    fn set_marker(&self, marker: Option<ResolvedTheme>) {
        let Some(root) = &self.root else {
            return;
        };
        match marker {
            Some(theme) => check("set theme marker", root.set_attribute(MARKER_ATTRIBUTE, theme.as_str())),
            None => check("remove theme marker", root.remove_attribute(MARKER_ATTRIBUTE)),
        }
    }

    fn set_toggle_label(&self, label: &ToggleLabel) {
        let Some(toggle) = &self.toggle else {
            return;
        };
        check("set toggle label", toggle.set_attribute("aria-label", &label.aria_label));
        toggle.set_text_content(Some(&label.text));
    }
}

/// Apply the stored theme and wire the toggle control and OS scheme signal.
pub fn mount(
    window: &Window,
    document: &Document,
    media: Option<MediaQueryList>,
    storage_key: &str,
) -> Vec<Listener> {
    let toggle = document.get_element_by_id(TOGGLE_ID);
    let controller = Rc::new(ThemeController::new(
        DomThemeHost::new(window, document, media.clone()),
        storage_key,
    ));
    controller.init();

    let mut listeners = Vec::new();
    if let Some(toggle) = toggle {
        let ctl = Rc::clone(&controller);
        listeners.extend(Listener::attach(&toggle, "click", move |_| {
            ctl.on_toggle();
        }));
    } else {
        log::debug!("theme: no #{TOGGLE_ID}, toggle disabled");
    }
    if let Some(media) = media {
        let ctl = Rc::clone(&controller);
        listeners.extend(Listener::attach(&media, "change", move |_| {
            ctl.on_scheme_change();
        }));
    }
    listeners
}
