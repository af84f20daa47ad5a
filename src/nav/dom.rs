//! `web-sys` adapter for the navigation highlighter.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

use super::{ACTIVE_CLASS, NavLink, highlight};
use crate::dom::check;

const LINK_SELECTOR: &str = "nav a[href]";

impl NavLink for Element {
    fn href(&self) -> Option<String> {
        self.get_attribute("href")
    }

    fn mark_current(&self) {
        check("add active class", self.class_list().add_1(ACTIVE_CLASS));
        check("set aria-current", self.set_attribute("aria-current", "page"));
    }
}

/// Collect nav links from the document and mark the current one.
pub fn mount(document: &Document, path: &str) -> usize {
    let Ok(nodes) = document.query_selector_all(LINK_SELECTOR) else {
        return 0;
    };
    let links: Vec<Element> = (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect();
    highlight(path, &links)
}
