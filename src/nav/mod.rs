//! Active navigation link highlighting.
//!
//! Runs once per page load. Matching links gain the `active` class and
//! `aria-current="page"`; everything else is left as the markup had it.


#[cfg(feature = "hydrate")]
pub mod dom;

/// Page assumed when the location path ends in `/`.
pub const DEFAULT_PAGE: &str = "index.html";
/// Visual class added to the matching link.
pub const ACTIVE_CLASS: &str = "active";

/// A navigation link as seen by the highlighter.
pub trait NavLink {
    fn href(&self) -> Option<String>;
    /// Add the active class and the current-page attribute.
    fn mark_current(&self);
}

/// Lower-cased file name of the current page from a location path.
pub fn current_page(path: &str) -> String {
    let last = path.rsplit('/').next().unwrap_or_default();
    if last.is_empty() {
        DEFAULT_PAGE.to_owned()
    } else {
        last.to_lowercase()
    }
}

/// Whether `href` points at `page`. `page` must already be lower-cased.
pub fn link_matches(href: &str, page: &str) -> bool {
    href.to_lowercase().ends_with(page)
}

/// Mark every link whose href ends with the current page. Returns how many
/// links were marked.
pub fn highlight<L: NavLink>(path: &str, links: &[L]) -> usize {
    let page = current_page(path);
    let mut marked = 0;
    for link in links {
        let Some(href) = link.href() else {
            continue;
        };
        if link_matches(&href, &page) {
            link.mark_current();
            marked += 1;
        }
    }
    log::debug!("nav: {marked} link(s) marked for {page}");
    marked
}
