//! Browser glue shared by the unit adapters.
//!
//! [`Listener`] owns an event-listener closure and detaches it when dropped,
//! so the page context controls listener lifetime instead of leaking closures
//! with `forget()`.

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{Event, EventTarget};

/// Event listener registration that is removed on drop.
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    /// Attach `handler` for `event` on `target`.
    ///
    /// Returns `None` (after logging) when the browser refuses the
    /// registration.
    pub fn attach<F>(target: &EventTarget, event: &'static str, handler: F) -> Option<Self>
    where
        F: FnMut(Event) + 'static,
    {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        match target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
            Ok(()) => Some(Self { target: target.clone(), event, closure }),
            Err(err) => {
                warn_js(&format!("add {event} listener"), &err);
                None
            }
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        if let Err(err) = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref())
        {
            warn_js(&format!("remove {} listener", self.event), &err);
        }
    }
}

/// Log a failed DOM call. DOM writes are best-effort; nothing is surfaced
/// to the page.
pub fn warn_js(action: &str, err: &JsValue) {
    log::warn!("{action} failed: {err:?}");
}

/// Log and swallow the error side of a DOM call.
pub fn check(action: &str, result: Result<(), JsValue>) {
    if let Err(err) = result {
        warn_js(action, &err);
    }
}
