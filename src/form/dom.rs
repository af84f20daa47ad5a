//! `web-sys` adapter for the contact form, plus the `gloo-net` POST.

use std::rc::Rc;

use gloo_net::http::Request;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, FormData, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement};

use super::{FieldConstraints, FieldKind, FormController, FormSurface, RemoteReply, SubmitAction, SubmitError, SubmitMode, Validity};
use crate::dom::{Listener, check};

pub const FORM_ID: &str = "contact-form";
pub const STATUS_ID: &str = "form-status";
pub const HONEYPOT_ID: &str = "company";
const SUCCESS_SELECTOR: &str = "[data-success]";
const SUBMIT_SELECTOR: &str = "[type=submit]";
const FIELD_SELECTOR: &str = "input, textarea";
const HIDDEN_CLASS: &str = "hidden";

/// Input types that carry no user-entered value.
const SKIPPED_INPUT_TYPES: [&str; 4] = ["hidden", "submit", "button", "reset"];

pub struct DomFormSurface {
    document: Document,
    form: HtmlFormElement,
    status: Option<Element>,
    success: Option<HtmlElement>,
}

impl DomFormSurface {
    pub fn new(document: &Document, form: HtmlFormElement) -> Self {
        let status = document.get_element_by_id(STATUS_ID);
        let success = form
            .query_selector(SUCCESS_SELECTOR)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        Self { document: document.clone(), form, status, success }
    }

    /// Field elements that can carry an inline message, honeypot excluded.
    fn fields(&self) -> Vec<Element> {
        let Ok(nodes) = self.form.query_selector_all(FIELD_SELECTOR) else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .filter(|el| !el.id().is_empty() && el.id() != HONEYPOT_ID)
            .filter(|el| {
                el.dyn_ref::<HtmlInputElement>()
                    .map_or(true, |input| !SKIPPED_INPUT_TYPES.contains(&input.type_().as_str()))
            })
            .collect()
    }

    fn field(&self, id: &str) -> Option<Element> {
        self.document
            .get_element_by_id(id)
            .filter(|el| self.form.contains(Some(el.as_ref())))
    }
}

fn length_limit(raw: i32) -> Option<u32> {
    u32::try_from(raw).ok()
}

fn constraints_of(el: &Element) -> Option<FieldConstraints> {
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        let state = input.validity();
        return Some(FieldConstraints {
            kind: FieldKind::from_input_type(&input.type_()),
            validity: Validity {
                valid: state.valid(),
                value_missing: state.value_missing(),
                type_mismatch: state.type_mismatch(),
                too_short: state.too_short(),
                too_long: state.too_long(),
            },
            min_length: length_limit(input.min_length()),
            max_length: length_limit(input.max_length()),
        });
    }
    let area = el.dyn_ref::<HtmlTextAreaElement>()?;
    let state = area.validity();
    Some(FieldConstraints {
        kind: FieldKind::Other,
        validity: Validity {
            valid: state.valid(),
            value_missing: state.value_missing(),
            type_mismatch: state.type_mismatch(),
            too_short: state.too_short(),
            too_long: state.too_long(),
        },
        min_length: length_limit(area.min_length()),
        max_length: length_limit(area.max_length()),
    })
}

impl FormSurface for DomFormSurface {
    fn field_ids(&self) -> Vec<String> {
        self.fields().iter().map(Element::id).collect()
    }

    fn all_valid(&self) -> bool {
        self.form.check_validity()
    }

    fn constraints(&self, id: &str) -> Option<FieldConstraints> {
        constraints_of(&self.field(id)?)
    }

    fn set_error_text(&self, id: &str, text: &str) {
        if let Some(slot) = self.document.get_element_by_id(&format!("{id}-error")) {
            slot.set_text_content(Some(text));
        }
    }

    fn set_invalid_attribute(&self, id: &str, invalid: bool) {
        if let Some(field) = self.field(id) {
            check("set aria-invalid", field.set_attribute("aria-invalid", if invalid { "true" } else { "false" }));
        }
    }

    fn honeypot_value(&self) -> Option<String> {
        let el = self.field(HONEYPOT_ID)?;
        el.dyn_ref::<HtmlInputElement>().map(HtmlInputElement::value)
    }

    fn reset_fields(&self) {
        self.form.reset();
    }

    fn set_status(&self, text: &str) {
        let Some(status) = &self.status else {
            return;
        };
        status.set_text_content(Some(text));
        check("show status", status.class_list().remove_1(HIDDEN_CLASS));
    }

    fn show_success(&self, text: &str) {
        let Some(success) = &self.success else {
            return;
        };
        success.set_hidden(false);
        check("show success", success.class_list().remove_1(HIDDEN_CLASS));
        success.set_text_content(Some(text));
        if !success.has_attribute("tabindex") {
            check("make success focusable", success.set_attribute("tabindex", "-1"));
        }
        check("focus success", success.focus());
    }

    fn set_busy(&self, busy: bool) {
        if let Ok(Some(button)) = self.form.query_selector(SUBMIT_SELECTOR) {
            if busy {
                check("disable submit", button.set_attribute("disabled", ""));
            } else {
                check("enable submit", button.remove_attribute("disabled"));
            }
        }
        check("set aria-busy", self.form.set_attribute("aria-busy", if busy { "true" } else { "false" }));
    }
}

/// POST the form as multipart data, asking for a JSON reply.
async fn post_form(form: &HtmlFormElement) -> Result<(), SubmitError> {
    let data = FormData::new_with_form(form).map_err(|err| SubmitError::Network(format!("{err:?}")))?;
    let response = Request::post(&form.action())
        .header("Accept", "application/json")
        .body(data)
        .map_err(|err| SubmitError::Network(err.to_string()))?
        .send()
        .await
        .map_err(|err| SubmitError::Network(err.to_string()))?;
    let status = response.status();
    let body = if response.ok() { String::new() } else { response.text().await.unwrap_or_default() };
    RemoteReply::new(status, body).into_result()
}

/// Wire validation and submission on `#contact-form`, if the page has one.
pub fn mount(document: &Document, mode: SubmitMode) -> Vec<Listener> {
    let Some(form) = document
        .get_element_by_id(FORM_ID)
        .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
    else {
        log::debug!("form: no #{FORM_ID}, skipped");
        return Vec::new();
    };

    let surface = DomFormSurface::new(document, form.clone());
    let fields = surface.fields();
    let controller = Rc::new(FormController::new(surface, mode));
    let mut listeners = Vec::new();

    for field in &fields {
        let id = field.id();
        let ctl = Rc::clone(&controller);
        let field_id = id.clone();
        listeners.extend(Listener::attach(field, "input", move |_| {
            ctl.on_input(&field_id);
        }));
        let ctl = Rc::clone(&controller);
        listeners.extend(Listener::attach(field, "blur", move |_| {
            ctl.on_blur(&id);
        }));
    }

    let ctl = Rc::clone(&controller);
    let target = form.clone();
    listeners.extend(Listener::attach(&form, "submit", move |event| {
        event.prevent_default();
        if ctl.on_submit() != SubmitAction::Send {
            return;
        }
        let ctl = Rc::clone(&ctl);
        let form = target.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let outcome = post_form(&form).await;
            ctl.finish_remote(outcome);
        });
    }));

    log::debug!("form: mounted in {mode} mode with {} field(s)", fields.len());
    listeners
}
