//! Per-field validation state and the submit flow for one form.
//!
//! The controller is synchronous. A remote submission is split in two:
//! [`FormController::on_submit`] decides and returns [`SubmitAction::Send`],
//! the caller performs the request, then hands the outcome to
//! [`FormController::finish_remote`]. Submits arriving in between are
//! ignored.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use super::submit::{
    STATUS_REVIEW, STATUS_SENDING, SUCCESS_LOCAL, SUCCESS_REMOTE, SubmissionResult, SubmitError, SubmitMode,
};
use super::validity::{FieldConstraints, FieldState, message_for};

/// Form elements the controller drives.
///
/// Lookups by field id may find nothing; implementations skip silently.
pub trait FormSurface {
    /// Ids of the fields under validation. The honeypot is not included.
    fn field_ids(&self) -> Vec<String>;
    /// Native validity of the whole form, including fields without an id.
    fn all_valid(&self) -> bool;
    /// Current native constraint state of a field.
    fn constraints(&self, id: &str) -> Option<FieldConstraints>;
    /// Write the text of the `{id}-error` element.
    fn set_error_text(&self, id: &str, text: &str);
    /// Set `aria-invalid` on the field.
    fn set_invalid_attribute(&self, id: &str, invalid: bool);
    /// Value of the honeypot field, if the form has one.
    fn honeypot_value(&self) -> Option<String>;
    /// Reset every field to its initial value.
    fn reset_fields(&self);
    /// Set the status line text and make it visible.
    fn set_status(&self, text: &str);
    /// Reveal the success region with `text` and focus it.
    fn show_success(&self, text: &str);
    /// Disable or re-enable the submit control.
    fn set_busy(&self, busy: bool);
}

/// What the caller must do after a submit event.
///
/// In every case the browser's default submission is prevented.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitAction {
    /// Submission stopped before any request.
    Rejected(SubmissionResult),
    /// A request is already in flight; this submit is ignored.
    Pending,
    /// Send the form data, then call [`FormController::finish_remote`].
    Send,
    /// Submission finished without a request.
    Completed(SubmissionResult),
}

pub struct FormController<S> {
    surface: S,
    mode: SubmitMode,
    states: RefCell<HashMap<String, FieldState>>,
    in_flight: Cell<bool>,
}

impl<S: FormSurface> FormController<S> {
    pub fn new(surface: S, mode: SubmitMode) -> Self {
        Self { surface, mode, states: RefCell::new(HashMap::new()), in_flight: Cell::new(false) }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn mode(&self) -> SubmitMode {
        self.mode
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.get()
    }

    pub fn field_state(&self, id: &str) -> FieldState {
        self.states.borrow().get(id).copied().unwrap_or_default()
    }

    /// Record `state` and mirror it into the error text and attribute.
    fn show(&self, id: &str, constraints: &FieldConstraints) -> FieldState {
        let state = if constraints.is_valid() { FieldState::Valid } else { FieldState::Invalid };
        self.surface.set_error_text(id, &message_for(constraints));
        if self.mode.marks_invalid_attribute() {
            self.surface.set_invalid_attribute(id, state == FieldState::Invalid);
        }
        self.states.borrow_mut().insert(id.to_owned(), state);
        state
    }

    /// Value changed: the field becomes valid or invalid.
    pub fn on_input(&self, id: &str) -> FieldState {
        match self.surface.constraints(id) {
            Some(constraints) => self.show(id, &constraints),
            None => self.field_state(id),
        }
    }

    /// Focus left the field: only an invalid value changes anything.
    pub fn on_blur(&self, id: &str) -> FieldState {
        match self.surface.constraints(id) {
            Some(constraints) if !constraints.is_valid() => self.show(id, &constraints),
            _ => self.field_state(id),
        }
    }

    /// Validate every field. Returns `true` when all are valid.
    ///
    /// Fields without an id get no inline message but still block the
    /// submit through [`FormSurface::all_valid`].
    pub fn validate_all(&self) -> bool {
        let mut all_valid = true;
        for id in self.surface.field_ids() {
            if self.on_input(&id) == FieldState::Invalid {
                all_valid = false;
            }
        }
        all_valid && self.surface.all_valid()
    }

    /// Submit event.
    pub fn on_submit(&self) -> SubmitAction {
        match self.mode {
            SubmitMode::Remote => self.submit_remote(),
            SubmitMode::Local => self.submit_local(),
        }
    }

    fn submit_remote(&self) -> SubmitAction {
        if self.in_flight.get() {
            log::debug!("form: submit ignored, request in flight");
            return SubmitAction::Pending;
        }
        if self.surface.honeypot_value().is_some_and(|value| !value.is_empty()) {
            log::info!("form: honeypot filled, submission dropped");
            return SubmitAction::Rejected(SubmissionResult::HoneypotRejected);
        }
        if !self.validate_all() {
            self.surface.set_status(STATUS_REVIEW);
            return SubmitAction::Rejected(SubmissionResult::ValidationFailed);
        }
        self.surface.set_status(STATUS_SENDING);
        self.in_flight.set(true);
        self.surface.set_busy(true);
        SubmitAction::Send
    }

    fn submit_local(&self) -> SubmitAction {
        if !self.validate_all() {
            return SubmitAction::Rejected(SubmissionResult::ValidationFailed);
        }
        self.surface.show_success(SUCCESS_LOCAL);
        log::info!("form: accepted locally");
        SubmitAction::Completed(SubmissionResult::Success)
    }

    /// Settle a request started by [`SubmitAction::Send`].
    pub fn finish_remote(&self, outcome: Result<(), SubmitError>) -> SubmissionResult {
        self.in_flight.set(false);
        self.surface.set_busy(false);
        match outcome {
            Ok(()) => {
                self.surface.reset_fields();
                for id in self.surface.field_ids() {
                    self.surface.set_error_text(&id, "");
                }
                self.states.borrow_mut().clear();
                self.surface.show_success(SUCCESS_REMOTE);
                self.surface.set_status("");
                log::info!("form: submitted");
                SubmissionResult::Success
            }
            Err(err) => {
                log::info!("form: {err}");
                self.surface.set_status(&err.status_text());
                err.result()
            }
        }
    }
}
