use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use super::*;
use crate::form::submit::{RemoteReply, STATUS_NETWORK};
use crate::form::validity::{FieldKind, MSG_EMAIL, MSG_REQUIRED, Validity};

#[derive(Clone)]
struct FakeField {
    id: &'static str,
    kind: FieldKind,
    required: bool,
    min: Option<u32>,
    max: Option<u32>,
    value: String,
    has_error_slot: bool,
}

impl FakeField {
    fn text(id: &'static str) -> Self {
        Self { id, kind: FieldKind::Other, required: true, min: None, max: None, value: String::new(), has_error_slot: true }
    }

    fn email(id: &'static str) -> Self {
        Self { kind: FieldKind::Email, ..Self::text(id) }
    }

    /// Rough stand-in for the browser's constraint checks.
    fn constraints(&self) -> FieldConstraints {
        let len = u32::try_from(self.value.chars().count()).unwrap_or(u32::MAX);
        let filled = !self.value.is_empty();
        let value_missing = self.required && !filled;
        let type_mismatch = filled && self.kind == FieldKind::Email && !self.value.contains('@');
        let too_short = filled && self.min.is_some_and(|min| len < min);
        let too_long = self.max.is_some_and(|max| len > max);
        let valid = !(value_missing || type_mismatch || too_short || too_long);
        FieldConstraints {
            kind: self.kind,
            validity: Validity { valid, value_missing, type_mismatch, too_short, too_long },
            min_length: self.min,
            max_length: self.max,
        }
    }
}

#[derive(Default)]
struct FakeForm {
    fields: RefCell<Vec<FakeField>>,
    /// Fields with no id: counted by `all_valid` only.
    anonymous: RefCell<Vec<FakeField>>,
    errors: RefCell<HashMap<String, String>>,
    invalid: RefCell<HashMap<String, bool>>,
    honeypot: RefCell<Option<String>>,
    status: RefCell<Option<String>>,
    success: RefCell<Option<String>>,
    focused_success: Cell<bool>,
    busy: Cell<bool>,
    resets: Cell<u32>,
}

impl FakeForm {
    fn with(fields: Vec<FakeField>) -> Self {
        let form = Self::default();
        *form.fields.borrow_mut() = fields;
        *form.honeypot.borrow_mut() = Some(String::new());
        form
    }

    fn set_value(&self, id: &str, value: &str) {
        for field in self.fields.borrow_mut().iter_mut() {
            if field.id == id {
                field.value = value.to_owned();
            }
        }
    }

    fn value(&self, id: &str) -> String {
        self.fields.borrow().iter().find(|f| f.id == id).map(|f| f.value.clone()).unwrap_or_default()
    }

    fn error(&self, id: &str) -> Option<String> {
        self.errors.borrow().get(id).cloned()
    }

    fn invalid(&self, id: &str) -> Option<bool> {
        self.invalid.borrow().get(id).copied()
    }

    fn status(&self) -> Option<String> {
        self.status.borrow().clone()
    }
}

impl FormSurface for FakeForm {
    fn field_ids(&self) -> Vec<String> {
        self.fields.borrow().iter().map(|f| f.id.to_owned()).collect()
    }

    fn all_valid(&self) -> bool {
        let named = self.fields.borrow().iter().all(|f| f.constraints().is_valid());
        let anonymous = self.anonymous.borrow().iter().all(|f| f.constraints().is_valid());
        named && anonymous
    }

    fn constraints(&self, id: &str) -> Option<FieldConstraints> {
        self.fields.borrow().iter().find(|f| f.id == id).map(FakeField::constraints)
    }

    fn set_error_text(&self, id: &str, text: &str) {
        let has_slot = self.fields.borrow().iter().any(|f| f.id == id && f.has_error_slot);
        if has_slot {
            self.errors.borrow_mut().insert(id.to_owned(), text.to_owned());
        }
    }

    fn set_invalid_attribute(&self, id: &str, invalid: bool) {
        self.invalid.borrow_mut().insert(id.to_owned(), invalid);
    }

    fn honeypot_value(&self) -> Option<String> {
        self.honeypot.borrow().clone()
    }

    fn reset_fields(&self) {
        for field in self.fields.borrow_mut().iter_mut() {
            field.value.clear();
        }
        self.resets.set(self.resets.get() + 1);
    }

    fn set_status(&self, text: &str) {
        *self.status.borrow_mut() = Some(text.to_owned());
    }

    fn show_success(&self, text: &str) {
        *self.success.borrow_mut() = Some(text.to_owned());
        self.focused_success.set(true);
    }

    fn set_busy(&self, busy: bool) {
        self.busy.set(busy);
    }
}

fn contact_form() -> FakeForm {
    FakeForm::with(vec![
        FakeField::text("name"),
        FakeField::email("email"),
        FakeField { min: Some(10), max: Some(500), ..FakeField::text("message") },
    ])
}

fn fill_valid(form: &FakeForm) {
    form.set_value("name", "Ada");
    form.set_value("email", "ada@example.com");
    form.set_value("message", "Hola, me interesa el curso.");
}

#[test]
fn fields_start_untouched() {
    let ctl = FormController::new(contact_form(), SubmitMode::Remote);
    assert_eq!(ctl.field_state("name"), FieldState::Untouched);
}

#[test]
fn input_moves_field_between_valid_and_invalid() {
    let ctl = FormController::new(contact_form(), SubmitMode::Remote);
    ctl.surface().set_value("email", "not-an-email");
    assert_eq!(ctl.on_input("email"), FieldState::Invalid);
    assert_eq!(ctl.surface().error("email").as_deref(), Some(MSG_EMAIL));
    assert_eq!(ctl.surface().invalid("email"), Some(true));

    ctl.surface().set_value("email", "ada@example.com");
    assert_eq!(ctl.on_input("email"), FieldState::Valid);
    assert_eq!(ctl.surface().error("email").as_deref(), Some(""));
    assert_eq!(ctl.surface().invalid("email"), Some(false));
}

#[test]
fn blur_marks_only_invalid_fields() {
    let ctl = FormController::new(contact_form(), SubmitMode::Remote);
    assert_eq!(ctl.on_blur("name"), FieldState::Invalid);
    assert_eq!(ctl.surface().error("name").as_deref(), Some(MSG_REQUIRED));

    ctl.surface().set_value("email", "ada@example.com");
    assert_eq!(ctl.on_blur("email"), FieldState::Untouched);
    assert_eq!(ctl.surface().error("email"), None);
}

#[test]
fn short_message_reports_minimum_length() {
    let ctl = FormController::new(contact_form(), SubmitMode::Remote);
    ctl.surface().set_value("message", "hola");
    ctl.on_input("message");
    assert_eq!(ctl.surface().error("message").as_deref(), Some("Debe tener al menos 10 caracteres."));
}

#[test]
fn missing_error_slot_is_tolerated() {
    let form = FakeForm::with(vec![FakeField { has_error_slot: false, ..FakeField::text("phone") }]);
    let ctl = FormController::new(form, SubmitMode::Remote);
    assert_eq!(ctl.on_input("phone"), FieldState::Invalid);
    assert_eq!(ctl.surface().error("phone"), None);
    assert_eq!(ctl.on_input("unknown"), FieldState::Untouched);
}

#[test]
fn empty_required_field_blocks_submit() {
    let ctl = FormController::new(contact_form(), SubmitMode::Remote);
    fill_valid(ctl.surface());
    ctl.surface().set_value("name", "");

    assert_eq!(ctl.on_submit(), SubmitAction::Rejected(SubmissionResult::ValidationFailed));
    assert_eq!(ctl.surface().error("name").as_deref(), Some("Este campo es obligatorio."));
    assert_eq!(ctl.surface().status().as_deref(), Some(STATUS_REVIEW));
    assert!(!ctl.is_in_flight());
}

#[test]
fn submit_marks_every_invalid_field() {
    let ctl = FormController::new(contact_form(), SubmitMode::Remote);
    ctl.on_submit();
    for id in ["name", "email", "message"] {
        assert_eq!(ctl.field_state(id), FieldState::Invalid, "{id}");
        assert_eq!(ctl.surface().invalid(id), Some(true), "{id}");
    }
}

#[test]
fn valid_remote_submit_sends_and_shows_sending_status() {
    let ctl = FormController::new(contact_form(), SubmitMode::Remote);
    fill_valid(ctl.surface());
    assert_eq!(ctl.on_submit(), SubmitAction::Send);
    assert_eq!(ctl.surface().status().as_deref(), Some(STATUS_SENDING));
    assert!(ctl.is_in_flight());
    assert!(ctl.surface().busy.get());
}

#[test]
fn successful_remote_submit_resets_form() {
    let ctl = FormController::new(contact_form(), SubmitMode::Remote);
    fill_valid(ctl.surface());
    assert_eq!(ctl.on_submit(), SubmitAction::Send);

    let result = ctl.finish_remote(RemoteReply::new(200, "{\"ok\":true}").into_result());
    assert_eq!(result, SubmissionResult::Success);
    let form = ctl.surface();
    assert_eq!(form.resets.get(), 1);
    assert_eq!(form.value("name"), "");
    assert_eq!(form.error("email").as_deref(), Some(""));
    assert_eq!(form.success.borrow().as_deref(), Some(SUCCESS_REMOTE));
    assert!(form.focused_success.get());
    assert_eq!(form.status().as_deref(), Some(""));
    assert!(!form.busy.get());
    assert!(!ctl.is_in_flight());
    assert_eq!(ctl.field_state("name"), FieldState::Untouched);
}

#[test]
fn server_rejection_shows_server_messages() {
    let ctl = FormController::new(contact_form(), SubmitMode::Remote);
    fill_valid(ctl.surface());
    ctl.on_submit();

    let reply = RemoteReply::new(422, r#"{"errors":[{"message":"Email already used"}]}"#);
    assert_eq!(ctl.finish_remote(reply.into_result()), SubmissionResult::ServerRejected);
    assert_eq!(ctl.surface().status().as_deref(), Some("Email already used"));
    assert_eq!(ctl.surface().value("name"), "Ada");
    assert!(ctl.surface().success.borrow().is_none());
}

#[test]
fn network_failure_shows_connectivity_message() {
    let ctl = FormController::new(contact_form(), SubmitMode::Remote);
    fill_valid(ctl.surface());
    ctl.on_submit();

    let result = ctl.finish_remote(Err(SubmitError::Network("Failed to fetch".to_owned())));
    assert_eq!(result, SubmissionResult::NetworkError);
    assert_eq!(ctl.surface().status().as_deref(), Some(STATUS_NETWORK));
    assert!(!ctl.is_in_flight());
}

#[test]
fn filled_honeypot_drops_submission_silently() {
    let ctl = FormController::new(contact_form(), SubmitMode::Remote);
    fill_valid(ctl.surface());
    *ctl.surface().honeypot.borrow_mut() = Some("ACME Corp".to_owned());

    assert_eq!(ctl.on_submit(), SubmitAction::Rejected(SubmissionResult::HoneypotRejected));
    assert_eq!(ctl.surface().status(), None);
    assert!(!ctl.is_in_flight());
}

#[test]
fn second_submit_while_in_flight_is_ignored() {
    let ctl = FormController::new(contact_form(), SubmitMode::Remote);
    fill_valid(ctl.surface());
    assert_eq!(ctl.on_submit(), SubmitAction::Send);
    assert_eq!(ctl.on_submit(), SubmitAction::Pending);

    ctl.finish_remote(Err(SubmitError::Network("offline".to_owned())));
    fill_valid(ctl.surface());
    assert_eq!(ctl.on_submit(), SubmitAction::Send);
}

#[test]
fn local_submit_shows_success_without_request() {
    let ctl = FormController::new(contact_form(), SubmitMode::Local);
    fill_valid(ctl.surface());

    assert_eq!(ctl.on_submit(), SubmitAction::Completed(SubmissionResult::Success));
    assert_eq!(ctl.surface().success.borrow().as_deref(), Some(SUCCESS_LOCAL));
    assert!(ctl.surface().focused_success.get());
    assert_eq!(ctl.surface().status(), None);
    assert!(!ctl.is_in_flight());
}

#[test]
fn local_mode_leaves_invalid_attribute_alone() {
    let ctl = FormController::new(contact_form(), SubmitMode::Local);
    assert_eq!(ctl.on_submit(), SubmitAction::Rejected(SubmissionResult::ValidationFailed));
    assert_eq!(ctl.surface().error("name").as_deref(), Some(MSG_REQUIRED));
    assert_eq!(ctl.surface().invalid("name"), None);
    assert_eq!(ctl.surface().status(), None);
}

#[test]
fn invalid_field_without_id_blocks_remote_submit() {
    let ctl = FormController::new(contact_form(), SubmitMode::Remote);
    fill_valid(ctl.surface());
    ctl.surface()
        .anonymous
        .borrow_mut()
        .push(FakeField { has_error_slot: false, ..FakeField::text("") });

    assert_eq!(ctl.on_submit(), SubmitAction::Rejected(SubmissionResult::ValidationFailed));
    assert_eq!(ctl.surface().status().as_deref(), Some(STATUS_REVIEW));
    assert!(!ctl.is_in_flight());
    assert_eq!(ctl.field_state("name"), FieldState::Valid);
}

#[test]
fn invalid_field_without_id_blocks_local_submit() {
    let ctl = FormController::new(contact_form(), SubmitMode::Local);
    fill_valid(ctl.surface());
    ctl.surface().anonymous.borrow_mut().push(FakeField::text(""));

    assert_eq!(ctl.on_submit(), SubmitAction::Rejected(SubmissionResult::ValidationFailed));
    assert!(ctl.surface().success.borrow().is_none());
}
