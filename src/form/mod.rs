//! Contact form validation and submission.
//!
//! SYSTEM CONTEXT
//! ==============
//! Fields are validated with the browser's own constraints and report errors
//! inline through `{id}-error` elements. A valid form is either POSTed to its
//! `action` URL or accepted locally, depending on [`SubmitMode`].

mod controller;
#[cfg(feature = "hydrate")]
pub mod dom;
mod submit;
mod validity;

pub use controller::{FormController, FormSurface, SubmitAction};
pub use submit::{
    RemoteReply, STATUS_FALLBACK, STATUS_NETWORK, STATUS_REVIEW, STATUS_SENDING, SUCCESS_LOCAL, SUCCESS_REMOTE,
    SubmissionResult, SubmitError, SubmitMode, parse_error_messages,
};
pub use validity::{FieldConstraints, FieldKind, FieldState, MSG_EMAIL, MSG_GENERIC, MSG_REQUIRED, Validity, message_for};
