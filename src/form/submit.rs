//! Submission modes, outcomes and remote error-body parsing.
//!
//! ERROR HANDLING
//! ==============
//! Transport and server failures become [`SubmitError`] values and are
//! rendered into the status line. A malformed error body is not an error of
//! its own; it just selects the generic fallback text.

#[cfg(test)]
#[path = "submit_test.rs"]
mod submit_test;

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

pub const STATUS_SENDING: &str = "Enviando…";
pub const STATUS_REVIEW: &str = "Revisa los campos marcados.";
pub const STATUS_NETWORK: &str = "Error de conexión. Comprueba tu red e inténtalo de nuevo.";
pub const STATUS_FALLBACK: &str = "No se pudo enviar el formulario. Inténtalo de nuevo más tarde.";
pub const SUCCESS_REMOTE: &str = "¡Gracias! Tu mensaje se ha enviado correctamente.";
pub const SUCCESS_LOCAL: &str = "¡Gracias! Hemos recibido tu mensaje.";

/// How a valid form is submitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitMode {
    /// POST the form data to the form's `action` URL.
    Remote,
    /// No network; show the success region straight away.
    Local,
}

impl SubmitMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Remote => "remote",
            Self::Local => "local",
        }
    }

    /// Whether field validation toggles `aria-invalid`. Local mode only
    /// touches the error text.
    #[must_use]
    pub fn marks_invalid_attribute(self) -> bool {
        matches!(self, Self::Remote)
    }

    /// Mode implied by the form markup when none is configured.
    #[must_use]
    pub fn detect(action: Option<&str>) -> Self {
        match action {
            Some(url) if !url.trim().is_empty() => Self::Remote,
            _ => Self::Local,
        }
    }
}

impl FromStr for SubmitMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "remote" => Ok(Self::Remote),
            "local" => Ok(Self::Local),
            other => Err(other.to_owned()),
        }
    }
}

impl fmt::Display for SubmitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one submit attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmissionResult {
    ValidationFailed,
    HoneypotRejected,
    NetworkError,
    ServerRejected,
    Success,
}

/// Failure of a remote submission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    /// The request never completed.
    #[error("network error: {0}")]
    Network(String),
    /// The endpoint answered with a non-2xx status.
    #[error("server rejected submission with status {status}")]
    Rejected { status: u16, messages: Vec<String> },
}

impl SubmitError {
    /// Text for the status line.
    #[must_use]
    pub fn status_text(&self) -> String {
        match self {
            Self::Network(_) => STATUS_NETWORK.to_owned(),
            Self::Rejected { messages, .. } if !messages.is_empty() => messages.join(", "),
            Self::Rejected { .. } => STATUS_FALLBACK.to_owned(),
        }
    }

    #[must_use]
    pub fn result(&self) -> SubmissionResult {
        match self {
            Self::Network(_) => SubmissionResult::NetworkError,
            Self::Rejected { .. } => SubmissionResult::ServerRejected,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    errors: Vec<ErrorItem>,
}

#[derive(Debug, Deserialize)]
struct ErrorItem {
    #[serde(default)]
    message: String,
}

/// Messages from a `{ "errors": [{ "message": ... }] }` body.
///
/// Returns an empty list when the body is not that shape.
pub fn parse_error_messages(body: &str) -> Vec<String> {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed
            .errors
            .into_iter()
            .map(|item| item.message)
            .filter(|message| !message.is_empty())
            .collect(),
        Err(err) => {
            log::debug!("form: unreadable error body: {err}");
            Vec::new()
        }
    }
}

/// Status code and body text of a completed HTTP exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteReply {
    pub status: u16,
    pub body: String,
}

impl RemoteReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Classify the reply. Any 2xx is success.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::Rejected`] for any other status, carrying the
    /// messages found in the body.
    pub fn into_result(self) -> Result<(), SubmitError> {
        if self.is_success() {
            return Ok(());
        }
        Err(SubmitError::Rejected { status: self.status, messages: parse_error_messages(&self.body) })
    }
}
