//! Tagged result shared by all write pipelines.
//!
//! # Invariants
//! - Every `Error`/`Fatal` outcome is logged exactly once, by the helper
//!   that constructs it.
//! - Caller-visible bodies never carry fault text: a response body is the
//!   JSON payload, the validation reason, or empty.

use crate::logging::EventLog;
use crate::repo::StoreError;
use log::error;
use serde::Serialize;
use std::error::Error;

/// Result of one pipeline operation.
#[derive(Debug)]
pub enum Outcome<T> {
    /// Payload populated with server-assigned fields.
    Success(T),
    /// Caller error. No persistence was attempted.
    BadRequest(String),
    /// Store signaled failure without faulting.
    Error { code: u32, message: String },
    /// A fault was caught.
    Fatal {
        code: u32,
        message: String,
        cause: StoreError,
    },
}

impl<T> Outcome<T> {
    /// HTTP-equivalent status code.
    pub fn status(&self) -> u16 {
        match self {
            Self::Success(_) => 200,
            Self::BadRequest(_) => 400,
            Self::Error { .. } | Self::Fatal { .. } => 500,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Event code of `Error`/`Fatal` outcomes.
    pub fn code(&self) -> Option<u32> {
        match self {
            Self::Error { code, .. } | Self::Fatal { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub fn success(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Success(value) => Outcome::Success(f(value)),
            Self::BadRequest(reason) => Outcome::BadRequest(reason),
            Self::Error { code, message } => Outcome::Error { code, message },
            Self::Fatal {
                code,
                message,
                cause,
            } => Outcome::Fatal {
                code,
                message,
                cause,
            },
        }
    }
}

impl<T: Serialize> Outcome<T> {
    /// Maps the outcome onto a status code and response body.
    pub fn into_response(self) -> Response {
        match self {
            Self::Success(payload) => match serde_json::to_string(&payload) {
                Ok(body) => Response::new(200, body),
                Err(err) => {
                    error!("event=response_encode module=service status=error error={err}");
                    Response::new(500, String::new())
                }
            },
            Self::BadRequest(reason) => Response::new(400, reason),
            Self::Error { .. } | Self::Fatal { .. } => Response::new(500, String::new()),
        }
    }
}

/// Transport-neutral response shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Rejects a request, warning with `code` when the pipeline tracks it.
pub(crate) fn rejected<T>(
    log: &dyn EventLog,
    code: Option<u32>,
    log_message: &str,
    reason: &str,
) -> Outcome<T> {
    if let Some(code) = code {
        log.warn(code, log_message);
    }
    Outcome::BadRequest(reason.to_string())
}

/// Logs a silent store failure and wraps it as `Error`.
pub(crate) fn declined<T>(log: &dyn EventLog, code: u32, message: String) -> Outcome<T> {
    log.error(code, &message, None);
    Outcome::Error { code, message }
}

/// Logs a caught fault with its cause and wraps it as `Fatal`.
pub(crate) fn fault<T>(log: &dyn EventLog, code: u32, message: String, cause: StoreError) -> Outcome<T> {
    let source: &(dyn Error + 'static) = &cause;
    log.error(code, &message, Some(source));
    Outcome::Fatal {
        code,
        message,
        cause,
    }
}

#[cfg(test)]
mod tests {
    use super::{Outcome, Response};
    use crate::repo::StoreError;

    #[test]
    fn statuses_follow_variant() {
        assert_eq!(Outcome::Success(1).status(), 200);
        assert_eq!(Outcome::<u8>::BadRequest("no".into()).status(), 400);
        let error: Outcome<u8> = Outcome::Error {
            code: 5005,
            message: "declined".into(),
        };
        assert_eq!(error.status(), 500);
        assert_eq!(error.code(), Some(5005));
    }

    #[test]
    fn failure_bodies_never_leak_messages() {
        let fatal: Outcome<String> = Outcome::Fatal {
            code: 6666,
            message: "Unexpected error occurred while inserting Port 'Kiel'".into(),
            cause: StoreError::Cancelled,
        };
        assert_eq!(fatal.into_response(), Response::new(500, ""));

        let bad: Outcome<String> = Outcome::BadRequest("Value null or incorrect format".into());
        assert_eq!(
            bad.into_response(),
            Response::new(400, "Value null or incorrect format")
        );
    }

    #[test]
    fn map_keeps_failure_variants() {
        let mapped = Outcome::<u8>::BadRequest("x".into()).map(|v| v + 1);
        assert!(matches!(mapped, Outcome::BadRequest(reason) if reason == "x"));
        assert_eq!(Outcome::Success(1u8).map(|v| v + 1).success(), Some(2));
    }
}
