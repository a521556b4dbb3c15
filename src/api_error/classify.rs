//! Classification of transport failures.
//!
//! Precedence: a server response decides by status; a sent request without
//! response is a network error; anything else falls back to the caller's
//! default message.

use crate::api_error::envelope::{ApiErrorEnvelope, ErrorKind};
use crate::api_error::transport::TransportError;
use crate::messages::Messages;

/// Error code the HTTP client uses for timeouts.
pub const TIMEOUT_CODE: &str = "ECONNABORTED";

/// Marker in the message of a failed connection.
pub const NETWORK_ERROR_MARKER: &str = "Network Error";

/// Classify `err` using the default display strings.
///
/// # Example
///
/// ```rust
/// use formguard::api_error::{format_api_error, ErrorPayload, FieldErrorEntry, TransportError};
///
/// let err = TransportError::response(
///     400,
///     ErrorPayload::with_message("Bad").errors(vec![FieldErrorEntry::new("x", "y")]),
/// );
/// let envelope = format_api_error(&err, "fallback");
///
/// assert!(!envelope.success);
/// assert_eq!(envelope.message, "Bad");
/// assert_eq!(envelope.status, 400);
/// assert_eq!(envelope.errors, Some(vec![FieldErrorEntry::new("x", "y")]));
/// assert!(!envelope.is_network_error);
/// ```
pub fn format_api_error(err: &TransportError, default_message: &str) -> ApiErrorEnvelope {
    format_api_error_with(err, default_message, &Messages::default())
}

/// Classify `err` with custom display strings.
pub fn format_api_error_with(
    err: &TransportError,
    default_message: &str,
    messages: &Messages,
) -> ApiErrorEnvelope {
    let fallback = || non_blank(default_message).unwrap_or(&messages.unexpected).to_string();

    match err {
        TransportError::Response { status, data, .. } => {
            let status = *status;
            let server_message = data.message.as_deref().and_then(non_blank);

            let (message, errors) = match status {
                400 => (
                    server_message.unwrap_or(&messages.invalid_request).to_string(),
                    data.errors.clone(),
                ),
                401 => (messages.session_expired.clone(), None),
                403 => (messages.forbidden.clone(), None),
                404 => (
                    server_message.unwrap_or(&messages.not_found).to_string(),
                    None,
                ),
                422 => (messages.validation_failed.clone(), data.errors.clone()),
                s if s >= 500 => (messages.server_error.clone(), None),
                _ => (
                    server_message.map_or_else(fallback, str::to_string),
                    data.errors.clone(),
                ),
            };

            ApiErrorEnvelope {
                success: false,
                message,
                errors,
                status,
                is_network_error: false,
                kind: ErrorKind::from_status(status),
            }
        }
        TransportError::SentNoResponse { .. } => ApiErrorEnvelope {
            success: false,
            message: messages.network.clone(),
            errors: None,
            status: 0,
            is_network_error: true,
            kind: ErrorKind::Network,
        },
        TransportError::Other { .. } => ApiErrorEnvelope {
            success: false,
            message: fallback(),
            errors: None,
            status: 0,
            is_network_error: false,
            kind: ErrorKind::Unexpected,
        },
    }
}

/// True when no response was received, on a timeout code, or when the
/// message reports a failed connection.
pub fn is_network_error(err: &TransportError) -> bool {
    match err {
        TransportError::SentNoResponse { .. } => true,
        TransportError::Response { code, message, .. } => {
            is_timeout(code.as_deref()) || message.as_deref().is_some_and(is_network_marker)
        }
        TransportError::Other { code, message } => {
            is_timeout(code.as_deref()) || is_network_marker(message)
        }
    }
}

fn is_timeout(code: Option<&str>) -> bool {
    code == Some(TIMEOUT_CODE)
}

fn is_network_marker(message: &str) -> bool {
    message.contains(NETWORK_ERROR_MARKER)
}

/// True exactly when the server answered 401.
pub fn is_auth_error(err: &TransportError) -> bool {
    err.status() == Some(401)
}

fn non_blank(s: &str) -> Option<&str> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
