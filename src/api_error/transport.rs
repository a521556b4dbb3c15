//! Transport failures as a closed set of shapes.
//!
//! The HTTP layer hands over opaque failure objects. They are decoded once,
//! at the boundary, into `TransportError`; everything downstream matches on
//! the variant instead of probing for keys.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// One server-reported problem, optionally tied to a field path.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrorEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default)]
    pub message: String,
}

impl FieldErrorEntry {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    /// An entry that is not tied to any field.
    pub fn general(message: impl Into<String>) -> Self {
        Self {
            field: None,
            message: message.into(),
        }
    }
}

/// Body of an error response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Option<Vec<FieldErrorEntry>>,
}

impl ErrorPayload {
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            errors: None,
        }
    }

    pub fn errors(mut self, errors: Vec<FieldErrorEntry>) -> Self {
        self.errors = Some(errors);
        self
    }

    fn from_json(data: &serde_json::Value) -> Self {
        match serde_json::from_value::<ErrorPayload>(data.clone()) {
            Ok(payload) => payload,
            Err(e) => {
                debug!("Error payload has an unexpected shape: {}", e);
                Self {
                    message: data
                        .get("message")
                        .and_then(serde_json::Value::as_str)
                        .map(str::to_string),
                    errors: None,
                }
            }
        }
    }
}

/// A failed request, as seen from the form layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransportError {
    /// The server answered with an error status. `code` and `message` are
    /// the client's own fields next to the response, if any.
    Response {
        status: u16,
        data: ErrorPayload,
        code: Option<String>,
        message: Option<String>,
    },

    /// The request went out but no response arrived (offline, timeout).
    SentNoResponse {
        code: Option<String>,
        message: Option<String>,
    },

    /// Failed before or outside the transport, e.g. a local exception.
    Other {
        code: Option<String>,
        message: String,
    },
}

impl TransportError {
    pub fn response(status: u16, data: ErrorPayload) -> Self {
        Self::Response {
            status,
            data,
            code: None,
            message: None,
        }
    }

    pub fn no_response() -> Self {
        Self::SentNoResponse {
            code: None,
            message: None,
        }
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            code: None,
            message: message.into(),
        }
    }

    /// Decode the shape produced by the HTTP client.
    ///
    /// `{ response: { status, data } }` is a server response,
    /// `{ request }` without `response` means nothing came back, anything
    /// else is a local failure carrying at most `message` and `code`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use formguard::api_error::TransportError;
    /// use serde_json::json;
    ///
    /// let err = TransportError::from_json(&json!({ "request": {}, "code": "ECONNABORTED" }));
    /// assert!(matches!(err, TransportError::SentNoResponse { .. }));
    ///
    /// let err = TransportError::from_json(&json!({ "response": { "status": 404, "data": {} } }));
    /// assert_eq!(err.status(), Some(404));
    /// ```
    pub fn from_json(err: &serde_json::Value) -> Self {
        let text = |key: &str| {
            err.get(key)
                .and_then(serde_json::Value::as_str)
                .map(str::to_string)
        };

        if let Some(response) = err.get("response").filter(|r| !r.is_null()) {
            let status = response
                .get("status")
                .and_then(serde_json::Value::as_u64)
                .and_then(|s| u16::try_from(s).ok())
                .unwrap_or(0);
            let data = response
                .get("data")
                .map(ErrorPayload::from_json)
                .unwrap_or_default();
            return Self::Response {
                status,
                data,
                code: text("code"),
                message: text("message"),
            };
        }

        if err.get("request").is_some_and(|r| !r.is_null()) {
            return Self::SentNoResponse {
                code: text("code"),
                message: text("message"),
            };
        }

        match err {
            serde_json::Value::String(message) => Self::other(message.clone()),
            _ => Self::Other {
                code: text("code"),
                message: text("message").unwrap_or_default(),
            },
        }
    }

    /// HTTP status, if the server responded.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Response { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Response { code, .. }
            | Self::SentNoResponse { code, .. }
            | Self::Other { code, .. } => code.as_deref(),
        }
    }
}

impl From<serde_json::Value> for TransportError {
    fn from(err: serde_json::Value) -> Self {
        Self::from_json(&err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_server_response() {
        let err = TransportError::from_json(&json!({
            "message": "Request failed with status code 400",
            "response": {
                "status": 400,
                "data": {
                    "message": "Bad",
                    "errors": [{ "field": "x", "message": "y" }, { "message": "allgemein" }]
                }
            }
        }));

        assert_eq!(
            err,
            TransportError::Response {
                status: 400,
                data: ErrorPayload::with_message("Bad").errors(vec![
                    FieldErrorEntry::new("x", "y"),
                    FieldErrorEntry::general("allgemein"),
                ]),
                code: None,
                message: Some("Request failed with status code 400".to_string()),
            }
        );
    }

    #[test]
    fn response_keeps_client_code() {
        let err = TransportError::from_json(&json!({
            "code": "ECONNABORTED",
            "response": { "status": 504, "data": {} }
        }));
        assert_eq!(err.status(), Some(504));
        assert_eq!(err.code(), Some("ECONNABORTED"));
    }

    #[test]
    fn response_takes_precedence_over_request() {
        let err = TransportError::from_json(&json!({
            "request": {},
            "response": { "status": 500, "data": null }
        }));
        assert_eq!(err, TransportError::response(500, ErrorPayload::default()));
    }

    #[test]
    fn decodes_request_without_response() {
        let err = TransportError::from_json(&json!({
            "request": {},
            "response": null,
            "code": "ECONNABORTED",
            "message": "timeout of 5000ms exceeded"
        }));
        assert_eq!(err.code(), Some("ECONNABORTED"));
        assert!(matches!(err, TransportError::SentNoResponse { .. }));
    }

    #[test]
    fn decodes_local_failures() {
        let err = TransportError::from_json(&json!({ "message": "boom" }));
        assert_eq!(err, TransportError::other("boom"));

        let err = TransportError::from_json(&json!("kaputt"));
        assert_eq!(err, TransportError::other("kaputt"));
        assert_eq!(err.status(), None);
    }

    #[test]
    fn malformed_payload_keeps_message() {
        let err = TransportError::from_json(&json!({
            "response": { "status": 400, "data": { "message": "Bad", "errors": "nope" } }
        }));
        assert_eq!(err, TransportError::response(400, ErrorPayload::with_message("Bad")));
    }

    #[test]
    fn non_object_payload_is_empty() {
        let err = TransportError::from_json(&json!({
            "response": { "status": 502, "data": "<html>Bad Gateway</html>" }
        }));
        assert_eq!(err, TransportError::response(502, ErrorPayload::default()));
    }
}
