//! Normalized error envelope handed to the UI.

use crate::api_error::transport::FieldErrorEntry;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Category of a classified failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorKind {
    /// Request sent, no response received
    Network,
    /// 401: session missing or expired
    Auth,
    /// 403
    Authorization,
    /// 404
    NotFound,
    /// 5xx
    Server,
    /// Any other server response
    GenericApi,
    /// No transport envelope at all
    #[default]
    Unexpected,
}

impl ErrorKind {
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => Self::Auth,
            403 => Self::Authorization,
            404 => Self::NotFound,
            s if s >= 500 => Self::Server,
            _ => Self::GenericApi,
        }
    }
}

/// A transport failure reduced to something a form can render.
///
/// `message` is never empty.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct ApiErrorEnvelope {
    pub success: bool,
    pub message: String,
    pub errors: Option<Vec<FieldErrorEntry>>,
    pub status: u16,
    pub is_network_error: bool,
    #[serde(skip)]
    pub kind: ErrorKind,
}

impl ApiErrorEnvelope {
    pub fn is_auth_error(&self) -> bool {
        self.kind == ErrorKind::Auth
    }

    /// `(field, message)` pairs for entries that name a field.
    pub fn field_errors(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors
            .iter()
            .flatten()
            .filter_map(|entry| Some((entry.field.as_deref()?, entry.message.as_str())))
    }

    /// Messages of entries that are not tied to a field.
    pub fn general_errors(&self) -> impl Iterator<Item = &str> {
        self.errors
            .iter()
            .flatten()
            .filter(|entry| entry.field.is_none() && !entry.message.is_empty())
            .map(|entry| entry.message.as_str())
    }
}
