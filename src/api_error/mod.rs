//! Normalization of transport failures.
//!
//! Raw failures from the HTTP client are decoded into a `TransportError`
//! and classified into an `ApiErrorEnvelope` with a user-presentable
//! message, the HTTP status, pass-through field errors, and network/auth
//! flags. All functions here are pure.

pub mod classify;
pub mod envelope;
pub mod transport;

pub use classify::{format_api_error, format_api_error_with, is_auth_error, is_network_error};
pub use envelope::{ApiErrorEnvelope, ErrorKind};
pub use transport::{ErrorPayload, FieldErrorEntry, TransportError};
