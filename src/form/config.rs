//! Form configuration.

use crate::messages::Messages;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when loading a form configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid JSON or has fields of the wrong type
    #[error("Failed to parse form configuration: {0}")]
    Parse(String),
}

/// Behavior switches of a `FormController`.
///
/// Every field has a default, so a configuration document only needs to
/// name what it changes.
///
/// # Example
///
/// ```rust
/// use formguard::form::FormConfig;
/// use std::time::Duration;
///
/// let config = FormConfig::from_json(r#"{ "validateOnChange": true, "clearErrorAfterMs": 5000 }"#)?;
/// assert!(config.validate_on_change);
/// assert_eq!(config.clear_error_after(), Some(Duration::from_secs(5)));
/// # Ok::<(), formguard::form::ConfigError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormConfig {
    /// Re-run the field's rules on every change and blur.
    pub validate_on_change: bool,
    /// Clear the general error this many milliseconds after it is set.
    /// Zero disables auto-clearing.
    pub clear_error_after_ms: u64,
    /// Display strings for classified API errors.
    pub messages: Messages,
}

impl FormConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn clear_error_after(&self) -> Option<Duration> {
        (self.clear_error_after_ms > 0).then(|| Duration::from_millis(self.clear_error_after_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = FormConfig::default();
        assert!(!config.validate_on_change);
        assert_eq!(config.clear_error_after(), None);
    }

    #[test]
    fn parses_partial_document() {
        let config =
            FormConfig::from_json(r#"{ "messages": { "network": "Offline" } }"#).unwrap();
        assert_eq!(config.messages.network, "Offline");
        assert_eq!(config.messages.not_found, Messages::default().not_found);
        assert!(!config.validate_on_change);
    }

    #[test]
    fn rejects_wrong_types() {
        let err = FormConfig::from_json(r#"{ "clearErrorAfterMs": "soon" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
