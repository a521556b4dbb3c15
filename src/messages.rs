//! User-visible default strings.
//!
//! Every message the crate can produce on its own lives here, so a form can
//! override any of them from configuration. Templates use `{name}`
//! placeholders for the rule bound they report.

use serde::{Deserialize, Serialize};

/// Display strings for rule failures and classified API errors.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Messages {
    pub required: String,
    /// Placeholder: `{type}`
    pub invalid_type: String,
    /// Placeholder: `{min}`
    pub min: String,
    /// Placeholder: `{max}`
    pub max: String,
    /// Placeholder: `{minLength}`
    pub min_length: String,
    /// Placeholder: `{maxLength}`
    pub max_length: String,
    pub pattern: String,
    /// Used when a custom validator rejects a value without a message.
    pub custom: String,
    /// Used when a custom validator panics.
    pub validator_failed: String,

    pub invalid_request: String,
    pub session_expired: String,
    pub forbidden: String,
    pub not_found: String,
    pub validation_failed: String,
    pub server_error: String,
    pub network: String,
    /// Last resort when neither the server nor the caller supplied text.
    pub unexpected: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            required: "Dieses Feld ist erforderlich".to_string(),
            invalid_type: "Ungültiger Wert (erwartet: {type})".to_string(),
            min: "Wert muss mindestens {min} sein".to_string(),
            max: "Wert darf höchstens {max} sein".to_string(),
            min_length: "Mindestens {minLength} Zeichen erforderlich".to_string(),
            max_length: "Höchstens {maxLength} Zeichen erlaubt".to_string(),
            pattern: "Ungültiges Format".to_string(),
            custom: "Ungültiger Wert".to_string(),
            validator_failed: "Validierungsfehler".to_string(),

            invalid_request: "Ungültige Anfrage".to_string(),
            session_expired: "Ihre Sitzung ist abgelaufen. Bitte melden Sie sich erneut an."
                .to_string(),
            forbidden: "Sie haben keine Berechtigung für diese Aktion.".to_string(),
            not_found: "Die angeforderte Ressource wurde nicht gefunden.".to_string(),
            validation_failed: "Validierungsfehler".to_string(),
            server_error: "Serverfehler. Bitte versuchen Sie es später erneut.".to_string(),
            network: "Keine Verbindung zum Server. Bitte überprüfen Sie Ihre Internetverbindung."
                .to_string(),
            unexpected: "Ein unerwarteter Fehler ist aufgetreten.".to_string(),
        }
    }
}

/// Replace a single `{name}` placeholder in `template`.
pub(crate) fn fill(template: &str, name: &str, value: impl ToString) -> String {
    template.replace(&format!("{{{name}}}"), &value.to_string())
}
