//! Stateful controller for one open form.

use crate::api_error::{format_api_error_with, ApiErrorEnvelope, TransportError};
use crate::core::{path, Value};
use crate::form::builder::FormControllerBuilder;
use crate::form::config::FormConfig;
use crate::form::state::FormState;
use crate::form::timer::{AutoClearTimer, GeneralError};
use crate::validation::{ValidateOptions, ValidationResult, ValidationSchema};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// Type alias for the session-expiry hand-off.
pub type AuthErrorCallback = Arc<dyn Fn(&ApiErrorEnvelope) + Send + Sync>;

/// Options for `FormController::validate_form`.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidateFormOptions {
    /// Validate only these paths; `None` validates the whole schema.
    pub fields: Option<Vec<String>>,
    pub abort_early: bool,
    /// Mark the validated fields (or every schema field) as touched.
    pub mark_all_touched: bool,
}

impl Default for ValidateFormOptions {
    fn default() -> Self {
        Self {
            fields: None,
            abort_early: false,
            mark_all_touched: true,
        }
    }
}

impl ValidateFormOptions {
    pub fn only<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: Some(fields.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    pub fn abort_early(mut self) -> Self {
        self.abort_early = true;
        self
    }

    pub fn without_touching(mut self) -> Self {
        self.mark_all_touched = false;
        self
    }
}

/// Tracks the record being edited, touched fields, per-field errors and a
/// general message for one open form.
///
/// All operations are synchronous. The only background work is the
/// optional auto-clear of the general error, which needs a tokio runtime.
///
/// # Example
///
/// ```rust
/// use formguard::core::Value;
/// use formguard::form::FormController;
/// use formguard::validation::{presets, ValidationSchema};
///
/// let schema = ValidationSchema::builder()
///     .field("einzugsadresse.plz", presets::plz().required())
///     .build()?;
///
/// let mut form = FormController::builder()
///     .schema(schema)
///     .validate_on_change(true)
///     .build();
///
/// form.update_field("einzugsadresse.plz", "803");
/// assert_eq!(form.visible_error("einzugsadresse.plz"), Some("PLZ muss aus 5 Ziffern bestehen"));
///
/// form.update_field("einzugsadresse.plz", "80331");
/// assert!(form.validate_form(Default::default()).is_valid);
/// # Ok::<(), formguard::validation::SchemaError>(())
/// ```
pub struct FormController {
    id: Uuid,
    schema: Option<Arc<ValidationSchema>>,
    config: FormConfig,
    initial_data: Value,
    data: Value,
    touched_fields: BTreeSet<String>,
    field_errors: BTreeMap<String, String>,
    general_errors: Vec<String>,
    general_error: GeneralError,
    auto_clear: Option<AutoClearTimer>,
    on_auth_error: Option<AuthErrorCallback>,
}

impl FormController {
    pub fn builder() -> FormControllerBuilder {
        FormControllerBuilder::new()
    }

    pub(crate) fn new(
        initial_data: Value,
        schema: Option<Arc<ValidationSchema>>,
        config: FormConfig,
        on_auth_error: Option<AuthErrorCallback>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            schema,
            config,
            data: initial_data.clone(),
            initial_data,
            touched_fields: BTreeSet::new(),
            field_errors: BTreeMap::new(),
            general_errors: Vec::new(),
            general_error: GeneralError::default(),
            auto_clear: None,
            on_auth_error,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Identifier used in log events of this form.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn schema(&self) -> Option<&Arc<ValidationSchema>> {
        self.schema.as_ref()
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Current value at a dotted path
    pub fn value(&self, path: &str) -> Option<&Value> {
        path::get(&self.data, path)
    }

    pub fn touched_fields(&self) -> &BTreeSet<String> {
        &self.touched_fields
    }

    pub fn is_touched(&self, path: &str) -> bool {
        self.touched_fields.contains(path)
    }

    pub fn field_errors(&self) -> &BTreeMap<String, String> {
        &self.field_errors
    }

    pub fn field_error(&self, path: &str) -> Option<&str> {
        self.field_errors.get(path).map(String::as_str)
    }

    /// Error for `path`, but only once the field has been touched.
    pub fn visible_error(&self, path: &str) -> Option<&str> {
        if self.is_touched(path) {
            self.field_error(path)
        } else {
            None
        }
    }

    pub fn general_error(&self) -> Option<String> {
        self.general_error.get()
    }

    /// Array-style general messages, e.g. server errors without a field.
    pub fn general_errors(&self) -> &[String] {
        &self.general_errors
    }

    pub fn has_errors(&self) -> bool {
        !self.field_errors.is_empty() || !self.general_errors.is_empty() || self.general_error.is_set()
    }

    /// Whether the record differs from the one the form was loaded with.
    pub fn is_dirty(&self) -> bool {
        self.data != self.initial_data
    }

    pub fn snapshot(&self) -> FormState {
        FormState {
            data: self.data.clone(),
            touched_fields: self.touched_fields.clone(),
            field_errors: self.field_errors.clone(),
            general_error: self.general_error.get(),
            general_errors: self.general_errors.clone(),
        }
    }

    // =========================================================================
    // Field updates
    // =========================================================================

    /// Store `value` at `path`, validating if the form validates on change.
    pub fn update_field(&mut self, path: &str, value: impl Into<Value>) {
        let validate_now = self.config.validate_on_change;
        self.update_field_with(path, value, validate_now);
    }

    /// Store `value` at `path`: touch it, clear its error, and optionally
    /// re-run its rules against the updated record.
    pub fn update_field_with(&mut self, path: &str, value: impl Into<Value>, validate_now: bool) {
        self.apply_update(path, value.into());
        if validate_now {
            self.merge_validation(&[path.to_string()]);
        }
    }

    /// Apply several updates in one step.
    pub fn update_fields<I, P, V>(&mut self, updates: I)
    where
        I: IntoIterator<Item = (P, V)>,
        P: Into<String>,
        V: Into<Value>,
    {
        let validate_now = self.config.validate_on_change;
        self.update_fields_with(updates, validate_now);
    }

    /// Apply several updates, then validate exactly the updated paths.
    pub fn update_fields_with<I, P, V>(&mut self, updates: I, validate_now: bool)
    where
        I: IntoIterator<Item = (P, V)>,
        P: Into<String>,
        V: Into<Value>,
    {
        let mut paths = Vec::new();
        for (path, value) in updates {
            let path = path.into();
            self.apply_update(&path, value.into());
            paths.push(path);
        }
        if validate_now {
            self.merge_validation(&paths);
        }
    }

    fn apply_update(&mut self, path: &str, value: Value) {
        self.touched_fields.insert(path.to_string());
        self.data = path::set(&self.data, path, value);
        self.field_errors.remove(path);
    }

    /// Mark a field as touched, e.g. on blur.
    pub fn touch_field(&mut self, path: &str) {
        self.touched_fields.insert(path.to_string());
        if self.config.validate_on_change {
            self.merge_validation(&[path.to_string()]);
        }
    }

    /// Re-run the rules of `paths` and merge the outcome into `field_errors`.
    fn merge_validation(&mut self, paths: &[String]) {
        let Some(schema) = self.schema.as_ref() else {
            return;
        };
        let result = schema.validate(&self.data, &ValidateOptions::only(paths.iter().cloned()));
        for path in paths.iter().filter(|p| schema.contains(p)) {
            self.field_errors.remove(path);
        }
        self.field_errors.extend(result.errors);
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Validate the current record and make the outcome authoritative.
    ///
    /// Without `fields`, `field_errors` is replaced by the result. With
    /// `fields`, only those paths are replaced and every other error stays.
    /// Returns the result so a submit handler can stop early.
    pub fn validate_form(&mut self, options: ValidateFormOptions) -> ValidationResult {
        let Some(schema) = self.schema.clone() else {
            return ValidationResult::valid();
        };

        let result = schema.validate(
            &self.data,
            &ValidateOptions {
                abort_early: options.abort_early,
                fields: options.fields.clone(),
            },
        );

        match &options.fields {
            Some(fields) => {
                for field in fields {
                    self.field_errors.remove(field);
                }
                self.field_errors
                    .extend(result.errors.iter().map(|(k, v)| (k.clone(), v.clone())));
            }
            None => self.field_errors = result.errors.clone(),
        }

        if options.mark_all_touched {
            match options.fields {
                Some(fields) => self.touched_fields.extend(fields),
                None => self
                    .touched_fields
                    .extend(schema.fields().map(str::to_string)),
            }
        }

        debug!(
            form = %self.id,
            valid = result.is_valid,
            errors = result.errors.len(),
            "Form validated"
        );
        result
    }

    // =========================================================================
    // Errors
    // =========================================================================

    /// Set an authoritative error for one field.
    pub fn set_field_error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.field_errors.insert(path.into(), message.into());
    }

    pub fn clear_field_error(&mut self, path: &str) {
        self.field_errors.remove(path);
    }

    /// Absorb a failed request and return the message to show right away.
    ///
    /// Server field errors are merged into `field_errors`, entries without a
    /// field replace the general error list (emptying it when there are
    /// none), and the classified message becomes the general error. A 401 is handed to the auth callback.
    pub fn handle_api_error(
        &mut self,
        operation: &str,
        err: &TransportError,
        default_message: &str,
    ) -> String {
        let envelope = format_api_error_with(err, default_message, &self.config.messages);

        warn!(
            form = %self.id,
            operation,
            status = envelope.status,
            network = envelope.is_network_error,
            "{} failed: {}",
            operation,
            envelope.message
        );

        for (field, message) in envelope.field_errors() {
            self.field_errors
                .insert(field.to_string(), message.to_string());
        }

        self.general_errors = envelope.general_errors().map(str::to_string).collect();

        self.set_error(envelope.message.clone());

        if envelope.is_auth_error() {
            if let Some(callback) = &self.on_auth_error {
                debug!(form = %self.id, operation, "Handing session expiry to auth callback");
                callback(&envelope);
            }
        }

        envelope.message
    }

    /// Set the general error, superseding any previous one and its timer.
    pub fn set_error(&mut self, message: impl Into<String>) {
        let token = self.general_error.set(Some(message.into()));
        self.auto_clear = None;

        if let Some(after) = self.config.clear_error_after() {
            self.auto_clear =
                AutoClearTimer::start(self.general_error.clone(), token, after, self.id);
        }
    }

    /// Replace the array-style general error list.
    pub fn set_errors<I, S>(&mut self, messages: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.general_errors = messages.into_iter().map(Into::into).collect();
    }

    /// Clear the general error, the general list and all field errors.
    pub fn clear_errors(&mut self) {
        self.general_error.set(None);
        self.auto_clear = None;
        self.general_errors.clear();
        self.field_errors.clear();
    }

    /// Load `new_data` (or the initial record again) and forget all
    /// touched and error state.
    pub fn reset_form(&mut self, new_data: Option<Value>) {
        if let Some(data) = new_data {
            self.initial_data = data;
        }
        self.data = self.initial_data.clone();
        self.touched_fields.clear();
        self.clear_errors();
        debug!(form = %self.id, "Form reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_error::{ErrorPayload, FieldErrorEntry};
    use crate::messages::Messages;
    use crate::validation::{presets, FieldRule, RuleKind};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn move_schema() -> ValidationSchema {
        ValidationSchema::builder()
            .field(
                "kundennummer",
                FieldRule::new()
                    .required()
                    .message(RuleKind::Required, "Kundennummer ist erforderlich"),
            )
            .field(
                "email",
                presets::email()
                    .required()
                    .message(RuleKind::Required, "E-Mail ist erforderlich"),
            )
            .field("einzugsadresse.plz", presets::plz().required())
            .field(
                "termin.bis",
                FieldRule::new().validate(|bis, record| {
                    let von = path::get(record, "termin.von").and_then(Value::as_f64);
                    match (von, bis.as_f64()) {
                        (Some(von), Some(bis)) if bis < von => {
                            Err("Ende liegt vor Beginn".to_string())
                        }
                        _ => Ok(()),
                    }
                }),
            )
            .build()
            .unwrap()
    }

    fn form() -> FormController {
        FormController::builder().schema(move_schema()).build()
    }

    #[test]
    fn update_field_sets_nested_value_and_touches() {
        let mut form = form();
        form.update_field("einzugsadresse.plz", "80331");

        assert_eq!(form.value("einzugsadresse.plz"), Some(&Value::from("80331")));
        assert!(form.is_touched("einzugsadresse.plz"));
        assert!(form.field_errors().is_empty());
        assert!(form.is_dirty());
    }

    #[test]
    fn update_field_clears_existing_error() {
        let mut form = form();
        form.set_field_error("email", "vom Server abgelehnt");
        form.update_field("email", "neu@umzug.de");
        assert_eq!(form.field_error("email"), None);
    }

    #[test]
    fn update_field_validates_when_requested() {
        let mut form = form();
        form.update_field_with("einzugsadresse.plz", "8033", true);
        assert_eq!(
            form.field_error("einzugsadresse.plz"),
            Some("PLZ muss aus 5 Ziffern bestehen")
        );
        assert_eq!(form.field_error("kundennummer"), None);

        form.update_field_with("einzugsadresse.plz", "80331", true);
        assert_eq!(form.field_error("einzugsadresse.plz"), None);
    }

    #[test]
    fn validate_on_change_mode_is_the_default_for_updates() {
        let mut form = FormController::builder()
            .schema(move_schema())
            .validate_on_change(true)
            .build();
        form.update_field("email", "kaputt");
        assert!(form.field_error("email").is_some());

        let mut quiet = FormController::builder().schema(move_schema()).build();
        quiet.update_field("email", "kaputt");
        assert!(quiet.field_error("email").is_none());
    }

    #[test]
    fn cross_field_validator_sees_updated_record() {
        let mut form = form();
        form.update_field("termin.von", 10);
        form.update_field_with("termin.bis", 5, true);
        assert_eq!(form.field_error("termin.bis"), Some("Ende liegt vor Beginn"));

        form.update_field_with("termin.bis", 12, true);
        assert_eq!(form.field_error("termin.bis"), None);
    }

    #[test]
    fn update_fields_is_one_transition() {
        let mut form = form();
        form.set_field_error("kundennummer", "alt");
        form.update_fields_with(
            [
                ("kundennummer", Value::from("")),
                ("einzugsadresse.plz", Value::from("80331")),
            ],
            true,
        );

        assert!(form.is_touched("kundennummer"));
        assert!(form.is_touched("einzugsadresse.plz"));
        assert_eq!(form.field_error("kundennummer"), Some("Kundennummer ist erforderlich"));
        assert_eq!(form.field_error("einzugsadresse.plz"), None);
        assert_eq!(form.field_error("email"), None);
    }

    #[test]
    fn touch_field_revalidates_in_change_mode() {
        let mut form = FormController::builder()
            .schema(move_schema())
            .validate_on_change(true)
            .build();
        form.touch_field("kundennummer");
        assert_eq!(form.visible_error("kundennummer"), Some("Kundennummer ist erforderlich"));
        assert_eq!(form.field_error("email"), None);
    }

    #[test]
    fn touch_field_only_marks_without_change_mode() {
        let mut form = form();
        form.touch_field("kundennummer");
        assert!(form.is_touched("kundennummer"));
        assert!(form.field_errors().is_empty());
    }

    #[test]
    fn touch_field_keeps_server_error_for_unknown_path() {
        let mut form = FormController::builder()
            .schema(move_schema())
            .validate_on_change(true)
            .build();
        form.set_field_error("bemerkung", "zu lang");
        form.touch_field("bemerkung");
        assert_eq!(form.field_error("bemerkung"), Some("zu lang"));
    }

    #[test]
    fn validate_form_replaces_errors_and_touches_all() {
        let mut form = form();
        form.set_field_error("bemerkung", "vom Server");

        let result = form.validate_form(ValidateFormOptions::default());

        assert!(!result.is_valid);
        assert_eq!(form.field_errors(), &result.errors);
        assert_eq!(form.field_error("bemerkung"), None);
        for field in ["kundennummer", "email", "einzugsadresse.plz", "termin.bis"] {
            assert!(form.is_touched(field), "{field} should be touched");
        }
    }

    #[test]
    fn validate_form_with_fields_leaves_other_errors() {
        let schema = ValidationSchema::builder()
            .field("kundennummer", FieldRule::new().required())
            .field("email", FieldRule::new().required())
            .build()
            .unwrap();
        let mut form = FormController::builder().schema(schema).build();
        form.set_field_error("email", "bestehender Fehler");

        let result = form.validate_form(ValidateFormOptions::only(["kundennummer"]));

        assert!(!result.is_valid);
        assert!(result.errors.contains_key("kundennummer"));
        assert!(!result.errors.contains_key("email"));
        assert_eq!(form.field_error("email"), Some("bestehender Fehler"));
        assert!(form.is_touched("kundennummer"));
        assert!(!form.is_touched("email"));
    }

    #[test]
    fn validate_form_can_skip_touching() {
        let mut form = form();
        form.validate_form(ValidateFormOptions::default().without_touching());
        assert!(form.touched_fields().is_empty());
        assert!(!form.field_errors().is_empty());
    }

    #[test]
    fn validate_form_abort_early() {
        let mut form = form();
        let result = form.validate_form(ValidateFormOptions::default().abort_early());
        assert_eq!(result.errors.len(), 1);
        assert_eq!(form.field_errors().len(), 1);
    }

    #[test]
    fn validate_form_without_schema_is_valid() {
        let mut form = FormController::builder().build();
        assert_eq!(form.validate_form(Default::default()), ValidationResult::valid());
    }

    #[test]
    fn valid_record_passes() {
        let mut form = FormController::builder()
            .schema(move_schema())
            .initial_data(Value::from(json!({
                "kundennummer": "K-1001",
                "email": "kunde@umzug.de",
                "einzugsadresse": { "plz": "80331" },
                "termin": { "von": 1, "bis": 2 }
            })))
            .build();
        let result = form.validate_form(Default::default());
        assert!(result.is_valid);
        assert!(!form.has_errors());
        assert!(!form.is_dirty());
    }

    #[test]
    fn handle_api_error_merges_field_errors() {
        let mut form = form();
        let err = TransportError::response(
            400,
            ErrorPayload::with_message("Eingaben prüfen").errors(vec![FieldErrorEntry::new(
                "einzugsadresse.plz",
                "PLZ muss aus 5 Ziffern bestehen",
            )]),
        );

        let message = form.handle_api_error("Umzug speichern", &err, "Speichern fehlgeschlagen");

        assert_eq!(message, "Eingaben prüfen");
        assert_eq!(
            form.field_error("einzugsadresse.plz"),
            Some("PLZ muss aus 5 Ziffern bestehen")
        );
        assert_eq!(form.general_error().as_deref(), Some("Eingaben prüfen"));
    }

    #[test]
    fn handle_api_error_collects_general_entries() {
        let mut form = form();
        let err = TransportError::response(
            409,
            ErrorPayload::with_message("Konflikt").errors(vec![
                FieldErrorEntry::general("Termin bereits vergeben"),
                FieldErrorEntry::new("email", "bereits registriert"),
            ]),
        );
        form.handle_api_error("Umzug speichern", &err, "Fehler");

        assert_eq!(form.general_errors(), &["Termin bereits vergeben".to_string()]);
        assert_eq!(form.field_error("email"), Some("bereits registriert"));
    }

    #[test]
    fn handle_api_error_replaces_stale_general_entries() {
        let mut form = form();
        let conflict = TransportError::response(
            409,
            ErrorPayload::with_message("Konflikt")
                .errors(vec![FieldErrorEntry::general("Termin bereits vergeben")]),
        );
        form.handle_api_error("Umzug speichern", &conflict, "Fehler");
        assert_eq!(form.general_errors().len(), 1);

        let outage = TransportError::response(500, ErrorPayload::default());
        form.handle_api_error("Umzug speichern", &outage, "Fehler");

        assert!(form.general_errors().is_empty());
        assert_eq!(form.general_error(), Some(Messages::default().server_error));
    }

    #[test]
    fn handle_api_error_network_failure() {
        let mut form = form();
        let message = form.handle_api_error(
            "Umzüge laden",
            &TransportError::from_json(&json!({ "request": {} })),
            "Laden fehlgeschlagen",
        );
        assert_eq!(message, Messages::default().network);
        assert!(form.field_errors().is_empty());
        assert_eq!(form.general_error(), Some(message));
    }

    #[test]
    fn handle_api_error_invokes_auth_callback_on_401() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mut form = FormController::builder()
            .on_auth_error(move |envelope| {
                assert_eq!(envelope.status, 401);
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .build();

        let unauthorized = TransportError::response(
            401,
            ErrorPayload::with_message("jwt expired")
                .errors(vec![FieldErrorEntry::new("token", "abgelaufen")]),
        );
        let message = form.handle_api_error("Umzug laden", &unauthorized, "Fehler");
        assert_eq!(message, Messages::default().session_expired);
        assert!(form.field_errors().is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        form.handle_api_error(
            "Umzug laden",
            &TransportError::response(403, ErrorPayload::default()),
            "Fehler",
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn handle_api_error_uses_configured_messages() {
        let mut form = FormController::builder()
            .messages(Messages {
                server_error: "Wartungsarbeiten".to_string(),
                ..Messages::default()
            })
            .build();
        let message = form.handle_api_error(
            "Rechnung erstellen",
            &TransportError::response(503, ErrorPayload::default()),
            "Fehler",
        );
        assert_eq!(message, "Wartungsarbeiten");
    }

    #[test]
    fn set_and_clear_errors() {
        let mut form = form();
        form.set_error("Allgemeiner Fehler");
        form.set_errors(["a", "b"]);
        form.set_field_error("email", "falsch");
        assert!(form.has_errors());

        form.clear_field_error("email");
        assert_eq!(form.field_error("email"), None);

        form.set_field_error("email", "falsch");
        form.clear_errors();
        assert_eq!(form.general_error(), None);
        assert!(form.general_errors().is_empty());
        assert!(form.field_errors().is_empty());
        assert!(!form.has_errors());
    }

    #[test]
    fn set_error_supersedes_previous() {
        let mut form = form();
        form.set_error("erster");
        form.set_error("zweiter");
        assert_eq!(form.general_error().as_deref(), Some("zweiter"));
    }

    #[test]
    fn set_error_without_runtime_keeps_message() {
        let mut form = FormController::builder()
            .clear_error_after(Duration::from_millis(10))
            .build();
        form.set_error("bleibt");
        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(form.general_error().as_deref(), Some("bleibt"));
    }

    #[test]
    fn reset_form_restores_initial_data() {
        let initial = Value::object([("kundennummer", "K-1")]);
        let mut form = FormController::builder()
            .schema(move_schema())
            .initial_data(initial.clone())
            .build();
        form.update_field("kundennummer", "K-2");
        form.validate_form(Default::default());
        form.set_error("x");

        form.reset_form(None);

        assert_eq!(form.data(), &initial);
        assert!(form.touched_fields().is_empty());
        assert!(!form.has_errors());
        assert!(!form.is_dirty());
    }

    #[test]
    fn reset_form_loads_new_record() {
        let mut form = form();
        form.update_field("kundennummer", "K-1");

        let other = Value::object([("kundennummer", "K-99")]);
        form.reset_form(Some(other.clone()));

        assert_eq!(form.data(), &other);
        assert!(!form.is_dirty());
    }

    #[test]
    fn snapshot_reflects_state() {
        let mut form = form();
        form.update_field("email", "x");
        form.set_field_error("email", "falsch");
        form.set_error("Fehler");

        let state = form.snapshot();
        assert_eq!(state.data, form.data().clone());
        assert_eq!(state.visible_error("email"), Some("falsch"));
        assert_eq!(state.general_error.as_deref(), Some("Fehler"));
    }

    #[tokio::test(start_paused = true)]
    async fn general_error_auto_clears() {
        let mut form = FormController::builder()
            .clear_error_after(Duration::from_millis(100))
            .build();
        form.set_error("Speichern fehlgeschlagen");

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(form.general_error().is_some());

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(form.general_error(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn newer_error_outlives_older_timer() {
        let mut form = FormController::builder()
            .clear_error_after(Duration::from_millis(100))
            .build();
        form.set_error("erster");

        tokio::time::sleep(Duration::from_millis(60)).await;
        form.set_error("zweiter");

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(form.general_error().as_deref(), Some("zweiter"));

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(form.general_error(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn handle_api_error_schedules_auto_clear() {
        let mut form = FormController::builder()
            .clear_error_after(Duration::from_millis(100))
            .build();
        form.handle_api_error(
            "Umzug speichern",
            &TransportError::response(500, ErrorPayload::default()),
            "Fehler",
        );
        assert!(form.general_error().is_some());

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(form.general_error(), None);
    }
}
