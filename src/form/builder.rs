//! Builder API for creating form controllers.

use crate::api_error::ApiErrorEnvelope;
use crate::core::Value;
use crate::form::config::FormConfig;
use crate::form::controller::{AuthErrorCallback, FormController};
use crate::messages::Messages;
use crate::validation::ValidationSchema;
use std::sync::Arc;
use std::time::Duration;

/// Builder for creating a `FormController`
#[derive(Default)]
pub struct FormControllerBuilder {
    initial_data: Option<Value>,
    schema: Option<Arc<ValidationSchema>>,
    config: FormConfig,
    on_auth_error: Option<AuthErrorCallback>,
}

impl FormControllerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the form from a loaded record
    pub fn initial_data(mut self, data: impl Into<Value>) -> Self {
        self.initial_data = Some(data.into());
        self
    }

    /// Validate against a schema, possibly shared with other forms
    pub fn schema(mut self, schema: impl Into<Arc<ValidationSchema>>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Replace the whole configuration
    pub fn config(mut self, config: FormConfig) -> Self {
        self.config = config;
        self
    }

    pub fn validate_on_change(mut self, enabled: bool) -> Self {
        self.config.validate_on_change = enabled;
        self
    }

    /// Clear the general error after `after`; zero disables
    pub fn clear_error_after(mut self, after: Duration) -> Self {
        self.config.clear_error_after_ms = u64::try_from(after.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn messages(mut self, messages: Messages) -> Self {
        self.config.messages = messages;
        self
    }

    /// Called whenever an absorbed API error is a 401
    pub fn on_auth_error<F>(mut self, callback: F) -> Self
    where
        F: Fn(&ApiErrorEnvelope) + Send + Sync + 'static,
    {
        self.on_auth_error = Some(Arc::new(callback));
        self
    }

    pub fn build(self) -> FormController {
        FormController::new(
            self.initial_data.unwrap_or_else(Value::empty_object),
            self.schema,
            self.config,
            self.on_auth_error,
        )
    }
}
