//! Declarative per-field rules.

use crate::core::Value;
use crate::messages::{fill, Messages};
use crate::validation::violations::{RuleKind, SchemaError};
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::warn;

/// Type alias for custom validator functions.
///
/// Receives the field value and the full record, so a rule can compare
/// against sibling fields. `Err` carries the message to display.
pub type CustomCheck = Arc<dyn Fn(&Value, &Value) -> Result<(), String> + Send + Sync>;

/// Value category a field must belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Number,
    Boolean,
    Array,
    Object,
    Date,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
            Self::Date => "date",
        }
    }

    /// Whether `value` belongs to this category. NaN is not a number.
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::String, Value::String(_)) => true,
            (Self::Number, Value::Number(n)) => !n.is_nan(),
            (Self::Boolean, Value::Bool(_)) => true,
            (Self::Array, Value::Array(_)) => true,
            (Self::Object, Value::Object(_)) => true,
            (Self::Date, Value::Date(_)) => true,
            _ => false,
        }
    }
}

/// Rules for a single field, built fluently.
///
/// Rules run in a fixed order and the first failure wins:
/// required, type, numeric bounds, string length, pattern, custom validator.
/// An empty value on a non-required field skips every rule.
///
/// # Example
///
/// ```rust
/// use formguard::validation::{FieldRule, FieldType, RuleKind};
///
/// let rule = FieldRule::new()
///     .required()
///     .of_type(FieldType::String)
///     .max_length(40)
///     .message(RuleKind::Required, "Name ist erforderlich");
///
/// assert!(rule.is_required());
/// ```
#[derive(Clone, Default)]
pub struct FieldRule {
    pub(crate) required: bool,
    pub(crate) field_type: Option<FieldType>,
    pub(crate) min: Option<f64>,
    pub(crate) max: Option<f64>,
    pub(crate) min_length: Option<usize>,
    pub(crate) max_length: Option<usize>,
    pub(crate) pattern: Option<Regex>,
    pub(crate) validate: Option<CustomCheck>,
    pub(crate) messages: BTreeMap<RuleKind, String>,
}

impl FieldRule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the field as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Require a value category
    pub fn of_type(mut self, field_type: FieldType) -> Self {
        self.field_type = Some(field_type);
        self
    }

    /// Inclusive lower bound for numbers
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Inclusive upper bound for numbers
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Minimum length for strings, counted in characters
    pub fn min_length(mut self, n: usize) -> Self {
        self.min_length = Some(n);
        self
    }

    /// Maximum length for strings, counted in characters
    pub fn max_length(mut self, n: usize) -> Self {
        self.max_length = Some(n);
        self
    }

    /// Require the value to match a compiled regular expression
    pub fn pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Compile and attach a pattern.
    pub fn pattern_str(self, pattern: &str) -> Result<Self, SchemaError> {
        let regex = Regex::new(pattern).map_err(|source| SchemaError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(self.pattern(regex))
    }

    /// Add a custom validator that sees the value and the full record
    ///
    /// A panic inside `check` is caught and reported as a generic
    /// validation error for the field. The process panic hook still runs,
    /// so the default hook prints the panic to stderr. Under
    /// `panic = "abort"` nothing is caught.
    pub fn validate<F>(mut self, check: F) -> Self
    where
        F: Fn(&Value, &Value) -> Result<(), String> + Send + Sync + 'static,
    {
        self.validate = Some(Arc::new(check));
        self
    }

    /// Override the display message for one rule
    pub fn message(mut self, rule: RuleKind, message: impl Into<String>) -> Self {
        self.messages.insert(rule, message.into());
        self
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Run the rules against a non-empty value, stopping at the first failure.
    pub(crate) fn check(
        &self,
        value: &Value,
        record: &Value,
        defaults: &Messages,
    ) -> Result<(), (RuleKind, String)> {
        self.check_type(value, defaults)?;
        self.check_bounds(value, defaults)?;
        self.check_length(value, defaults)?;
        self.check_pattern(value, defaults)?;
        self.check_custom(value, record, defaults)
    }

    /// Message for a failed `required` rule.
    pub(crate) fn required_message(&self, defaults: &Messages) -> String {
        self.resolve(RuleKind::Required, || defaults.required.clone())
    }

    fn resolve(&self, rule: RuleKind, default: impl FnOnce() -> String) -> String {
        self.messages.get(&rule).cloned().unwrap_or_else(default)
    }

    fn check_type(&self, value: &Value, defaults: &Messages) -> Result<(), (RuleKind, String)> {
        match self.field_type {
            Some(field_type) if !field_type.matches(value) => Err((
                RuleKind::Type,
                self.resolve(RuleKind::Type, || {
                    fill(&defaults.invalid_type, "type", field_type.as_str())
                }),
            )),
            _ => Ok(()),
        }
    }

    fn check_bounds(&self, value: &Value, defaults: &Messages) -> Result<(), (RuleKind, String)> {
        let Value::Number(n) = value else {
            return Ok(());
        };
        if let Some(min) = self.min {
            if *n < min {
                return Err((
                    RuleKind::Min,
                    self.resolve(RuleKind::Min, || fill(&defaults.min, "min", min)),
                ));
            }
        }
        if let Some(max) = self.max {
            if *n > max {
                return Err((
                    RuleKind::Max,
                    self.resolve(RuleKind::Max, || fill(&defaults.max, "max", max)),
                ));
            }
        }
        Ok(())
    }

    fn check_length(&self, value: &Value, defaults: &Messages) -> Result<(), (RuleKind, String)> {
        let Value::String(s) = value else {
            return Ok(());
        };
        let len = s.chars().count();
        if let Some(min) = self.min_length {
            if len < min {
                return Err((
                    RuleKind::MinLength,
                    self.resolve(RuleKind::MinLength, || {
                        fill(&defaults.min_length, "minLength", min)
                    }),
                ));
            }
        }
        if let Some(max) = self.max_length {
            if len > max {
                return Err((
                    RuleKind::MaxLength,
                    self.resolve(RuleKind::MaxLength, || {
                        fill(&defaults.max_length, "maxLength", max)
                    }),
                ));
            }
        }
        Ok(())
    }

    fn check_pattern(&self, value: &Value, defaults: &Messages) -> Result<(), (RuleKind, String)> {
        let Some(pattern) = &self.pattern else {
            return Ok(());
        };
        let matched = match value {
            Value::String(s) => pattern.is_match(s),
            other => pattern.is_match(&other.to_text()),
        };
        if matched {
            Ok(())
        } else {
            Err((
                RuleKind::Pattern,
                self.resolve(RuleKind::Pattern, || defaults.pattern.clone()),
            ))
        }
    }

    fn check_custom(
        &self,
        value: &Value,
        record: &Value,
        defaults: &Messages,
    ) -> Result<(), (RuleKind, String)> {
        let Some(check) = &self.validate else {
            return Ok(());
        };
        match panic::catch_unwind(AssertUnwindSafe(|| check(value, record))) {
            Ok(Ok(())) => Ok(()),
            Ok(Err(message)) if !message.trim().is_empty() => Err((RuleKind::Validate, message)),
            Ok(Err(_)) => Err((
                RuleKind::Validate,
                self.resolve(RuleKind::Validate, || defaults.custom.clone()),
            )),
            Err(_) => {
                warn!("Custom validator panicked; reporting generic validation error");
                Err((RuleKind::Validate, defaults.validator_failed.clone()))
            }
        }
    }
}

impl fmt::Debug for FieldRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRule")
            .field("required", &self.required)
            .field("field_type", &self.field_type)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("min_length", &self.min_length)
            .field("max_length", &self.max_length)
            .field("pattern", &self.pattern.as_ref().map(Regex::as_str))
            .field("validate", &self.validate.is_some())
            .field("messages", &self.messages)
            .finish()
    }
}
