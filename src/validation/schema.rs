//! Compiled validation schemas.

use crate::core::{path, Value};
use crate::messages::Messages;
use crate::validation::builder::SchemaBuilder;
use crate::validation::rules::FieldRule;
use crate::validation::violations::{FieldViolation, RuleKind};
use serde::Serialize;
use std::collections::BTreeMap;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Options for a single schema evaluation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValidateOptions {
    /// Stop evaluating further fields once one field has failed.
    pub abort_early: bool,
    /// Evaluate only these paths. Paths without a rule are skipped.
    pub fields: Option<Vec<String>>,
}

impl ValidateOptions {
    /// Restrict evaluation to the given paths
    pub fn only<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            abort_early: false,
            fields: Some(fields.into_iter().map(Into::into).collect()),
        }
    }

    pub fn abort_early(mut self) -> Self {
        self.abort_early = true;
        self
    }
}

/// Outcome of a schema evaluation: at most one message per field.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: BTreeMap<String, String>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: BTreeMap::new(),
        }
    }

    fn from_violations<'a>(violations: impl Iterator<Item = &'a FieldViolation>) -> Self {
        let errors: BTreeMap<String, String> = violations
            .map(|v| (v.field.clone(), v.message.clone()))
            .collect();
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// Message for `field`, if it failed
    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }
}

/// An immutable set of per-field rules with a pure `validate` entry point.
///
/// A schema can be shared read-only between any number of open forms.
///
/// # Example
///
/// ```rust
/// use formguard::core::Value;
/// use formguard::validation::{FieldRule, RuleKind, ValidateOptions, ValidationSchema};
///
/// let schema = ValidationSchema::builder()
///     .field(
///         "email",
///         FieldRule::new()
///             .required()
///             .pattern_str(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")?
///             .message(RuleKind::Required, "E-Mail ist erforderlich"),
///     )
///     .build()?;
///
/// let result = schema.validate(&Value::object([("email", "")]), &ValidateOptions::default());
/// assert!(!result.is_valid);
/// assert_eq!(result.error("email"), Some("E-Mail ist erforderlich"));
///
/// let result = schema.validate(&Value::object([("email", "a@b.de")]), &ValidateOptions::default());
/// assert!(result.is_valid);
/// # Ok::<(), formguard::validation::SchemaError>(())
/// ```
#[derive(Clone, Debug)]
pub struct ValidationSchema {
    pub(crate) rules: Vec<(String, FieldRule)>,
    pub(crate) messages: Messages,
}

impl ValidationSchema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    /// Paths covered by this schema, in definition order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|(path, _)| path.as_str())
    }

    pub fn rule(&self, path: &str) -> Option<&FieldRule> {
        self.rules
            .iter()
            .find(|(candidate, _)| candidate == path)
            .map(|(_, rule)| rule)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.rule(path).is_some()
    }

    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    /// Evaluate `data` against the selected rules.
    ///
    /// Each field reports only its first failing rule. With `abort_early`,
    /// evaluation stops after the first failing field.
    pub fn validate(&self, data: &Value, options: &ValidateOptions) -> ValidationResult {
        let mut checks: Vec<Validation<(), NonEmptyVec<FieldViolation>>> = Vec::new();

        for (path, rule) in self.selected(options.fields.as_deref()) {
            let check = match self.evaluate_field(path, rule, data) {
                Ok(()) => Validation::success(()),
                Err(violation) => Validation::fail(violation),
            };
            let failed = matches!(check, Validation::Failure(_));
            checks.push(check);

            if failed && options.abort_early {
                break;
            }
        }

        match Validation::all_vec(checks) {
            Validation::Success(_) => ValidationResult::valid(),
            Validation::Failure(violations) => ValidationResult::from_violations(violations.iter()),
        }
    }

    /// Evaluate a single field, returning its message if it fails.
    pub fn validate_field(&self, path: &str, data: &Value) -> Option<String> {
        let rule = self.rule(path)?;
        self.evaluate_field(path, rule, data)
            .err()
            .map(|violation| violation.message)
    }

    fn selected<'a>(
        &'a self,
        fields: Option<&'a [String]>,
    ) -> Box<dyn Iterator<Item = (&'a str, &'a FieldRule)> + 'a> {
        match fields {
            Some(fields) => Box::new(
                fields
                    .iter()
                    .filter_map(|path| self.rule(path).map(|rule| (path.as_str(), rule))),
            ),
            None => Box::new(self.rules.iter().map(|(path, rule)| (path.as_str(), rule))),
        }
    }

    fn evaluate_field(
        &self,
        field: &str,
        rule: &FieldRule,
        data: &Value,
    ) -> Result<(), FieldViolation> {
        let value = match path::get(data, field) {
            Some(value) if !value.is_blank() => value,
            _ if rule.required => {
                return Err(FieldViolation {
                    field: field.to_string(),
                    rule: RuleKind::Required,
                    message: rule.required_message(&self.messages),
                })
            }
            _ => return Ok(()),
        };

        rule.check(value, data, &self.messages)
            .map_err(|(rule, message)| FieldViolation {
                field: field.to_string(),
                rule,
                message,
            })
    }
}
