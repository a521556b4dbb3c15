//! Builder API for creating validation schemas.

use crate::messages::Messages;
use crate::validation::rules::FieldRule;
use crate::validation::schema::ValidationSchema;
use crate::validation::violations::SchemaError;

/// Builder for creating a `ValidationSchema`
pub struct SchemaBuilder {
    rules: Vec<(String, FieldRule)>,
    messages: Messages,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            messages: Messages::default(),
        }
    }

    /// Add rules for a field path
    pub fn field(mut self, path: impl Into<String>, rule: FieldRule) -> Self {
        self.rules.push((path.into(), rule));
        self
    }

    /// Add several fields at once
    pub fn fields<P, I>(mut self, rules: I) -> Self
    where
        P: Into<String>,
        I: IntoIterator<Item = (P, FieldRule)>,
    {
        self.rules
            .extend(rules.into_iter().map(|(path, rule)| (path.into(), rule)));
        self
    }

    /// Replace the default display strings
    pub fn messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self
    }

    /// Build the schema.
    /// Returns an error for empty or duplicate field paths.
    pub fn build(self) -> Result<ValidationSchema, SchemaError> {
        for (index, (path, _)) in self.rules.iter().enumerate() {
            if path.is_empty() {
                return Err(SchemaError::EmptyPath);
            }
            if self.rules[..index].iter().any(|(seen, _)| seen == path) {
                return Err(SchemaError::DuplicateField(path.clone()));
            }
        }

        Ok(ValidationSchema {
            rules: self.rules,
            messages: self.messages,
        })
    }
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Compile a rule map into a schema in one call.
pub fn create_validation_schema<P, I>(rules: I) -> Result<ValidationSchema, SchemaError>
where
    P: Into<String>,
    I: IntoIterator<Item = (P, FieldRule)>,
{
    SchemaBuilder::new().fields(rules).build()
}
