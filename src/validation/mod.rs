//! Declarative rule engine for form records.
//!
//! A `ValidationSchema` maps dotted field paths to `FieldRule`s and exposes
//! a pure `validate` function. Rules inside a field short-circuit: the
//! first failing rule produces the field's only message. Across fields,
//! outcomes are accumulated with Stillwater's `Validation`, so one pass
//! reports every failing field unless `abort_early` is set.
//!
//! # Example
//!
//! ```rust
//! use formguard::core::Value;
//! use formguard::validation::{presets, FieldRule, ValidationSchema, ValidateOptions};
//! use serde_json::json;
//!
//! let schema = ValidationSchema::builder()
//!     .field("kundennummer", FieldRule::new().required())
//!     .field("einzugsadresse.plz", presets::plz().required())
//!     .build()?;
//!
//! let record = Value::from(json!({
//!     "kundennummer": "K-1001",
//!     "einzugsadresse": { "plz": "803" }
//! }));
//!
//! let result = schema.validate(&record, &ValidateOptions::default());
//! assert_eq!(result.error("einzugsadresse.plz"), Some("PLZ muss aus 5 Ziffern bestehen"));
//! # Ok::<(), formguard::validation::SchemaError>(())
//! ```

pub mod builder;
pub mod presets;
pub mod rules;
pub mod schema;
pub mod violations;

// Re-export commonly used types
pub use builder::{create_validation_schema, SchemaBuilder};
pub use rules::{CustomCheck, FieldRule, FieldType};
pub use schema::{ValidateOptions, ValidationResult, ValidationSchema};
pub use violations::{FieldViolation, RuleKind, SchemaError};
