//! Formguard: validation and error normalization for record-editing forms
//!
//! Formguard is the shared core behind every form that edits a business
//! record (moves, employees, vehicles, invoices). It evaluates records
//! against declarative per-field rules and turns every kind of failure
//! into one error model the UI can render.
//!
//! # Core Concepts
//!
//! - **Values and paths**: records are dynamic `Value` trees addressed by
//!   dotted paths, updated copy-on-write
//! - **Schemas**: immutable, shareable rule sets with a pure `validate`
//! - **Error envelopes**: transport failures classified by status into a
//!   message, field errors and network/auth flags
//! - **Form controller**: per-form state (data, touched fields, field
//!   errors, general message) tying the pieces together
//!
//! # Example
//!
//! ```rust
//! use formguard::api_error::TransportError;
//! use formguard::core::Value;
//! use formguard::form::FormController;
//! use formguard::validation::{presets, FieldRule, RuleKind, ValidationSchema};
//! use serde_json::json;
//!
//! let schema = ValidationSchema::builder()
//!     .field(
//!         "kundennummer",
//!         FieldRule::new()
//!             .required()
//!             .message(RuleKind::Required, "Kundennummer ist erforderlich"),
//!     )
//!     .field("einzugsadresse.plz", presets::plz().required())
//!     .build()?;
//!
//! let mut form = FormController::builder().schema(schema).build();
//! form.update_field("kundennummer", "K-1001");
//! form.update_field("einzugsadresse.plz", "80331");
//! assert!(form.validate_form(Default::default()).is_valid);
//!
//! let err = TransportError::from_json(&json!({
//!     "response": {
//!         "status": 422,
//!         "data": { "errors": [{ "field": "einzugsadresse.plz", "message": "PLZ unbekannt" }] }
//!     }
//! }));
//! form.handle_api_error("Umzug speichern", &err, "Speichern fehlgeschlagen");
//! assert_eq!(form.field_error("einzugsadresse.plz"), Some("PLZ unbekannt"));
//! assert!(form.general_error().is_some());
//! # Ok::<(), formguard::validation::SchemaError>(())
//! ```

pub mod api_error;
pub mod core;
pub mod form;
pub mod messages;
pub mod validation;

// Re-export commonly used types
pub use crate::api_error::{format_api_error, ApiErrorEnvelope, TransportError};
pub use crate::core::Value;
pub use crate::form::{FormConfig, FormController};
pub use crate::messages::Messages;
pub use crate::validation::{create_validation_schema, FieldRule, ValidationResult, ValidationSchema};
