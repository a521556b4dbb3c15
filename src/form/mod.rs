//! Stateful form/error controller.
//!
//! One `FormController` exists per open form. It owns the edited record,
//! the set of touched fields, per-field errors and the general message,
//! and ties together the rule engine (local validation) and the error
//! classifier (remote failures). Schemas can be shared between controllers;
//! controller state never is.

mod builder;
mod config;
mod controller;
mod state;
mod timer;

pub use builder::FormControllerBuilder;
pub use config::{ConfigError, FormConfig};
pub use controller::{AuthErrorCallback, FormController, ValidateFormOptions};
pub use state::FormState;
