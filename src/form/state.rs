//! Snapshot of a form's observable state.

use crate::core::Value;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Everything the UI renders for one open form.
///
/// Produced by `FormController::snapshot`; the controller stays the only
/// place state changes.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
    pub data: Value,
    pub touched_fields: BTreeSet<String>,
    pub field_errors: BTreeMap<String, String>,
    pub general_error: Option<String>,
    pub general_errors: Vec<String>,
}

impl FormState {
    /// Error for `path`, but only once the user has touched it.
    pub fn visible_error(&self, path: &str) -> Option<&str> {
        if self.touched_fields.contains(path) {
            self.field_errors.get(path).map(String::as_str)
        } else {
            None
        }
    }
}
