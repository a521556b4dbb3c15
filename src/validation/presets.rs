//! Common field rules shared by the application's forms.

use crate::validation::rules::{FieldRule, FieldType};
use crate::validation::violations::RuleKind;
use regex::Regex;
use std::sync::OnceLock;

static EMAIL: OnceLock<Regex> = OnceLock::new();
static PLZ: OnceLock<Regex> = OnceLock::new();
static PHONE: OnceLock<Regex> = OnceLock::new();

fn cached(cell: &'static OnceLock<Regex>, pattern: &str) -> Regex {
    // Patterns are literals below, each covered by a preset test.
    cell.get_or_init(|| Regex::new(pattern).expect("preset patterns are valid"))
        .clone()
}

/// A required, non-blank text field.
pub fn required_text() -> FieldRule {
    FieldRule::new().required().of_type(FieldType::String)
}

/// An e-mail address.
pub fn email() -> FieldRule {
    FieldRule::new()
        .of_type(FieldType::String)
        .pattern(cached(&EMAIL, r"^[^\s@]+@[^\s@]+\.[^\s@]+$"))
        .message(RuleKind::Pattern, "Bitte geben Sie eine gültige E-Mail-Adresse ein")
}

/// A German postal code (five digits).
pub fn plz() -> FieldRule {
    FieldRule::new()
        .pattern(cached(&PLZ, r"^\d{5}$"))
        .message(RuleKind::Pattern, "PLZ muss aus 5 Ziffern bestehen")
}

/// A phone number: digits with optional leading `+` and common separators.
pub fn phone() -> FieldRule {
    FieldRule::new()
        .of_type(FieldType::String)
        .pattern(cached(&PHONE, r"^\+?[0-9\s\-/()]{6,20}$"))
        .message(RuleKind::Pattern, "Bitte geben Sie eine gültige Telefonnummer ein")
}
