//! Move Form Walkthrough
//!
//! This example drives a form controller through the life of a move
//! ("Umzug") record.
//!
//! Key concepts:
//! - Schemas with nested paths and cross-field validators
//! - Live validation on change and authoritative validation on submit
//! - Absorbing server errors into field and general errors
//!
//! Run with: cargo run --example move_form

use formguard::api_error::TransportError;
use formguard::core::{path, Value};
use formguard::form::{FormController, ValidateFormOptions};
use formguard::validation::{presets, FieldRule, FieldType, RuleKind, ValidationSchema};
use serde_json::json;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Move Form Example ===\n");

    let schema = ValidationSchema::builder()
        .field(
            "kundennummer",
            presets::required_text().message(RuleKind::Required, "Kundennummer ist erforderlich"),
        )
        .field(
            "email",
            presets::email()
                .required()
                .message(RuleKind::Required, "E-Mail ist erforderlich"),
        )
        .field("auszugsadresse.plz", presets::plz().required())
        .field("einzugsadresse.plz", presets::plz().required())
        .field(
            "personen",
            FieldRule::new().of_type(FieldType::Number).min(1.0).max(20.0),
        )
        .field(
            "einzugsadresse.etage",
            FieldRule::new().validate(|etage, record| {
                let aufzug = path::get(record, "einzugsadresse.aufzug").and_then(Value::as_bool);
                match (etage.as_f64(), aufzug) {
                    (Some(etage), Some(false)) if etage > 4.0 => {
                        Err("Ab der 5. Etage ist ein Aufzug erforderlich".to_string())
                    }
                    _ => Ok(()),
                }
            }),
        )
        .build()?;

    let mut form = FormController::builder()
        .schema(schema)
        .initial_data(Value::from(json!({
            "kundennummer": "K-1001",
            "auszugsadresse": { "plz": "10115" },
            "einzugsadresse": { "aufzug": false }
        })))
        .validate_on_change(true)
        .on_auth_error(|_| println!("  -> session expired, redirecting to login"))
        .build();

    // Step 1: live validation while typing
    println!("Step 1: Live validation");
    form.update_field("einzugsadresse.plz", "803");
    println!(
        "  einzugsadresse.plz = 803    -> {:?}",
        form.visible_error("einzugsadresse.plz")
    );
    form.update_field("einzugsadresse.plz", "80331");
    println!(
        "  einzugsadresse.plz = 80331  -> {:?}\n",
        form.visible_error("einzugsadresse.plz")
    );

    // Step 2: cross-field rule
    println!("Step 2: Cross-field rule");
    form.update_field("einzugsadresse.etage", 6);
    println!(
        "  etage = 6 without elevator  -> {:?}\n",
        form.visible_error("einzugsadresse.etage")
    );
    form.update_fields([
        ("einzugsadresse.aufzug", Value::from(true)),
        ("einzugsadresse.etage", Value::from(6)),
    ]);

    // Step 3: submit
    println!("Step 3: Submit");
    let result = form.validate_form(ValidateFormOptions::default());
    for (field, message) in &result.errors {
        println!("  {field}: {message}");
    }
    form.update_fields([
        ("email", Value::from("kunde@umzug.de")),
        ("personen", Value::from(2)),
    ]);
    let result = form.validate_form(ValidateFormOptions::default());
    println!("  valid after corrections: {}\n", result.is_valid);

    // Step 4: the server disagrees
    println!("Step 4: Server errors");
    let err = TransportError::from_json(&json!({
        "response": {
            "status": 400,
            "data": {
                "message": "Bitte Eingaben prüfen",
                "errors": [{ "field": "auszugsadresse.plz", "message": "PLZ liegt außerhalb des Liefergebiets" }]
            }
        }
    }));
    let toast = form.handle_api_error("Umzug speichern", &err, "Speichern fehlgeschlagen");
    println!("  toast: {toast}");
    println!(
        "  auszugsadresse.plz -> {:?}",
        form.field_error("auszugsadresse.plz")
    );

    let expired = TransportError::from_json(&json!({ "response": { "status": 401, "data": {} } }));
    let toast = form.handle_api_error("Umzug speichern", &expired, "Speichern fehlgeschlagen");
    println!("  toast: {toast}\n");

    // Step 5: load another record
    println!("Step 5: Reset");
    form.reset_form(Some(Value::from(json!({ "kundennummer": "K-2002" }))));
    println!("  has errors: {}, dirty: {}", form.has_errors(), form.is_dirty());

    println!("\n=== Example Complete ===");
    Ok(())
}
