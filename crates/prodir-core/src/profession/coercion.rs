//! Field coercion rules shared by the create and update paths.
//!
//! Payloads arrive as an untyped JSON object. Every field is pulled out by an
//! explicit key lookup so that "not sent" and "sent as null" stay distinct,
//! then cast to the field's type the way a document store would cast it.

use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;

use super::patch::Patch;

/// An untrusted, sparse field set as received from the caller.
pub type RawFields = Map<String, Value>;

/// The `servicePrice` value of a payload after numeric coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum PriceInput {
    /// The key is not in the payload.
    Absent,
    /// `null`, or a string that is empty or whitespace-only.
    Blank,
    /// A finite number.
    Amount(f64),
    /// Present and non-blank, but not a finite number.
    Unparseable(String),
}

/// Extracts a string field, casting numbers and booleans to their text form.
///
/// Objects and arrays cannot be cast; a message is pushed onto `errors` and
/// the field is reported as absent.
pub fn text_field(raw: &RawFields, key: &str, errors: &mut Vec<String>) -> Patch<String> {
    match raw.get(key) {
        None => Patch::Absent,
        Some(Value::Null) => Patch::Null,
        Some(Value::String(text)) => Patch::Value(text.clone()),
        Some(Value::Number(number)) => Patch::Value(number.to_string()),
        Some(Value::Bool(flag)) => Patch::Value(flag.to_string()),
        Some(Value::Array(_)) | Some(Value::Object(_)) => {
            errors.push(format!("{key} must be a string"));
            Patch::Absent
        }
    }
}

/// Extracts a boolean field.
///
/// Accepts JSON booleans, the numbers 0 and 1, and the strings
/// `true`/`false`/`yes`/`no`/`1`/`0` in any case.
pub fn flag_field(raw: &RawFields, key: &str, errors: &mut Vec<String>) -> Patch<bool> {
    let parsed = match raw.get(key) {
        None => return Patch::Absent,
        Some(Value::Null) => return Patch::Null,
        Some(Value::Bool(flag)) => Some(*flag),
        Some(Value::Number(number)) => match number.as_f64() {
            Some(n) if n == 1.0 => Some(true),
            Some(n) if n == 0.0 => Some(false),
            _ => None,
        },
        Some(Value::String(text)) => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        },
        Some(_) => None,
    };

    match parsed {
        Some(flag) => Patch::Value(flag),
        None => {
            errors.push(format!("{key} must be a boolean"));
            Patch::Absent
        }
    }
}

/// Extracts and coerces a price field.
///
/// Never fails: what to do with a blank or unparseable value is the caller's
/// policy, and the create and update paths deliberately differ.
pub fn price_field(raw: &RawFields, key: &str) -> PriceInput {
    match raw.get(key) {
        None => PriceInput::Absent,
        Some(Value::Null) => PriceInput::Blank,
        Some(Value::Number(number)) => match number.as_f64() {
            Some(amount) if amount.is_finite() => PriceInput::Amount(amount),
            _ => PriceInput::Unparseable(number.to_string()),
        },
        Some(Value::String(text)) => {
            if text.trim().is_empty() {
                PriceInput::Blank
            } else {
                match parse_price(text) {
                    Some(amount) => PriceInput::Amount(amount),
                    None => PriceInput::Unparseable(text.clone()),
                }
            }
        }
        Some(other) => PriceInput::Unparseable(other.to_string()),
    }
}

/// Leading decimal number: optional sign, digits with an optional fraction,
/// optional exponent.
static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?")
        .expect("leading number regex is valid")
});

/// Parses the longest decimal number at the start of `text`.
///
/// Leading whitespace is skipped and trailing text is ignored, so `"500/hr"`
/// is 500. Returns `None` when no number starts the text or the result is
/// not finite.
pub fn parse_price(text: &str) -> Option<f64> {
    LEADING_NUMBER
        .find(text.trim_start())
        .and_then(|number| number.as_str().parse::<f64>().ok())
        .filter(|amount| amount.is_finite())
}
