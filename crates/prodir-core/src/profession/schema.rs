//! Field constraints checked on every profession write.

use super::model::{Profession, field};
use crate::error::{ProdirError, Result};

/// A record the schema can check: a stored profile or a creation candidate.
pub trait SchemaFields {
    /// Values of [`ProfessionSchema::REQUIRED`], in the same order.
    fn required_values(&self) -> [&str; 5];

    fn service_price(&self) -> Option<f64>;
}

impl SchemaFields for Profession {
    fn required_values(&self) -> [&str; 5] {
        [
            self.name.as_str(),
            self.email.as_str(),
            self.mobile_no.as_str(),
            self.service_category.as_str(),
            self.service_name.as_str(),
        ]
    }

    fn service_price(&self) -> Option<f64> {
        self.service_price
    }
}

/// The profession schema.
///
/// Stores run [`ProfessionSchema::validate`] before persisting a document, so
/// a merged update that breaks a constraint is rejected the same way a bad
/// creation payload is.
pub struct ProfessionSchema;

impl ProfessionSchema {
    /// Fields that must be non-empty on every stored profile.
    pub const REQUIRED: [&'static str; 5] = [
        field::NAME,
        field::EMAIL,
        field::MOBILE_NO,
        field::SERVICE_CATEGORY,
        field::SERVICE_NAME,
    ];

    /// Collects every constraint violation of `record`.
    pub fn violations<R: SchemaFields + ?Sized>(record: &R) -> Vec<String> {
        let mut messages: Vec<String> = Self::REQUIRED
            .iter()
            .zip(record.required_values())
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(key, _)| format!("{key} is required"))
            .collect();

        match record.service_price() {
            Some(amount) if !amount.is_finite() || amount < 0.0 => messages.push(format!(
                "{} must be a non-negative number",
                field::SERVICE_PRICE
            )),
            _ => {}
        }
        messages
    }

    /// Fails with an aggregated validation error when any constraint is broken.
    pub fn validate<R: SchemaFields + ?Sized>(record: &R) -> Result<()> {
        let messages = Self::violations(record);
        if messages.is_empty() {
            Ok(())
        } else {
            Err(ProdirError::Validation { messages })
        }
    }
}
