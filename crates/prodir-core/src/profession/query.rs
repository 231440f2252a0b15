//! Directory lookup query.

use regex::{Regex, RegexBuilder};

use crate::error::{ProdirError, Result};

/// Message returned when a lookup is issued without a service name.
pub const SERVICE_NAME_REQUIRED: &str = "Service name is required";

/// A case-insensitive, whole-value match on `serviceName`.
///
/// `plumber` matches a stored `Plumber` or `PLUMBER`, but not `Plumbers` or
/// `Master Plumber`. The query text is matched literally.
#[derive(Debug, Clone)]
pub struct ServiceNameQuery {
    service_name: String,
    pattern: Regex,
}

impl ServiceNameQuery {
    /// Builds a query, rejecting an absent or blank service name.
    pub fn new(service_name: Option<&str>) -> Result<Self> {
        let service_name = match service_name {
            Some(name) if !name.trim().is_empty() => name,
            _ => return Err(ProdirError::invalid_query(SERVICE_NAME_REQUIRED)),
        };

        let pattern = RegexBuilder::new(&format!("^{}$", regex::escape(service_name)))
            .case_insensitive(true)
            .build()
            .map_err(|e| ProdirError::invalid_query(format!("Invalid service name: {e}")))?;

        Ok(Self {
            service_name: service_name.to_string(),
            pattern,
        })
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// Returns true when `candidate` equals the queried name, ignoring case.
    pub fn matches(&self, candidate: &str) -> bool {
        self.pattern.is_match(candidate)
    }
}
