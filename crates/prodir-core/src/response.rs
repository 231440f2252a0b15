//! Response envelope for the HTTP boundary.
//!
//! Transport code serializes an [`ApiResponse`] as the body and uses
//! [`ApiResponse::status`] as the status code.

use serde::{Deserialize, Serialize};

use crate::error::ProdirError;

/// `{ success, data?, message?, error?, details? }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(skip)]
    pub status: u16,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl<T> ApiResponse<T> {
    /// 200 with data
    pub fn ok(data: T) -> Self {
        Self::with_status(200, data)
    }

    /// 201 with data
    pub fn created(data: T) -> Self {
        Self::with_status(201, data)
    }

    fn with_status(status: u16, data: T) -> Self {
        Self {
            status,
            success: true,
            data: Some(data),
            message: None,
            error: None,
            details: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Builds a failure envelope for `err`.
    ///
    /// Caller-facing errors carry their own message. Persistence-class errors
    /// are reported with `fallback` as the message and the underlying failure
    /// in `details`.
    pub fn from_error(err: &ProdirError, fallback: &str) -> Self {
        let (error, details) = if err.is_persistence() {
            (fallback.to_string(), Some(err.detail()))
        } else {
            (err.to_string(), None)
        };

        Self {
            status: err.status_code(),
            success: false,
            data: None,
            message: None,
            error: Some(error),
            details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope() {
        let response = ApiResponse::created(json!({ "id": "p1" }));
        assert_eq!(response.status, 201);
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({ "success": true, "data": { "id": "p1" } })
        );
    }

    #[test]
    fn test_validation_error_envelope() {
        let err = ProdirError::validation(["name is required", "email is required"]);
        let response = ApiResponse::<()>::from_error(&err, "unused");
        assert_eq!(response.status, 400);
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({ "success": false, "error": "name is required, email is required" })
        );
    }

    #[test]
    fn test_persistence_error_envelope() {
        let err = ProdirError::persistence("disk full");
        let response =
            ApiResponse::<()>::from_error(&err, "Server error while fetching professionals");
        assert_eq!(response.status, 500);
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "success": false,
                "error": "Server error while fetching professionals",
                "details": "disk full",
            })
        );
    }
}
