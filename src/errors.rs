use crate::lead_store::StoreError;
use crate::models::FieldViolation;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

/// Errors surfaced by the lead pipeline to the HTTP layer.
///
/// Enrichment failures are absorbed inside the pipeline and never appear here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Input failed validation; one entry per offending field.
    Validation(Vec<FieldViolation>),
    /// A lead with the same email already exists.
    Duplicate(String),
    /// No lead with the requested identifier.
    NotFound(String),
    /// Storage unreachable or failed unexpectedly.
    Persistence(String),
}

impl AppError {
    /// HTTP status the error is rendered with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Duplicate(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn duplicate_email(email: &str) -> Self {
        AppError::Duplicate(format!("Lead with email {} already exists", email))
    }

    pub fn lead_not_found(id: &str) -> Self {
        AppError::NotFound(format!("Lead with ID {} not found", id))
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(fields) => {
                let names: Vec<&str> = fields.iter().map(|v| v.field.as_str()).collect();
                write!(f, "Validation error: invalid {}", names.join(", "))
            }
            AppError::Duplicate(msg) => write!(f, "Duplicate: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Persistence(msg) => write!(f, "Persistence error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    /// Maps each variant to its status code and JSON body.
    ///
    /// Persistence details are logged and replaced with a generic message.
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            AppError::Validation(fields) => json!({
                "error": "Validation failed",
                "fields": fields,
            }),
            AppError::Duplicate(msg) => {
                tracing::warn!("Rejected duplicate lead: {}", msg);
                json!({ "error": msg })
            }
            AppError::NotFound(msg) => json!({ "error": msg }),
            AppError::Persistence(msg) => {
                tracing::error!("Persistence error: {}", msg);
                json!({ "error": "Internal server error" })
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateKey(email) => AppError::duplicate_email(&email),
            StoreError::Unavailable(msg) => AppError::Persistence(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::Validation(vec![FieldViolation::new("email", "invalid")]).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::duplicate_email("a@b.com").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::lead_not_found("x").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Persistence("down".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_store_error_conversion() {
        assert_eq!(
            AppError::from(StoreError::DuplicateKey("a@b.com".into())),
            AppError::Duplicate("Lead with email a@b.com already exists".into())
        );
        assert!(matches!(
            AppError::from(StoreError::Unavailable("pool timed out".into())),
            AppError::Persistence(_)
        ));
    }

    #[test]
    fn test_display_lists_fields() {
        let err = AppError::Validation(vec![
            FieldViolation::new("name", "must not be empty"),
            FieldViolation::new("phone", "must not be empty"),
        ]);
        assert_eq!(err.to_string(), "Validation error: invalid name, phone");
    }

    #[test]
    fn test_persistence_response_hides_details() {
        let response = AppError::Persistence("connection refused".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
