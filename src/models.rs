use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// ============ Domain Models ============

/// A stored lead.
///
/// `id`, `name`, `email` and `phone` never change once the store has assigned
/// the identifier. `birth_date` is best-effort enrichment data.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Lead {
    /// Identifier assigned by the store at creation.
    pub id: Uuid,
    pub name: String,
    /// Email as supplied by the caller. Uniqueness is case-insensitive.
    pub email: String,
    pub phone: String,
    /// Birth date obtained from the enrichment service, if any.
    pub birth_date: Option<NaiveDate>,
}

/// A validated lead that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLead {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub birth_date: Option<NaiveDate>,
}

impl NewLead {
    /// Attaches the store-assigned identifier.
    pub fn into_lead(self, id: Uuid) -> Lead {
        Lead {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            birth_date: self.birth_date,
        }
    }
}

/// Lowercased form of an email used for uniqueness comparisons.
pub fn email_key(email: &str) -> String {
    email.trim().to_lowercase()
}

// ============ API Request Models ============

/// Body of `POST /leads`.
///
/// Missing fields deserialize as empty strings so validation can report every
/// offending field at once.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CreateLeadRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

/// One rejected input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}
