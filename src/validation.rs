//! Input validation for new leads.

use crate::models::{CreateLeadRequest, FieldViolation};
use regex::Regex;
use std::sync::LazyLock;

pub const NAME_MAX_LEN: usize = 200;
pub const EMAIL_MAX_LEN: usize = 254;
pub const PHONE_MAX_LEN: usize = 20;

// RFC 5322 simplified email regex
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$",
    )
    .expect("email regex is valid")
});

/// Validate email address syntax: `local@domain.tld`, at most 254 characters.
pub fn is_valid_email(email: &str) -> bool {
    email.len() <= EMAIL_MAX_LEN && EMAIL_REGEX.is_match(email)
}

/// Trimmed, validated lead fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidLead {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Checks every field and reports all violations together.
pub fn validate_lead(input: &CreateLeadRequest) -> Result<ValidLead, Vec<FieldViolation>> {
    let name = input.name.trim();
    let email = input.email.trim();
    let phone = input.phone.trim();
    let mut violations = Vec::new();

    if name.is_empty() {
        violations.push(FieldViolation::new("name", "must not be empty"));
    } else if name.chars().count() > NAME_MAX_LEN {
        violations.push(FieldViolation::new(
            "name",
            format!("must be at most {} characters", NAME_MAX_LEN),
        ));
    }

    if email.is_empty() {
        violations.push(FieldViolation::new("email", "must not be empty"));
    } else if !is_valid_email(email) {
        violations.push(FieldViolation::new("email", "must be a valid email address"));
    }

    if phone.is_empty() {
        violations.push(FieldViolation::new("phone", "must not be empty"));
    } else if phone.chars().count() > PHONE_MAX_LEN {
        violations.push(FieldViolation::new(
            "phone",
            format!("must be at most {} characters", PHONE_MAX_LEN),
        ));
    }

    if !violations.is_empty() {
        return Err(violations);
    }

    Ok(ValidLead {
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
    })
}
