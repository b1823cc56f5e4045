//! Birth date enrichment contract.
//!
//! A provider makes one attempt per lead and reports why it failed so the
//! failure can be logged. Callers treat every failure the same way: the lead
//! is stored without a birth date.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use std::fmt;

/// What the provider knows about the lead being created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichmentContext {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Why an enrichment attempt produced no birth date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrichmentError {
    /// The attempt exceeded its time budget.
    Timeout,
    /// Connection, DNS or body transfer failure.
    Transport(String),
    /// The service answered with a non-success status.
    Status(u16),
    /// The payload did not carry a usable `birthDate`.
    Shape(String),
    /// The circuit breaker rejected the call without contacting the service.
    CircuitOpen,
}

impl EnrichmentError {
    /// Stable label used in log events.
    pub fn kind(&self) -> &'static str {
        match self {
            EnrichmentError::Timeout => "timeout",
            EnrichmentError::Transport(_) => "transport",
            EnrichmentError::Status(_) => "status",
            EnrichmentError::Shape(_) => "shape",
            EnrichmentError::CircuitOpen => "circuit_open",
        }
    }
}

impl fmt::Display for EnrichmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnrichmentError::Timeout => write!(f, "enrichment request timed out"),
            EnrichmentError::Transport(msg) => write!(f, "enrichment transport failed: {}", msg),
            EnrichmentError::Status(code) => write!(f, "enrichment service returned {}", code),
            EnrichmentError::Shape(msg) => write!(f, "unexpected enrichment payload: {}", msg),
            EnrichmentError::CircuitOpen => write!(f, "enrichment circuit open"),
        }
    }
}

impl std::error::Error for EnrichmentError {}

impl From<reqwest::Error> for EnrichmentError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            EnrichmentError::Timeout
        } else if err.is_decode() {
            EnrichmentError::Shape(err.to_string())
        } else if let Some(status) = err.status() {
            EnrichmentError::Status(status.as_u16())
        } else {
            EnrichmentError::Transport(err.to_string())
        }
    }
}

/// Port for birth date providers.
#[async_trait]
pub trait BirthDateProvider: Send + Sync {
    async fn fetch_birth_date(
        &self,
        context: &EnrichmentContext,
    ) -> Result<NaiveDate, EnrichmentError>;
}

/// Extracts the birth date from an enrichment payload.
///
/// Expects a JSON object with a `birthDate` string. Accepts `YYYY-M-D`
/// (padding optional) or an RFC 3339 timestamp.
pub fn parse_birth_date(payload: &serde_json::Value) -> Result<NaiveDate, EnrichmentError> {
    let raw = payload
        .get("birthDate")
        .ok_or_else(|| EnrichmentError::Shape("missing birthDate".to_string()))?
        .as_str()
        .ok_or_else(|| EnrichmentError::Shape("birthDate is not a string".to_string()))?
        .trim();

    if raw.is_empty() {
        return Err(EnrichmentError::Shape("birthDate is empty".to_string()));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive()))
        .map_err(|_| EnrichmentError::Shape(format!("unrecognised birthDate '{}'", raw)))
}
