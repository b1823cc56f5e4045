use crate::models::Lead;
use serde::{Deserialize, Serialize};

/// External representation of a lead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// ISO-8601 date (`YYYY-MM-DD`), `null` when enrichment produced nothing.
    pub birth_date: Option<String>,
}

impl From<Lead> for LeadResponse {
    fn from(lead: Lead) -> Self {
        Self {
            id: lead.id.to_string(),
            name: lead.name,
            email: lead.email,
            phone: lead.phone,
            birth_date: lead.birth_date.map(|d| d.format("%Y-%m-%d").to_string()),
        }
    }
}

/// Body of `GET /leads`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadListResponse {
    pub leads: Vec<LeadResponse>,
    pub total: usize,
}

impl From<Vec<Lead>> for LeadListResponse {
    fn from(leads: Vec<Lead>) -> Self {
        let leads: Vec<LeadResponse> = leads.into_iter().map(LeadResponse::from).collect();
        Self {
            total: leads.len(),
            leads,
        }
    }
}
