//! Lead ingestion pipeline.
//!
//! `create` runs validate → duplicate check → enrichment → insert, in that
//! order, within the calling task. Enrichment is best-effort: any failure,
//! including running past `enrichment_timeout`, is logged and the lead is
//! stored without a birth date. Every other failure reaches the caller.

use crate::enrichment::{BirthDateProvider, EnrichmentContext, EnrichmentError};
use crate::errors::AppError;
use crate::lead_store::LeadStore;
use crate::models::{CreateLeadRequest, Lead, NewLead};
use crate::validation::{validate_lead, ValidLead};
use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

pub const DEFAULT_ENRICHMENT_TIMEOUT: Duration = Duration::from_secs(10);

/// Orchestrates lead creation and reads over injected collaborators.
#[derive(Clone)]
pub struct LeadPipeline {
    store: Arc<dyn LeadStore>,
    enricher: Arc<dyn BirthDateProvider>,
    enrichment_timeout: Duration,
}

impl LeadPipeline {
    pub fn new(store: Arc<dyn LeadStore>, enricher: Arc<dyn BirthDateProvider>) -> Self {
        Self {
            store,
            enricher,
            enrichment_timeout: DEFAULT_ENRICHMENT_TIMEOUT,
        }
    }

    pub fn with_enrichment_timeout(mut self, timeout: Duration) -> Self {
        self.enrichment_timeout = timeout;
        self
    }

    pub fn enrichment_timeout(&self) -> Duration {
        self.enrichment_timeout
    }

    /// Creates a lead.
    ///
    /// # Errors
    ///
    /// - `Validation` when any field is rejected; nothing is looked up or stored.
    /// - `Duplicate` when the email is already taken, either by the pre-check
    ///   or by the store's uniqueness constraint.
    /// - `Persistence` when the store fails.
    pub async fn create(&self, input: CreateLeadRequest) -> Result<Lead, AppError> {
        let valid = validate_lead(&input).map_err(AppError::Validation)?;

        if self.store.find_by_email(&valid.email).await?.is_some() {
            tracing::warn!("Attempt to create lead with existing email: {}", valid.email);
            return Err(AppError::duplicate_email(&valid.email));
        }

        let birth_date = self.enrich(&valid).await;

        let lead = self
            .store
            .insert(NewLead {
                name: valid.name,
                email: valid.email,
                phone: valid.phone,
                birth_date,
            })
            .await?;

        tracing::info!(
            "Lead {} created (birth date {})",
            lead.id,
            if lead.birth_date.is_some() { "enriched" } else { "absent" }
        );
        Ok(lead)
    }

    /// Fetches a lead by its textual identifier. Malformed identifiers are
    /// reported as not found.
    pub async fn get(&self, id: &str) -> Result<Lead, AppError> {
        let Ok(uuid) = Uuid::parse_str(id.trim()) else {
            tracing::warn!("Invalid lead ID format: {}", id);
            return Err(AppError::lead_not_found(id));
        };

        self.store.find_by_id(uuid).await?.ok_or_else(|| {
            tracing::info!("Lead not found with ID: {}", id);
            AppError::lead_not_found(id)
        })
    }

    pub async fn list(&self) -> Result<Vec<Lead>, AppError> {
        Ok(self.store.list_all().await?)
    }

    /// Runs one bounded enrichment attempt and downgrades any failure to `None`.
    ///
    /// Dropping the provider future on timeout cancels its outbound request.
    async fn enrich(&self, lead: &ValidLead) -> Option<NaiveDate> {
        let context = EnrichmentContext {
            name: lead.name.clone(),
            email: lead.email.clone(),
            phone: lead.phone.clone(),
        };

        let outcome = tokio::time::timeout(
            self.enrichment_timeout,
            self.enricher.fetch_birth_date(&context),
        )
        .await
        .unwrap_or(Err(EnrichmentError::Timeout));

        match outcome {
            Ok(birth_date) => {
                tracing::debug!("Birth date fetched successfully: {}", birth_date);
                Some(birth_date)
            }
            Err(e) => {
                tracing::warn!(
                    kind = e.kind(),
                    "Failed to fetch birth date for {}, setting to null: {}",
                    context.email,
                    e
                );
                None
            }
        }
    }
}
