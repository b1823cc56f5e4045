use crate::circuit_breaker::{create_enrichment_circuit_breaker, EnrichmentCircuitBreaker};
use crate::config::Config;
use crate::enrichment::{parse_birth_date, BirthDateProvider, EnrichmentContext, EnrichmentError};
use async_trait::async_trait;
use chrono::NaiveDate;
use failsafe::futures::CircuitBreaker;
use reqwest::{header, Client};
use serde_json::Value;
use std::time::Duration;

/// HTTP client for the external birth date service.
///
/// Issues a single `GET` per lead. The reqwest timeout is a backstop; the
/// pipeline enforces the same bound around the whole call.
pub struct BirthDateApiService {
    client: Client,
    url: String,
    breaker: EnrichmentCircuitBreaker,
}

impl BirthDateApiService {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        Self::with_url(config.enrichment_url(), config.enrichment_timeout())
    }

    /// Builds a client against an explicit endpoint URL.
    pub fn with_url(url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            url: url.into(),
            breaker: create_enrichment_circuit_breaker(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn request_birth_date(&self) -> Result<NaiveDate, EnrichmentError> {
        let response = self
            .client
            .get(&self.url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(EnrichmentError::Status(status.as_u16()));
        }

        let payload: Value = response.json().await?;
        parse_birth_date(&payload)
    }
}

/// Only upstream faults count against the circuit; a well-formed answer
/// without a birth date means the service is healthy.
fn is_service_fault(err: &EnrichmentError) -> bool {
    match err {
        EnrichmentError::Timeout | EnrichmentError::Transport(_) => true,
        EnrichmentError::Status(code) => *code >= 500,
        EnrichmentError::Shape(_) | EnrichmentError::CircuitOpen => false,
    }
}

#[async_trait]
impl BirthDateProvider for BirthDateApiService {
    async fn fetch_birth_date(
        &self,
        context: &EnrichmentContext,
    ) -> Result<NaiveDate, EnrichmentError> {
        tracing::debug!("Fetching birth date for {} from {}", context.email, self.url);

        let result = self
            .breaker
            .call_with(is_service_fault, self.request_birth_date())
            .await;

        match result {
            Ok(birth_date) => {
                tracing::info!(
                    "Successfully fetched birth date from external API: {}",
                    birth_date
                );
                Ok(birth_date)
            }
            Err(failsafe::Error::Inner(e)) => Err(e),
            Err(failsafe::Error::Rejected) => Err(EnrichmentError::CircuitOpen),
        }
    }
}
