use crate::errors::AppError;
use crate::lead_store::LeadStore;
use crate::models::{CreateLeadRequest, FieldViolation};
use crate::pipeline::LeadPipeline;
use crate::responses::{LeadListResponse, LeadResponse};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use std::sync::Arc;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Lead ingestion and read pipeline.
    pub pipeline: LeadPipeline,
    /// Store handle used by the health check.
    pub store: Arc<dyn LeadStore>,
    /// Reported by the root endpoint.
    pub app_title: String,
    pub app_version: String,
}

/// GET /
///
/// Process liveness with application name and version.
pub async fn root(State(state): State<Arc<AppState>>) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "application": state.app_title,
            "version": state.app_version,
        })),
    )
}

/// GET /health
///
/// Reports whether the lead store is reachable. Always answers 200.
pub async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<serde_json::Value>) {
    let database = match state.store.ping().await {
        Ok(()) => "connected",
        Err(e) => {
            tracing::warn!("Health check: store unreachable: {}", e);
            "disconnected"
        }
    };

    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "database": database,
        })),
    )
}

/// POST /leads
///
/// Creates a lead. Birth date is fetched from the external service on a
/// best-effort basis.
///
/// # Returns
///
/// * `201` with the created lead, `400` on validation or duplicate email,
///   `500` on storage failure.
pub async fn create_lead(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateLeadRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<LeadResponse>), AppError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!("Rejected lead payload: {}", rejection.body_text());
        AppError::Validation(vec![FieldViolation::new("body", rejection.body_text())])
    })?;

    tracing::info!("POST /leads - email: {}", request.email);
    let lead = state.pipeline.create(request).await?;

    Ok((StatusCode::CREATED, Json(LeadResponse::from(lead))))
}

/// GET /leads
pub async fn list_leads(
    State(state): State<Arc<AppState>>,
) -> Result<Json<LeadListResponse>, AppError> {
    let leads = state.pipeline.list().await?;
    tracing::info!("GET /leads - {} lead(s)", leads.len());

    Ok(Json(LeadListResponse::from(leads)))
}

/// GET /leads/:id
pub async fn get_lead(
    State(state): State<Arc<AppState>>,
    Path(lead_id): Path<String>,
) -> Result<Json<LeadResponse>, AppError> {
    tracing::info!("GET /leads/{}", lead_id);
    let lead = state.pipeline.get(&lead_id).await?;

    Ok(Json(LeadResponse::from(lead)))
}
