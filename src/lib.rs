//! Leads Management API Library
//!
//! Accepts lead records over HTTP, enriches each with a birth date fetched
//! from an external service, persists them and serves them back.
//!
//! # Modules
//!
//! - `api`: HTTP-facing components.
//! - `core`: Lead pipeline, validation and domain errors.
//! - `data`: Storage port and adapters.
//! - `integrations`: External service clients.
//! - `circuit_breaker`: Circuit breaker guarding the enrichment service.
//! - `config`: Configuration management.
//! - `db`: Database connection pool and schema bootstrap.
//! - `db_storage`: PostgreSQL lead store.
//! - `enrichment`: Birth date provider contract and payload parsing.
//! - `errors`: Error handling types.
//! - `handlers`: HTTP request handlers.
//! - `lead_store`: Lead store contract and in-memory store.
//! - `models`: Core data models.
//! - `pipeline`: Lead ingestion pipeline.
//! - `responses`: External lead representation.
//! - `routes`: Router assembly.
//! - `services`: HTTP birth date client.
//! - `validation`: Input validation.

pub mod api;
pub mod core;
pub mod data;
pub mod integrations;

pub mod circuit_breaker;
pub mod config;
pub mod db;
pub mod db_storage;
pub mod enrichment;
pub mod errors;
pub mod handlers;
pub mod lead_store;
pub mod models;
pub mod pipeline;
pub mod responses;
pub mod routes;
pub mod services;
pub mod validation;
