use leads_api::config::Config;
use leads_api::db::Database;
use leads_api::db_storage::PgLeadStore;
use leads_api::handlers::AppState;
use leads_api::lead_store::LeadStore;
use leads_api::pipeline::LeadPipeline;
use leads_api::routes;
use leads_api::services::BirthDateApiService;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the application.
///
/// This function initializes the application, including:
/// - Logging and tracing.
/// - Configuration loading.
/// - Database connection and schema.
/// - The birth date client and lead pipeline.
/// - HTTP routes and middleware.
///
/// It then starts the Axum server and shuts down gracefully on Ctrl+C.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "leads_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting application...");

    // Load configuration
    let config = Config::from_env()?;

    // Initialize database connection pool
    let db = Database::new(&config.database_url).await.map_err(|e| {
        tracing::error!("Failed to connect to database: {}", e);
        e
    })?;
    tracing::info!("Database connection established");

    let store: Arc<dyn LeadStore> = Arc::new(PgLeadStore::new(db.pool.clone()));

    let enricher = BirthDateApiService::new(&config)?;
    tracing::info!("✓ Birth date client initialized: {}", enricher.url());

    let pipeline = LeadPipeline::new(store.clone(), Arc::new(enricher))
        .with_enrichment_timeout(config.enrichment_timeout());

    let app_state = Arc::new(AppState {
        pipeline,
        store,
        app_title: config.app_title.clone(),
        app_version: config.app_version.clone(),
    });

    let app = routes::router(app_state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutting down application...");
    db.pool.close().await;
    tracing::info!("Database connection closed");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
