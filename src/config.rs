use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_EXTERNAL_API_URL: &str = "https://dummyjson.com";
pub const DEFAULT_EXTERNAL_API_PATH: &str = "/users/1";
pub const DEFAULT_EXTERNAL_API_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_APP_TITLE: &str = "Leads Management API";

/// Process configuration, read once at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Base URL of the birth date enrichment service.
    pub external_api_url: String,
    /// Path appended to `external_api_url` for the single enrichment GET.
    pub external_api_path: String,
    /// Upper bound for one enrichment call, in seconds.
    pub external_api_timeout_secs: u64,
    pub app_title: String,
    pub app_version: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            database_url: std::env::var("DATABASE_URL")
                .or_else(|_| std::env::var("DB_URL"))
                .map_err(|_| {
                    anyhow::anyhow!("DATABASE_URL or DB_URL environment variable required")
                })
                .and_then(|url| {
                    if url.trim().is_empty() {
                        anyhow::bail!("DATABASE_URL cannot be empty");
                    }
                    if !url.starts_with("postgresql://") && !url.starts_with("postgres://") {
                        anyhow::bail!("DATABASE_URL must start with postgresql:// or postgres://");
                    }
                    Ok(url)
                })?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            external_api_url: parse_base_url(
                &std::env::var("EXTERNAL_API_URL")
                    .unwrap_or_else(|_| DEFAULT_EXTERNAL_API_URL.to_string()),
            )?,
            external_api_path: std::env::var("EXTERNAL_API_PATH")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(|p| normalize_path(&p))
                .unwrap_or_else(|| DEFAULT_EXTERNAL_API_PATH.to_string()),
            external_api_timeout_secs: std::env::var("EXTERNAL_API_TIMEOUT")
                .unwrap_or_else(|_| DEFAULT_EXTERNAL_API_TIMEOUT_SECS.to_string())
                .parse::<u64>()
                .map_err(|_| anyhow::anyhow!("EXTERNAL_API_TIMEOUT must be a whole number of seconds"))
                .and_then(|secs| {
                    if secs == 0 {
                        anyhow::bail!("EXTERNAL_API_TIMEOUT must be greater than zero");
                    }
                    Ok(secs)
                })?,
            app_title: std::env::var("APP_TITLE")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_APP_TITLE.to_string()),
            app_version: std::env::var("APP_VERSION")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string()),
        };

        // Log successful configuration load (without sensitive values)
        tracing::info!("Configuration loaded successfully");
        tracing::debug!(
            "Database URL: {}...",
            config.database_url.chars().take(20).collect::<String>()
        );
        tracing::debug!(
            "External API: {}{} (timeout {}s)",
            config.external_api_url,
            config.external_api_path,
            config.external_api_timeout_secs
        );
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }

    pub fn enrichment_timeout(&self) -> Duration {
        Duration::from_secs(self.external_api_timeout_secs)
    }

    /// Full URL of the enrichment endpoint.
    pub fn enrichment_url(&self) -> String {
        format!(
            "{}{}",
            self.external_api_url.trim_end_matches('/'),
            self.external_api_path
        )
    }
}

fn parse_base_url(raw: &str) -> anyhow::Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        anyhow::bail!("EXTERNAL_API_URL cannot be empty");
    }
    if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
        anyhow::bail!("EXTERNAL_API_URL must start with http:// or https://");
    }
    url::Url::parse(trimmed)
        .map_err(|e| anyhow::anyhow!("EXTERNAL_API_URL is not a valid URL: {}", e))?;
    Ok(trimmed.trim_end_matches('/').to_string())
}

fn normalize_path(path: &str) -> String {
    let trimmed = path.trim();
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}
