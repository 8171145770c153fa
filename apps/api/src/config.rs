use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub pdf_service_url: String,
    pub pdf_timeout: Duration,
    pub editor_debounce: Duration,
    pub default_font_size: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            pdf_service_url: std::env::var("PDF_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:3001/render".to_string()),
            pdf_timeout: Duration::from_secs(parse_env("PDF_TIMEOUT_SECS", 60)?),
            editor_debounce: Duration::from_millis(parse_env("EDITOR_DEBOUNCE_MS", 150)?),
            default_font_size: std::env::var("DEFAULT_FONT_SIZE")
                .unwrap_or_else(|_| "11pt".to_string()),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            pdf_service_url: "http://localhost:3001/render".to_string(),
            pdf_timeout: Duration::from_secs(60),
            editor_debounce: Duration::from_millis(150),
            default_font_size: "11pt".to_string(),
        }
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw:?}")),
        Err(_) => Ok(default),
    }
}
