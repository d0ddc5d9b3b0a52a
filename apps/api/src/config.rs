use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::llm_client::OPENROUTER_API_URL;

/// Application configuration loaded from environment variables.
/// Everything has a default. `OPENROUTER_API_KEY` is deliberately optional:
/// its absence is a request-time configuration error on the proxy route, not
/// a startup failure, so the form keeps working in demo mode without it.
#[derive(Debug, Clone)]
pub struct Config {
    pub openrouter_api_key: Option<String>,
    pub openrouter_url: String,
    pub settings_path: PathBuf,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openrouter_api_key: std::env::var("OPENROUTER_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            openrouter_url: std::env::var("OPENROUTER_URL")
                .unwrap_or_else(|_| OPENROUTER_API_URL.to_string()),
            settings_path: std::env::var("ADMIN_SETTINGS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("adminSettings.json")),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}
