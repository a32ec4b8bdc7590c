use std::{net::SocketAddr, time::Duration};

use anyhow::{bail, Context};
use folio_core::quotes::ProviderKind;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    /// Raw JWT key; a random one is generated when absent.
    pub secret_key: Option<String>,
    pub token_ttl: Duration,
    pub quote_providers: Vec<ProviderKind>,
    pub manual_prices: String,
    pub quote_cache_ttl: Duration,
    pub log_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            db_path: folio_storage_sqlite::DEFAULT_DB_PATH.to_string(),
            cors_allow: vec!["*".to_string()],
            request_timeout: Duration::from_millis(30_000),
            secret_key: None,
            token_ttl: Duration::from_secs(60 * 60),
            quote_providers: vec![ProviderKind::Manual, ProviderKind::Yahoo],
            manual_prices: String::new(),
            quote_cache_ttl: Duration::from_secs(60),
            log_format: "text".to_string(),
        }
    }
}

fn var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_u64(key: &str, default: u64) -> anyhow::Result<u64> {
    match var(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {key}: '{raw}'")),
        None => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Config::default();

        let listen_addr = match var("FOLIO_LISTEN_ADDR") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("Invalid FOLIO_LISTEN_ADDR: '{raw}'"))?,
            None => defaults.listen_addr,
        };
        let db_path = folio_storage_sqlite::get_db_path();
        let cors_allow = var("FOLIO_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms = parse_u64("FOLIO_REQUEST_TIMEOUT_MS", 30_000)?;
        let ttl_minutes = parse_u64("FOLIO_AUTH_TOKEN_TTL_MINUTES", 60)?;
        if ttl_minutes == 0 {
            bail!("FOLIO_AUTH_TOKEN_TTL_MINUTES must be positive");
        }
        let quote_providers = match var("FOLIO_QUOTE_PROVIDERS") {
            Some(raw) => ProviderKind::parse_list(&raw)
                .map_err(|e| anyhow::anyhow!("Invalid FOLIO_QUOTE_PROVIDERS: {e}"))?,
            None => defaults.quote_providers,
        };
        let cache_secs = parse_u64("FOLIO_QUOTE_CACHE_TTL_SECS", 60)?;
        let log_format = var("FOLIO_LOG_FORMAT").unwrap_or(defaults.log_format);
        if !matches!(log_format.to_ascii_lowercase().as_str(), "text" | "json") {
            bail!("Invalid FOLIO_LOG_FORMAT: '{log_format}'. Expected 'text' or 'json'");
        }

        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            secret_key: var("FOLIO_SECRET_KEY"),
            token_ttl: Duration::from_secs(ttl_minutes * 60),
            quote_providers,
            manual_prices: var("FOLIO_MANUAL_PRICES").unwrap_or_default(),
            quote_cache_ttl: Duration::from_secs(cache_secs),
            log_format,
        })
    }
}
