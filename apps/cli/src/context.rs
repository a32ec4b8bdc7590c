use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context as _, Result};
use clap::Args;
use folio_core::{
    assets::{AssetService, AssetServiceTrait},
    portfolio::PerformanceService,
    quotes::{build_providers, ProviderKind, QuoteService},
    transactions::{TransactionService, TransactionServiceTrait},
    users::{User, UserService, UserServiceTrait},
};
use folio_storage_sqlite::{db, AssetRepository, TransactionRepository, UserRepository};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::prompt;

#[derive(Args)]
pub struct Credentials {
    #[arg(long, global = true, env = "FOLIO_USERNAME")]
    pub username: Option<String>,

    /// Prompted for on stdin when absent
    #[arg(long, global = true, env = "FOLIO_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

impl Credentials {
    pub fn require_username(&self) -> Result<&str> {
        match self.username.as_deref() {
            Some(name) if !name.trim().is_empty() => Ok(name),
            _ => bail!("--username is required (or set FOLIO_USERNAME)"),
        }
    }
}

#[derive(Args)]
pub struct QuoteArgs {
    /// Enabled quote providers (manual, yahoo)
    #[arg(
        long = "quote-providers",
        global = true,
        env = "FOLIO_QUOTE_PROVIDERS",
        default_value = "manual,yahoo"
    )]
    pub providers: String,

    /// Fixed prices for the manual provider, as SYMBOL=PRICE,...
    #[arg(long = "manual-prices", global = true, env = "FOLIO_MANUAL_PRICES")]
    pub manual_prices: Option<String>,

    /// Price cache lifetime in seconds; 0 disables the cache
    #[arg(
        long = "quote-cache-ttl",
        global = true,
        env = "FOLIO_QUOTE_CACHE_TTL_SECS",
        default_value_t = 60
    )]
    pub cache_ttl_secs: u64,
}

/// Logs go to stderr so stdout carries only command output.
pub fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);

    let _ = if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init()
    };
}

pub fn resolve_db_path(database: Option<&str>) -> String {
    match database {
        Some(raw) if !raw.trim().is_empty() => db::db_path_from_url(raw.trim()),
        _ => folio_storage_sqlite::DEFAULT_DB_PATH.to_string(),
    }
}

/// Services wired over one database.
pub struct Context {
    pub users: Arc<dyn UserServiceTrait>,
    pub assets: Arc<dyn AssetServiceTrait>,
    pub transactions: Arc<dyn TransactionServiceTrait>,
    quote_providers: Vec<ProviderKind>,
    manual_prices: String,
    quote_cache_ttl: Duration,
}

impl Context {
    pub async fn open(db_path: &str, quotes: &QuoteArgs) -> Result<Self> {
        let quote_providers = ProviderKind::parse_list(&quotes.providers)
            .map_err(|e| anyhow::anyhow!("Invalid quote providers: {e}"))?;

        let (pool, writer) = db::open(db_path)
            .with_context(|| format!("Failed to open database at {db_path}"))?;
        tracing::debug!("Database path in use: {}", db_path);

        let user_repository = Arc::new(UserRepository::new(pool.clone(), writer.clone()));
        let asset_repository = Arc::new(AssetRepository::new(pool.clone(), writer.clone()));
        let transaction_repository = Arc::new(TransactionRepository::new(pool, writer));

        let assets = Arc::new(AssetService::new(asset_repository));
        let transactions = Arc::new(TransactionService::new(
            transaction_repository,
            assets.clone(),
        ));

        Ok(Self {
            users: Arc::new(UserService::new(user_repository)),
            assets,
            transactions,
            quote_providers,
            manual_prices: quotes.manual_prices.clone().unwrap_or_default(),
            quote_cache_ttl: Duration::from_secs(quotes.cache_ttl_secs),
        })
    }

    /// Built on demand; only valuation needs quote providers.
    pub async fn performance_service(&self) -> Result<PerformanceService> {
        let providers = build_providers(&self.quote_providers, &self.manual_prices).await?;
        let quotes = Arc::new(QuoteService::new(providers, self.quote_cache_ttl));
        Ok(PerformanceService::new(
            self.assets.clone(),
            self.transactions.clone(),
            quotes,
        ))
    }

    /// Realized gains need no prices, so no provider is set up.
    pub fn realized_gains_service(&self) -> PerformanceService {
        let quotes = Arc::new(QuoteService::new(Vec::new(), self.quote_cache_ttl));
        PerformanceService::new(self.assets.clone(), self.transactions.clone(), quotes)
    }

    pub fn authenticate(&self, credentials: &Credentials) -> Result<User> {
        let username = credentials.require_username()?;
        let password = match credentials.password.as_deref() {
            Some(password) => password.to_string(),
            None => prompt::read_secret("Password: ")?,
        };
        Ok(self.users.authenticate(username, &password)?)
    }

    /// Resolves the target asset of a trade from a symbol or an id.
    pub fn resolve_asset_id(
        &self,
        user: &User,
        symbol: Option<&str>,
        asset_id: Option<&str>,
    ) -> Result<String> {
        if let Some(id) = asset_id {
            return match self.assets.get_asset(id, &user.id)? {
                Some(asset) => Ok(asset.id),
                None => bail!("Asset {id} not found"),
            };
        }
        let Some(symbol) = symbol else {
            bail!("Either --symbol or --asset-id is required");
        };
        match self.assets.get_asset_by_symbol(symbol, &user.id)? {
            Some(asset) => Ok(asset.id),
            None => bail!(
                "No asset with symbol '{}'. Add it first with `folio asset add`",
                symbol.trim().to_uppercase()
            ),
        }
    }
}
