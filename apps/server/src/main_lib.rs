use std::sync::Arc;

use folio_core::{
    assets::{AssetService, AssetServiceTrait},
    portfolio::{PerformanceService, PerformanceServiceTrait},
    quotes::{build_providers, QuoteService},
    transactions::{TransactionService, TransactionServiceTrait},
    users::{UserService, UserServiceTrait},
};
use folio_market_data::MarketDataProvider;
use folio_storage_sqlite::{
    db, AssetRepository, DbPool, TransactionRepository, UserRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::{auth::AuthManager, auth::resolve_secret_key, config::Config};

pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub asset_service: Arc<dyn AssetServiceTrait>,
    pub transaction_service: Arc<dyn TransactionServiceTrait>,
    pub performance_service: Arc<dyn PerformanceServiceTrait>,
    pub auth: Arc<AuthManager>,
    pub pool: Arc<DbPool>,
    pub db_path: String,
}

pub fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    // A subscriber may already be installed (tests, embedding); keep it.
    let _ = if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .try_init()
    };
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let providers = build_providers(&config.quote_providers, &config.manual_prices).await?;
    build_state_with_providers(config, providers)
}

/// Wires repositories and services over the configured database, using the
/// given quote providers.
pub fn build_state_with_providers(
    config: &Config,
    providers: Vec<Arc<dyn MarketDataProvider>>,
) -> anyhow::Result<Arc<AppState>> {
    let (pool, writer) = db::open(&config.db_path)?;
    tracing::info!("Database path in use: {}", config.db_path);

    let user_repository = Arc::new(UserRepository::new(pool.clone(), writer.clone()));
    let asset_repository = Arc::new(AssetRepository::new(pool.clone(), writer.clone()));
    let transaction_repository = Arc::new(TransactionRepository::new(pool.clone(), writer));

    let user_service = Arc::new(UserService::new(user_repository));
    let asset_service = Arc::new(AssetService::new(asset_repository));
    let transaction_service = Arc::new(TransactionService::new(
        transaction_repository,
        asset_service.clone(),
    ));

    tracing::info!(
        "Quote providers: {:?}, cache ttl {}s",
        providers.iter().map(|p| p.id()).collect::<Vec<_>>(),
        config.quote_cache_ttl.as_secs()
    );
    let quote_service = Arc::new(QuoteService::new(providers, config.quote_cache_ttl));
    let performance_service = Arc::new(PerformanceService::new(
        asset_service.clone(),
        transaction_service.clone(),
        quote_service,
    ));

    let secret = resolve_secret_key(config.secret_key.as_deref())?;
    let auth = Arc::new(AuthManager::new(&secret, config.token_ttl));

    Ok(Arc::new(AppState {
        user_service,
        asset_service,
        transaction_service,
        performance_service,
        auth,
        pool,
        db_path: config.db_path.clone(),
    }))
}
