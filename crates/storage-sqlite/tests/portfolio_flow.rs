//! Services running against a real SQLite file.

use std::sync::Arc;
use std::time::Duration;

use folio_core::assets::{AssetService, AssetServiceTrait, NewAsset};
use folio_core::portfolio::{PerformanceService, PerformanceServiceTrait, PnlPercent};
use folio_core::quotes::QuoteService;
use folio_core::transactions::{
    NewTransaction, TransactionService, TransactionServiceTrait, TransactionUpdate,
};
use folio_core::users::{NewUser, UserService, UserServiceTrait};
use folio_core::Error;
use folio_market_data::{ManualProvider, MarketDataProvider};
use folio_storage_sqlite::{open, AssetRepository, TransactionRepository, UserRepository};
use rust_decimal_macros::dec;
use tempfile::TempDir;

struct Services {
    users: Arc<UserService>,
    assets: Arc<AssetService>,
    transactions: Arc<TransactionService>,
    performance: PerformanceService,
    _dir: TempDir,
}

fn build_services(prices: &str) -> Services {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let db_path = dir.path().join("portfolio.db");
    let (pool, writer) = open(&db_path.to_string_lossy()).expect("Failed to open database");

    let users = Arc::new(UserService::new(Arc::new(UserRepository::new(
        pool.clone(),
        writer.clone(),
    ))));
    let assets = Arc::new(AssetService::new(Arc::new(AssetRepository::new(
        pool.clone(),
        writer.clone(),
    ))));
    let transactions = Arc::new(TransactionService::new(
        Arc::new(TransactionRepository::new(pool, writer)),
        assets.clone(),
    ));
    let providers: Vec<Arc<dyn MarketDataProvider>> =
        vec![Arc::new(ManualProvider::from_price_table(prices).expect("valid price table"))];
    let quotes = Arc::new(QuoteService::new(providers, Duration::ZERO));
    let performance = PerformanceService::new(assets.clone(), transactions.clone(), quotes);

    Services {
        users,
        assets,
        transactions,
        performance,
        _dir: dir,
    }
}

fn new_user(name: &str) -> NewUser {
    NewUser {
        username: name.to_string(),
        email: format!("{name}@example.com"),
        password: "correct horse".to_string(),
        password_confirmation: None,
    }
}

fn trade(asset_id: &str, kind: &str, qty: &str, price: &str, date: &str) -> NewTransaction {
    NewTransaction {
        asset_id: asset_id.to_string(),
        transaction_type: kind.parse().unwrap(),
        quantity: qty.into(),
        price_per_unit: price.into(),
        fees: None,
        transaction_date: Some(date.to_string()),
        notes: None,
    }
}

#[tokio::test]
async fn test_fifo_performance_end_to_end() {
    let s = build_services("AAPL=150");
    let user = s.users.register(new_user("alice")).await.unwrap();

    let aapl = s
        .assets
        .create_asset(&user.id, NewAsset { symbol: " aapl ".to_string(), ..Default::default() })
        .await
        .unwrap();
    assert_eq!(aapl.symbol, "AAPL");

    for t in [
        trade(&aapl.id, "BUY", "10", "100", "2024-01-01"),
        trade(&aapl.id, "BUY", "10", "120", "2024-02-01"),
        trade(&aapl.id, "SELL", "15", "130", "2024-03-01"),
    ] {
        s.transactions.create_transaction(&user.id, t).await.unwrap();
    }

    let perf = s.performance.get_portfolio_performance(&user.id).await.unwrap();
    let position = &perf.positions["AAPL"];
    assert_eq!(position.quantity, dec!(5));
    assert_eq!(position.total_cost_basis, dec!(600));
    assert_eq!(position.average_cost_basis, dec!(120));
    assert_eq!(position.market_value, Some(dec!(750)));
    assert_eq!(position.unrealized_pnl, Some(dec!(150)));
    assert_eq!(
        position.unrealized_pnl_percent,
        Some(PnlPercent::Finite(dec!(25)))
    );
    // 15 * 130 - (10 * 100 + 5 * 120)
    assert_eq!(position.realized_pnl, dec!(350));
    assert_eq!(perf.total_realized_pnl, dec!(350));
    assert!(perf.unpriced_symbols.is_empty());

    let report = s.performance.get_realized_gains(&user.id, None, None).unwrap();
    assert_eq!(report.gains.len(), 1);
    assert_eq!(report.total_realized_pnl, dec!(350));
}

#[tokio::test]
async fn test_editing_a_trade_changes_the_replay() {
    let s = build_services("MSFT=10");
    let user = s.users.register(new_user("bob")).await.unwrap();
    let msft = s
        .assets
        .create_asset(&user.id, NewAsset { symbol: "MSFT".to_string(), ..Default::default() })
        .await
        .unwrap();

    let buy = s
        .transactions
        .create_transaction(&user.id, trade(&msft.id, "BUY", "4", "5", "2024-01-01"))
        .await
        .unwrap();

    let update = TransactionUpdate {
        quantity: Some("8".into()),
        ..Default::default()
    };
    let updated = s
        .transactions
        .update_transaction(&buy.id, &user.id, update)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.quantity, dec!(8));

    let perf = s.performance.get_portfolio_performance(&user.id).await.unwrap();
    assert_eq!(perf.total_cost_basis, dec!(40));
    assert_eq!(perf.total_market_value, dec!(80));
}

#[tokio::test]
async fn test_users_are_isolated_and_deletes_cascade() {
    let s = build_services("");
    let alice = s.users.register(new_user("alice")).await.unwrap();
    let mallory = s.users.register(new_user("mallory")).await.unwrap();

    let asset = s
        .assets
        .create_asset(&alice.id, NewAsset { symbol: "VOO".to_string(), ..Default::default() })
        .await
        .unwrap();
    let tx = s
        .transactions
        .create_transaction(&alice.id, trade(&asset.id, "BUY", "1", "400", "2024-01-01"))
        .await
        .unwrap();

    assert!(s.transactions.get_transaction(&tx.id, &mallory.id).unwrap().is_none());
    assert!(matches!(
        s.transactions
            .create_transaction(&mallory.id, trade(&asset.id, "BUY", "1", "1", "2024-01-01"))
            .await,
        Err(Error::NotFound(_))
    ));

    // Unpriced open position is reported, not dropped.
    let perf = s.performance.get_portfolio_performance(&alice.id).await.unwrap();
    assert_eq!(perf.unpriced_symbols, vec!["VOO".to_string()]);

    assert!(s.assets.delete_asset(&asset.id, &alice.id).await.unwrap());
    assert!(s.transactions.get_transaction(&tx.id, &alice.id).unwrap().is_none());

    assert!(s.users.delete_user(&alice.id).await.unwrap());
    assert!(s.users.get_user_by_username("alice").unwrap().is_none());
    assert!(matches!(
        s.users.register(new_user("MALLORY")).await,
        Err(Error::ConstraintViolation(_))
    ));
}
