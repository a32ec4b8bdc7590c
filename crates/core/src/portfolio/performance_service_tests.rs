#[cfg(test)]
mod tests {
    use crate::assets::{Asset, AssetServiceTrait, AssetType, NewAsset};
    use crate::errors::{Error, Result};
    use crate::portfolio::{PerformanceService, PerformanceServiceTrait, PnlPercent};
    use crate::quotes::QuoteServiceTrait;
    use crate::transactions::{
        NewTransaction, Transaction, TransactionServiceTrait, TransactionType, TransactionUpdate,
    };
    use async_trait::async_trait;
    use chrono::{NaiveDate, NaiveDateTime};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    // --- Mock AssetService ---
    struct MockAssetService {
        assets: Vec<Asset>,
    }

    #[async_trait]
    impl AssetServiceTrait for MockAssetService {
        async fn create_asset(&self, _owner_id: &str, _new_asset: NewAsset) -> Result<Asset> {
            unimplemented!()
        }

        fn get_asset(&self, asset_id: &str, owner_id: &str) -> Result<Option<Asset>> {
            Ok(self
                .assets
                .iter()
                .find(|a| a.id == asset_id && a.owner_id == owner_id)
                .cloned())
        }

        fn get_asset_by_symbol(&self, _symbol: &str, _owner_id: &str) -> Result<Option<Asset>> {
            unimplemented!()
        }

        fn list_assets(
            &self,
            _owner_id: &str,
            _skip: Option<i64>,
            _limit: Option<i64>,
        ) -> Result<Vec<Asset>> {
            unimplemented!()
        }

        fn list_all_assets(&self, owner_id: &str) -> Result<Vec<Asset>> {
            Ok(self
                .assets
                .iter()
                .filter(|a| a.owner_id == owner_id)
                .cloned()
                .collect())
        }

        async fn delete_asset(&self, _asset_id: &str, _owner_id: &str) -> Result<bool> {
            unimplemented!()
        }
    }

    // --- Mock TransactionService ---
    struct MockTransactionService {
        transactions: Vec<Transaction>,
    }

    #[async_trait]
    impl TransactionServiceTrait for MockTransactionService {
        async fn create_transaction(
            &self,
            _owner_id: &str,
            _new_transaction: NewTransaction,
        ) -> Result<Transaction> {
            unimplemented!()
        }

        fn get_transaction(
            &self,
            _transaction_id: &str,
            _owner_id: &str,
        ) -> Result<Option<Transaction>> {
            unimplemented!()
        }

        fn list_transactions(
            &self,
            _owner_id: &str,
            _skip: Option<i64>,
            _limit: Option<i64>,
        ) -> Result<Vec<Transaction>> {
            unimplemented!()
        }

        fn list_transactions_for_asset(
            &self,
            asset_id: &str,
            owner_id: &str,
        ) -> Result<Vec<Transaction>> {
            Ok(self
                .transactions
                .iter()
                .filter(|t| t.asset_id == asset_id && t.owner_id == owner_id)
                .cloned()
                .collect())
        }

        async fn update_transaction(
            &self,
            _transaction_id: &str,
            _owner_id: &str,
            _update: TransactionUpdate,
        ) -> Result<Option<Transaction>> {
            unimplemented!()
        }

        async fn delete_transaction(&self, _transaction_id: &str, _owner_id: &str) -> Result<bool> {
            unimplemented!()
        }
    }

    // --- Mock QuoteService ---
    struct MockQuoteService {
        prices: HashMap<String, Decimal>,
        requested: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl QuoteServiceTrait for MockQuoteService {
        async fn get_current_price(&self, symbol: &str) -> Option<Decimal> {
            self.requested.lock().unwrap().push(symbol.to_string());
            self.prices.get(symbol).copied()
        }
    }

    fn asset(id: &str, symbol: &str) -> Asset {
        Asset {
            id: id.to_string(),
            owner_id: "u1".to_string(),
            symbol: symbol.to_string(),
            name: None,
            asset_type: AssetType::Stock,
            created_at: at(2024, 1, 1),
        }
    }

    fn trade(
        id: &str,
        asset_id: &str,
        kind: TransactionType,
        qty: Decimal,
        price: Decimal,
        when: NaiveDateTime,
    ) -> Transaction {
        Transaction {
            id: id.to_string(),
            owner_id: "u1".to_string(),
            asset_id: asset_id.to_string(),
            transaction_type: kind,
            quantity: qty,
            price_per_unit: price,
            fees: Decimal::ZERO,
            transaction_date: when,
            notes: None,
            created_at: when,
        }
    }

    /// AAPL open and priced, MSFT open without a price, TSLA fully sold,
    /// GOOG never traded.
    fn fixture() -> (PerformanceService, Arc<MockQuoteService>) {
        let assets = vec![
            asset("a-aapl", "AAPL"),
            asset("a-msft", "MSFT"),
            asset("a-tsla", "TSLA"),
            asset("a-goog", "GOOG"),
        ];
        let transactions = vec![
            trade("t01", "a-aapl", TransactionType::Buy, dec!(10), dec!(100), at(2024, 1, 5)),
            trade("t02", "a-aapl", TransactionType::Sell, dec!(4), dec!(120), at(2024, 3, 5)),
            trade("t03", "a-msft", TransactionType::Buy, dec!(2), dec!(300), at(2024, 2, 1)),
            trade("t04", "a-tsla", TransactionType::Buy, dec!(5), dec!(200), at(2024, 1, 10)),
            trade("t05", "a-tsla", TransactionType::Sell, dec!(5), dec!(180), at(2024, 6, 1)),
        ];
        let quotes = Arc::new(MockQuoteService {
            prices: HashMap::from([
                ("AAPL".to_string(), dec!(150)),
                ("TSLA".to_string(), dec!(250)),
            ]),
            requested: Mutex::new(Vec::new()),
        });
        let service = PerformanceService::new(
            Arc::new(MockAssetService { assets }),
            Arc::new(MockTransactionService { transactions }),
            quotes.clone(),
        );
        (service, quotes)
    }

    #[tokio::test]
    async fn test_portfolio_performance() {
        let (service, quotes) = fixture();
        let perf = service.get_portfolio_performance("u1").await.unwrap();

        assert_eq!(
            perf.positions.keys().cloned().collect::<Vec<_>>(),
            vec!["AAPL", "MSFT"]
        );

        let aapl = &perf.positions["AAPL"];
        assert_eq!(aapl.quantity, dec!(6));
        assert_eq!(aapl.total_cost_basis, dec!(600));
        assert_eq!(aapl.market_value, Some(dec!(900)));
        assert_eq!(aapl.unrealized_pnl, Some(dec!(300)));
        assert_eq!(aapl.unrealized_pnl_percent, Some(PnlPercent::Finite(dec!(50))));
        assert_eq!(aapl.realized_pnl, dec!(80));

        let msft = &perf.positions["MSFT"];
        assert_eq!(msft.market_value, None);

        assert_eq!(perf.total_cost_basis, dec!(1200));
        assert_eq!(perf.total_market_value, dec!(900));
        assert_eq!(perf.total_unrealized_pnl, dec!(300));
        // AAPL +80, TSLA -100
        assert_eq!(perf.total_realized_pnl, dec!(-20));
        assert_eq!(perf.unpriced_symbols, vec!["MSFT"]);

        // Closed and untraded assets are never priced.
        let requested = quotes.requested.lock().unwrap().clone();
        assert_eq!(requested, vec!["AAPL", "MSFT"]);
    }

    #[tokio::test]
    async fn test_portfolio_performance_for_user_without_assets() {
        let (service, _) = fixture();
        let perf = service.get_portfolio_performance("nobody").await.unwrap();
        assert!(perf.positions.is_empty());
        assert_eq!(perf.total_realized_pnl, Decimal::ZERO);
    }

    #[test]
    fn test_realized_gains_all_time() {
        let (service, _) = fixture();
        let report = service.get_realized_gains("u1", None, None).unwrap();
        let ids: Vec<&str> = report
            .gains
            .iter()
            .map(|g| g.transaction_id.as_str())
            .collect();
        assert_eq!(ids, vec!["t02", "t05"]);
        assert_eq!(report.gains[0].symbol, "AAPL");
        assert_eq!(report.gains[0].cost_basis, dec!(400));
        assert_eq!(report.gains[0].proceeds, dec!(480));
        assert_eq!(report.total_realized_pnl, dec!(-20));
    }

    #[test]
    fn test_realized_gains_window_is_inclusive() {
        let (service, _) = fixture();
        let report = service
            .get_realized_gains(
                "u1",
                NaiveDate::from_ymd_opt(2024, 6, 1),
                NaiveDate::from_ymd_opt(2024, 6, 1),
            )
            .unwrap();
        assert_eq!(report.gains.len(), 1);
        assert_eq!(report.gains[0].transaction_id, "t05");
        // Cost basis still comes from the January buy outside the window.
        assert_eq!(report.gains[0].cost_basis, dec!(1000));
        assert_eq!(report.total_realized_pnl, dec!(-100));

        let before = service
            .get_realized_gains("u1", None, NaiveDate::from_ymd_opt(2024, 3, 4))
            .unwrap();
        assert!(before.gains.is_empty());
        assert_eq!(before.total_realized_pnl, Decimal::ZERO);
    }

    #[test]
    fn test_realized_gains_rejects_inverted_range() {
        let (service, _) = fixture();
        let err = service
            .get_realized_gains(
                "u1",
                NaiveDate::from_ymd_opt(2024, 12, 31),
                NaiveDate::from_ymd_opt(2024, 1, 1),
            )
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
}
