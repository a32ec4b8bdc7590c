#[cfg(test)]
mod tests {
    use crate::assets::{normalize_symbol, AssetType, NewAsset};
    use std::str::FromStr;

    #[test]
    fn test_asset_type_serialization() {
        assert_eq!(
            serde_json::to_string(&AssetType::MutualFund).unwrap(),
            "\"MUTUAL_FUND\""
        );
        assert_eq!(
            serde_json::from_str::<AssetType>("\"ETF\"").unwrap(),
            AssetType::Etf
        );
    }

    #[test]
    fn test_asset_type_from_str_is_lenient() {
        assert_eq!(AssetType::from_str("crypto").unwrap(), AssetType::Crypto);
        assert_eq!(
            AssetType::from_str(" mutual fund ").unwrap(),
            AssetType::MutualFund
        );
        assert_eq!(
            AssetType::from_str("Mutual-Fund").unwrap(),
            AssetType::MutualFund
        );
        assert!(AssetType::from_str("bond").is_err());
    }

    #[test]
    fn test_asset_type_round_trips_through_as_str() {
        for t in [
            AssetType::Stock,
            AssetType::Crypto,
            AssetType::Etf,
            AssetType::MutualFund,
            AssetType::Other,
        ] {
            assert_eq!(AssetType::from_str(t.as_str()).unwrap(), t);
        }
    }

    #[test]
    fn test_normalize_symbol() {
        assert_eq!(normalize_symbol("  aapl "), "AAPL");
        assert_eq!(normalize_symbol("btc-usd"), "BTC-USD");
    }

    #[test]
    fn test_new_asset_normalized() {
        let input = NewAsset {
            symbol: " msft ".to_string(),
            name: Some("   ".to_string()),
            asset_type: AssetType::Stock,
        };
        let normalized = input.normalized();
        assert_eq!(normalized.symbol, "MSFT");
        assert_eq!(normalized.name, None);

        let named = NewAsset {
            name: Some(" Microsoft ".to_string()),
            ..input
        }
        .normalized();
        assert_eq!(named.name.as_deref(), Some("Microsoft"));
    }

    #[test]
    fn test_new_asset_requires_symbol() {
        let input = NewAsset {
            symbol: "  ".to_string(),
            ..Default::default()
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_new_asset_deserializes_with_defaults() {
        let input: NewAsset = serde_json::from_str(r#"{"symbol":"vti"}"#).unwrap();
        assert_eq!(input.asset_type, AssetType::Stock);
        assert_eq!(input.name, None);
    }
}
