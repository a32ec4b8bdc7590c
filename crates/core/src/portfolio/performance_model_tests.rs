#[cfg(test)]
mod tests {
    use crate::portfolio::PnlPercent;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_pnl_percent_serialization() {
        assert_eq!(
            serde_json::to_value(PnlPercent::Finite(dec!(12.5))).unwrap(),
            json!(12.5)
        );
        assert_eq!(
            serde_json::to_value(PnlPercent::Unbounded).unwrap(),
            json!("Infinity")
        );
    }

    #[test]
    fn test_pnl_percent_deserialization() {
        assert_eq!(
            serde_json::from_value::<PnlPercent>(json!(-3.25)).unwrap(),
            PnlPercent::Finite(dec!(-3.25))
        );
        assert_eq!(
            serde_json::from_value::<PnlPercent>(json!("infinity")).unwrap(),
            PnlPercent::Unbounded
        );
        assert!(serde_json::from_value::<PnlPercent>(json!("lots")).is_err());
    }

    #[test]
    fn test_pnl_percent_helpers() {
        assert_eq!(PnlPercent::Finite(dec!(1)).as_decimal(), Some(dec!(1)));
        assert_eq!(PnlPercent::Unbounded.as_decimal(), None);
        assert!(PnlPercent::Unbounded.is_unbounded());
        assert_eq!(PnlPercent::Unbounded.to_string(), "Infinity");
        assert_eq!(PnlPercent::Finite(dec!(4.20)).to_string(), "4.20");
    }
}
