/// Quantities at or below this are treated as zero (1e-9)
pub const ZERO_TOLERANCE: &str = "0.000000001";

/// Default page size for list operations
pub const DEFAULT_LIST_LIMIT: i64 = 100;

/// Upper bound for a single page, also used when a caller needs every row
pub const MAX_LIST_LIMIT: i64 = 10_000;

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;
