//! Folio Market Data Crate
//!
//! Provider-agnostic latest-price lookup for the Folio portfolio tracker.
//!
//! # Overview
//!
//! Every price source implements [`MarketDataProvider`]. Callers hold a list of
//! providers and ask each one in [`priority`](MarketDataProvider::priority)
//! order until one answers:
//!
//! ```text
//! +------------------+
//! |  QuoteService    |  (folio-core)
//! +------------------+
//!          |
//!          v
//! +------------------+     +------------------+
//! |  ManualProvider  | --> |  YahooProvider   |
//! +------------------+     +------------------+
//!          |                        |
//!          +-----------+------------+
//!                      v
//!              +------------------+
//!              |      Quote       |
//!              +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`Quote`] - Latest market quote with optional OHLCV data
//! - [`MarketDataProvider`] - Trait implemented by every price source
//! - [`MarketDataError`] - Errors raised while fetching quotes

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::MarketDataError;
pub use models::Quote;
pub use provider::manual::ManualProvider;
pub use provider::yahoo::YahooProvider;
pub use provider::MarketDataProvider;
