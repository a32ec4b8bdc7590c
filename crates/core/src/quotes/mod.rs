//! Quote lookup for valuation.
//!
//! ```text
//! PerformanceService → QuoteService → [MarketDataProvider, ...] (by priority)
//!                           ↓
//!                    per-symbol price cache
//! ```

mod providers;
mod quotes_service;
mod quotes_traits;


pub use providers::{build_providers, ProviderKind};
pub use quotes_service::QuoteService;
pub use quotes_traits::QuoteServiceTrait;
