//! Portfolio valuation: FIFO lot replay, open-position metrics and realized
//! gains.

mod performance_model;
mod performance_service;
mod performance_traits;
mod positions_model;
pub mod valuator;

#[cfg(test)]
mod performance_model_tests;
#[cfg(test)]
mod performance_service_tests;

pub use performance_model::{
    AssetPerformance, PnlPercent, PortfolioPerformance, RealizedGain, RealizedGainsReport,
};
pub use performance_service::PerformanceService;
pub use performance_traits::PerformanceServiceTrait;
pub use positions_model::{Lot, PositionState, SaleRecord};
pub use valuator::{replay, value};
