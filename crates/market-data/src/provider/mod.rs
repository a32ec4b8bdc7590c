//! Market data provider abstractions and implementations.
//!
//! This module contains:
//! - The `MarketDataProvider` trait that all providers implement
//! - A manual provider backed by a fixed price table
//! - The Yahoo Finance provider

mod traits;

pub mod manual;
pub mod yahoo;

pub use traits::MarketDataProvider;
