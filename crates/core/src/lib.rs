//! Folio Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic for the Folio portfolio tracker:
//! users, assets, transactions, price lookup and the portfolio valuator.
//! It is database-agnostic and defines repository traits that are
//! implemented by the `storage-sqlite` crate.

pub mod assets;
pub mod constants;
pub mod errors;
pub mod portfolio;
pub mod quotes;
pub mod transactions;
pub mod users;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
