//! Command handlers. Each one calls into the core services and prints its
//! result through [`crate::output::Output`].

pub mod asset;
pub mod portfolio;
pub mod tx;
pub mod user;
