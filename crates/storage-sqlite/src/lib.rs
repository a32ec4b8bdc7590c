//! SQLite storage implementation for Folio.
//!
//! This crate is the only place in the workspace where Diesel lives. It
//! implements the repository traits defined in `folio-core` and contains:
//! - Database connection pooling and the single-writer actor
//! - Embedded Diesel migrations
//! - Repository implementations for users, assets and transactions
//! - Database-specific model types (with Diesel derives)
//!
//! ```text
//!     core (domain, valuation)
//!              │
//!              ▼
//!     storage-sqlite (this crate)
//!              │
//!              ▼
//!          SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;
mod utils;

// Repository implementations
pub mod assets;
pub mod transactions;
pub mod users;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, get_db_path, init, open, run_migrations, spawn_writer,
    DbConnection, DbPool, WriteHandle, DEFAULT_DB_PATH,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use assets::AssetRepository;
pub use transactions::TransactionRepository;
pub use users::UserRepository;

// Re-export from folio-core for convenience
pub use folio_core::errors::{DatabaseError, Error, Result};
