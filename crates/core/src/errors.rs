//! Errors raised by the Folio services.
//!
//! Nothing here knows about SQLite. The storage crate maps its own failures
//! onto [`DatabaseError`] before they reach a service.

use chrono::ParseError as ChronoParseError;
use folio_market_data::MarketDataError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Every service operation fails with one of these. Front ends map the
/// variant to a status code or exit message.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Market data operation failed: {0}")]
    MarketData(#[from] MarketDataError),

    #[error("Portfolio calculation failed: {0}")]
    Calculation(#[from] CalculatorError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Storage failures, carried as text.
///
/// Unique and foreign-key violations keep their own variants so callers can
/// report a conflict instead of a server fault.
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    #[error("Database query failed: {0}")]
    QueryFailed(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    /// Duplicate username, email or per-user symbol.
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// A row points at a missing user or asset.
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Unreadable stored data, or a writer task that stopped.
    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Failures while replaying or valuing a position.
#[derive(Error, Debug)]
pub enum CalculatorError {
    /// A figure left the range of a 96-bit decimal.
    #[error("Arithmetic overflow computing {0}")]
    Overflow(String),
}

/// Rejected user input.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Invalid numeric value for '{field}': {value}")]
    InvalidNumber { field: String, value: String },

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),

    #[error("Failed to parse date/time: {0}")]
    DateTimeParse(#[from] ChronoParseError),
}

impl Error {
    /// Shorthand for an [`ValidationError::InvalidInput`] wrapped in [`Error`].
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Error::Validation(ValidationError::InvalidInput(message.into()))
    }
}

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<ChronoParseError> for Error {
    fn from(err: ChronoParseError) -> Self {
        Error::Validation(ValidationError::DateTimeParse(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Validation(ValidationError::InvalidInput(err.to_string()))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
