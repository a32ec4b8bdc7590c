//! Error types for the market data crate.

use thiserror::Error;

/// Errors that can occur while fetching quotes.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The requested symbol was not found by the provider.
    /// Retrying the same provider won't help.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// A provider-specific error occurred.
    /// Callers should try the next provider in their list.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The provider returned data that failed validation checks.
    #[error("Validation failed: {message}")]
    ValidationFailed {
        /// Description of the validation failure
        message: String,
    },

    /// A provider could not be built from its configuration.
    #[error("Invalid provider configuration: {0}")]
    InvalidConfiguration(String),

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MarketDataError {
    /// Returns true when the symbol itself is unknown, as opposed to a
    /// transient or provider-side failure.
    pub fn is_symbol_not_found(&self) -> bool {
        matches!(self, MarketDataError::SymbolNotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MarketDataError::SymbolNotFound("ZZZZ".to_string());
        assert_eq!(err.to_string(), "Symbol not found: ZZZZ");

        let err = MarketDataError::ProviderError {
            provider: "YAHOO".to_string(),
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "Provider error: YAHOO - boom");
    }

    #[test]
    fn test_is_symbol_not_found() {
        assert!(MarketDataError::SymbolNotFound("X".to_string()).is_symbol_not_found());
        assert!(!MarketDataError::Timeout {
            provider: "YAHOO".to_string()
        }
        .is_symbol_not_found());
    }
}
