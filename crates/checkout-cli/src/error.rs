//! # CLI Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  io::Error / toml::de::Error / CheckoutError                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CliError (this module) ← Adds file, item and line context             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  main() prints it and exits non-zero                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rejected scan-script lines are not errors here: they are reported and the
//! script carries on, like a cashier re-scanning.

use std::path::PathBuf;

use checkout_core::CheckoutError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid command line or environment configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failed to read an input file.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read or write the terminal.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Price book is not valid TOML or has the wrong shape.
    #[error("Invalid price book: {0}")]
    PriceBookFormat(#[from] toml::de::Error),

    /// A price book entry was rejected by the catalog.
    #[error("Price book entry '{name}' rejected: {source}")]
    PriceBookEntry {
        name: String,
        #[source]
        source: CheckoutError,
    },

    /// A scan script line could not be parsed.
    #[error("Line {line}: {reason}")]
    Script { line: usize, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CliError::Script {
            line: 4,
            reason: "unknown command 'scna'".to_string(),
        };
        assert_eq!(err.to_string(), "Line 4: unknown command 'scna'");

        let err = CliError::PriceBookEntry {
            name: "Chips".to_string(),
            source: CheckoutError::DuplicateItem("Chips".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Price book entry 'Chips' rejected: Item 'Chips' already exists"
        );
    }
}
