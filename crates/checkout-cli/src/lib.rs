//! # checkout-cli
//!
//! Library half of the `checkout` binary: configuration, price book loading,
//! scan script replay and receipt rendering. `main.rs` only wires these
//! together and sets up logging.
//!
//! ```text
//! CliConfig ──► PriceBook::load ──► build_catalog ──► Order::new
//!                                                        │
//!                      scan script ──► replay ◄──────────┘
//!                                        │
//!                                        ▼
//!                                  write_receipt
//! ```

pub mod config;
pub mod error;
pub mod price_book;
pub mod receipt;
pub mod script;

pub use config::{CliConfig, Invocation, USAGE};
pub use error::{CliError, CliResult};
pub use price_book::{PriceBook, PriceBookEntry, PromotionConfig};
pub use receipt::write_receipt;
pub use script::{replay, Command, ReplayReport};
