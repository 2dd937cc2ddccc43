//! # checkout-core: Pure Pricing Logic for the Checkout Engine
//!
//! This crate holds the catalog, promotion rules and order math of a
//! point-of-sale checkout, as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Checkout Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    checkout-cli                                 │   │
//! │  │    price book (TOML) ──► Catalog     scan script ──► Order      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ checkout-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   item    │  │ promotion │  │  catalog  │  │   order   │  │   │
//! │  │   │  Item     │  │ BogoUnit  │  │  Catalog  │  │  Order    │  │   │
//! │  │   │  markdown │  │ BogoWeight│  │           │  │  Summary  │  │   │
//! │  │   │           │  │ NForX     │  │           │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO NETWORK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Sale modes and cart amounts
//! - [`item`] - Sellable items with price, markdown and promotion
//! - [`promotion`] - BOGO and N-for-X pricing rules
//! - [`catalog`] - Items keyed by name
//! - [`order`] - Checkout sessions with incrementally maintained totals
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Promotion math is deterministic - same input = same output
//! 2. **No I/O**: File and network access belong to the binary
//! 3. **Explicit Errors**: Every rejected operation returns a typed error and
//!    leaves state untouched
//!
//! ## Example Usage
//!
//! ```rust
//! use checkout_core::{Catalog, Item, NForX, Order, SaleMode};
//!
//! let mut catalog = Catalog::new();
//! catalog.insert(Item::new("Soda", SaleMode::Unit, 5.5)).unwrap();
//! catalog.set_promotion("Soda", NForX::new(3, 10.0)).unwrap();
//!
//! let mut order = Order::new(&catalog);
//! for _ in 0..4 {
//!     order.scan_unit("Soda").unwrap();
//! }
//!
//! // 3 for $10, plus one at full price
//! assert_eq!(order.total_price(), 15.5);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod item;
pub mod order;
pub mod promotion;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use checkout_core::Catalog` instead of
// `use checkout_core::catalog::Catalog`

pub use catalog::Catalog;
pub use error::{CheckoutError, CheckoutResult, ValidationError};
pub use item::Item;
pub use order::{LineSummary, Order, OrderSummary};
pub use promotion::{BogoUnit, BogoWeight, NForX, Promotion};
pub use types::{CartAmount, SaleMode};
