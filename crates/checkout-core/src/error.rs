//! # Error Types
//!
//! Domain-specific error types for checkout-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  checkout-core errors (this file)                                      │
//! │  ├── CheckoutError    - Catalog and order failures                     │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  checkout-cli errors (separate crate)                                  │
//! │  └── CliError         - File, parse and script failures                │
//! │                                                                         │
//! │  Flow: ValidationError → CheckoutError → CliError → stderr             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (item name, amounts)
//! 3. Errors are enum variants, never String
//! 4. A returned error always means nothing was mutated

use thiserror::Error;

use crate::types::SaleMode;

// =============================================================================
// Checkout Error
// =============================================================================

/// Catalog and order errors.
///
/// Every variant is an ordinary validation outcome, not a fault. Callers are
/// expected to surface them to the cashier and carry on.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CheckoutError {
    /// Item name is not in the catalog.
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// An item with this name is already in the catalog.
    #[error("Item '{0}' already exists")]
    DuplicateItem(String),

    /// The operation targets a different sale mode than the item is sold by.
    ///
    /// ## When This Occurs
    /// - Scanning a by-weight item as a unit (or the reverse)
    /// - Attaching a unit promotion to a by-weight item (or the reverse)
    #[error("{name} is sold by {actual}, not by {expected}")]
    SaleModeMismatch {
        name: String,
        expected: SaleMode,
        actual: SaleMode,
    },

    /// Item has never been scanned into this order (or was fully removed).
    #[error("{0} is not in the order")]
    NotInCart(String),

    /// The stored cart amount does not match the item's sale mode.
    ///
    /// Only reachable if the cart was corrupted; reported instead of panicking.
    #[error("Cart amount for {name} is not a {expected} amount")]
    AmountKindMismatch { name: String, expected: SaleMode },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used for early validation before any state is touched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be strictly greater than zero.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} cannot be negative (got {value})")]
    Negative { field: String, value: f64 },

    /// Value is NaN or infinite.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },

    /// Markdown is larger than the price it is taken off.
    #[error("markdown {markdown} exceeds price {price}")]
    MarkdownExceedsPrice { markdown: f64, price: f64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CheckoutError.
pub type CheckoutResult<T> = Result<T, CheckoutError>;

// =============================================================================
// Unit Tests
// =============================================================================
