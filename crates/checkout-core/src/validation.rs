//! # Validation Module
//!
//! Input validation for prices, markdowns, weights and quantities.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: checkout-cli                                                 │
//! │  └── Script/price book parsing (numbers, names)                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── Business rules (non-negative price, markdown <= price, ...)       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Catalog / Order                                              │
//! │  └── Existence and sale-mode checks                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use checkout_core::validation::{validate_price, validate_weight};
//!
//! assert!(validate_price(2.99).is_ok());
//! assert!(validate_weight(0.0).is_err());
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an item name.
///
/// ## Rules
/// - Must not be empty or whitespace only
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price.
///
/// ## Rules
/// - Must be a finite number
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
///
/// ## Example
/// ```rust
/// use checkout_core::validation::validate_price;
///
/// assert!(validate_price(10.99).is_ok());
/// assert!(validate_price(0.0).is_ok());
/// assert!(validate_price(-1.0).is_err());
/// ```
pub fn validate_price(price: f64) -> ValidationResult<()> {
    ensure_finite("price", price)?;

    if price < 0.0 {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
            value: price,
        });
    }

    Ok(())
}

/// Validates a markdown against the price it will be taken off.
///
/// ## Rules
/// - Must be non-negative
/// - Must not exceed `price` (a markdown equal to the price is allowed)
pub fn validate_markdown(markdown: f64, price: f64) -> ValidationResult<()> {
    ensure_finite("markdown", markdown)?;

    if markdown < 0.0 {
        return Err(ValidationError::Negative {
            field: "markdown".to_string(),
            value: markdown,
        });
    }

    if markdown > price {
        return Err(ValidationError::MarkdownExceedsPrice { markdown, price });
    }

    Ok(())
}

/// Validates a scanned or removed weight.
///
/// ## Rules
/// - Must be a finite number
/// - Must be positive (> 0)
pub fn validate_weight(weight: f64) -> ValidationResult<()> {
    ensure_finite("weight", weight)?;

    if weight <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "weight".to_string(),
        });
    }

    Ok(())
}

/// Validates a quantity of units to remove.
///
/// ## Rules
/// - Must be positive (> 0)
pub fn validate_quantity(qty: u32) -> ValidationResult<()> {
    if qty == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a promotion percent-off.
///
/// ## Rules
/// - Must be within [0, 100]
///
/// Promotion constructors use this to decide whether to fall back to 0%.
pub fn validate_percent_off(percent: f64) -> ValidationResult<()> {
    if !(0.0..=100.0).contains(&percent) {
        return Err(ValidationError::OutOfRange {
            field: "percent_off".to_string(),
            min: 0.0,
            max: 100.0,
        });
    }

    Ok(())
}

fn ensure_finite(field: &str, value: f64) -> ValidationResult<()> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
