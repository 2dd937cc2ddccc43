//! # Domain Types
//!
//! Small value types shared by the catalog, promotions and orders.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐            ┌──────────────────────────┐           │
//! │  │    SaleMode     │  decides   │       CartAmount         │           │
//! │  │  ─────────────  │ ─────────► │  ──────────────────────  │           │
//! │  │  Unit           │            │  Count(u32)   (Unit)     │           │
//! │  │  Weight         │            │  Weight(f64)  (Weight)   │           │
//! │  └─────────────────┘            └──────────────────────────┘           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Sale Mode
// =============================================================================

/// How an item is sold: per discrete unit or per unit of weight ($/lb).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaleMode {
    /// Sold in whole units (a bag of chips).
    Unit,
    /// Sold by weight (apples by the pound).
    Weight,
}

impl fmt::Display for SaleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaleMode::Unit => write!(f, "unit"),
            SaleMode::Weight => write!(f, "weight"),
        }
    }
}

// =============================================================================
// Cart Amount
// =============================================================================

/// The accumulated amount of one item in an order.
///
/// The variant always matches the item's [`SaleMode`]; orders check this on
/// every mutation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CartAmount {
    /// Number of units scanned.
    Count(u32),
    /// Total weight scanned.
    Weight(f64),
}

impl CartAmount {
    /// The sale mode this amount belongs to.
    pub fn sale_mode(&self) -> SaleMode {
        match self {
            CartAmount::Count(_) => SaleMode::Unit,
            CartAmount::Weight(_) => SaleMode::Weight,
        }
    }

    /// The amount as a float, for price math.
    pub fn as_f64(&self) -> f64 {
        match *self {
            CartAmount::Count(count) => f64::from(count),
            CartAmount::Weight(weight) => weight,
        }
    }
}

impl fmt::Display for CartAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CartAmount::Count(count) => write!(f, "{count}"),
            CartAmount::Weight(weight) => write!(f, "{weight:.2} lb"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_amount_sale_mode() {
        assert_eq!(CartAmount::Count(3).sale_mode(), SaleMode::Unit);
        assert_eq!(CartAmount::Weight(0.5).sale_mode(), SaleMode::Weight);
    }

    #[test]
    fn test_cart_amount_display() {
        assert_eq!(CartAmount::Count(3).to_string(), "3");
        assert_eq!(CartAmount::Weight(1.25).to_string(), "1.25 lb");
    }

    #[test]
    fn test_sale_mode_serde_names() {
        let json = serde_json::to_string(&SaleMode::Weight).unwrap();
        assert_eq!(json, "\"weight\"");
    }
}
