//! # Item
//!
//! A sellable item: name, sale mode, base price, markdown and an optional
//! promotion.
//!
//! ## Price Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  price ──► − markdown ──► unit_price ──► promotion (if any) ──► total  │
//! │                                                                         │
//! │  $3.00      $0.50           $2.50         buy 2 get 1 free              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use crate::promotion::Promotion;
use crate::types::SaleMode;
use crate::validation::{validate_markdown, validate_price, ValidationResult};

/// An item available for sale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    name: String,
    sale_mode: SaleMode,
    /// Dollars per unit, or per lb for weighed items.
    price: f64,
    /// Dollars taken off `price` before any promotion.
    markdown: f64,
    promotion: Option<Promotion>,
}

impl Item {
    /// Creates an item with no markdown and no promotion.
    ///
    /// A negative price is stored as its absolute value.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::{Item, SaleMode};
    ///
    /// let chips = Item::new("Chips", SaleMode::Unit, -3.0);
    /// assert_eq!(chips.price(), 3.0);
    /// ```
    pub fn new(name: impl Into<String>, sale_mode: SaleMode, price: f64) -> Self {
        Item {
            name: name.into(),
            sale_mode,
            price: price.abs(),
            markdown: 0.0,
            promotion: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sale_mode(&self) -> SaleMode {
        self.sale_mode
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn markdown(&self) -> f64 {
        self.markdown
    }

    pub fn promotion(&self) -> Option<&Promotion> {
        self.promotion.as_ref()
    }

    /// Price after markdown, before promotions.
    ///
    /// Can be negative if the price was lowered below an existing markdown.
    #[inline]
    pub fn unit_price(&self) -> f64 {
        self.price - self.markdown
    }

    /// Sets the base price. Fails without changing anything if `price` is
    /// negative.
    ///
    /// The current markdown is kept as is, even if it now exceeds the price.
    pub fn set_price(&mut self, price: f64) -> ValidationResult<()> {
        validate_price(price)?;
        self.price = price;
        Ok(())
    }

    /// Sets the markdown. Fails if negative or larger than the current price.
    pub fn set_markdown(&mut self, markdown: f64) -> ValidationResult<()> {
        validate_markdown(markdown, self.price)?;
        self.markdown = markdown;
        Ok(())
    }

    /// Replaces the promotion, or clears it with `None`.
    ///
    /// No sale-mode check here; [`Catalog::set_promotion`](crate::Catalog::set_promotion)
    /// enforces that.
    pub fn set_promotion(&mut self, promotion: Option<Promotion>) {
        self.promotion = promotion;
    }

    /// Total price of `amount` of this item.
    ///
    /// Uses the promotion when one is attached, otherwise plain
    /// `amount × unit_price`.
    pub fn price_for(&self, amount: f64) -> f64 {
        match &self.promotion {
            Some(promotion) => promotion.calc_price(amount, self.unit_price()),
            None => amount * self.unit_price(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
