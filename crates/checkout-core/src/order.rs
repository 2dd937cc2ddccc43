//! # Order
//!
//! A checkout session: the running cart of scanned items and its total.
//!
//! ## Incremental Totals
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    scan / remove "Chips"                                │
//! │                                                                         │
//! │  catalog.get("Chips") ──► check sale mode                               │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  old_line = price_for(item, old amount)      (0 if not in cart)         │
//! │  new_line = price_for(item, new amount)      (0 if fully removed)       │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  total += new_line − old_line                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A line is always re-priced from scratch on its current amount. Removing
//! units that were needed for a promotion therefore takes the discount away
//! from the units that remain, instead of just subtracting what was removed.
//!
//! ## Lifetime
//! An `Order` borrows its [`Catalog`]. The catalog must outlive the order and
//! cannot be changed while the order is open, so prices never move under a
//! running total.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::error::{CheckoutError, CheckoutResult, ValidationError};
use crate::item::Item;
use crate::types::{CartAmount, SaleMode};
use crate::validation::{validate_quantity, validate_weight};

/// An open checkout session against a catalog.
///
/// ## Example
/// ```rust
/// use checkout_core::{BogoUnit, Catalog, Item, Order, SaleMode};
///
/// let mut catalog = Catalog::new();
/// catalog.insert(Item::new("Chips", SaleMode::Unit, 3.0)).unwrap();
/// catalog.set_promotion("Chips", BogoUnit::new(2, 1, 100.0)).unwrap();
///
/// let mut order = Order::new(&catalog);
/// for _ in 0..3 {
///     order.scan_unit("Chips").unwrap();
/// }
/// assert_eq!(order.total_price(), 6.0);
///
/// // Two left: the free one is gone
/// order.remove_units("Chips", 1).unwrap();
/// assert_eq!(order.total_price(), 6.0);
/// ```
#[derive(Debug, Clone)]
pub struct Order<'a> {
    id: Uuid,
    opened_at: DateTime<Utc>,
    catalog: &'a Catalog,
    cart: HashMap<String, CartAmount>,
    total_price: f64,
}

impl<'a> Order<'a> {
    /// Opens an empty order against `catalog`.
    pub fn new(catalog: &'a Catalog) -> Self {
        let order = Order {
            id: Uuid::new_v4(),
            opened_at: Utc::now(),
            catalog,
            cart: HashMap::new(),
            total_price: 0.0,
        };
        debug!(order_id = %order.id, "Order opened");
        order
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    /// The running total of the order.
    pub fn total_price(&self) -> f64 {
        self.total_price
    }

    /// Current amount of an item in the order, if it was scanned.
    pub fn amount_of(&self, name: &str) -> Option<CartAmount> {
        self.cart.get(name).copied()
    }

    /// Number of distinct items in the order.
    pub fn line_count(&self) -> usize {
        self.cart.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    // =========================================================================
    // Scanning
    // =========================================================================

    /// Adds one unit of a by-unit item.
    ///
    /// ## Errors
    /// - `ItemNotFound` if the item isn't in the catalog
    /// - `SaleModeMismatch` if the item is sold by weight
    pub fn scan_unit(&mut self, name: &str) -> CheckoutResult<()> {
        self.try_scan_unit(name)
            .inspect_err(|e| debug!(item = name, error = %e, "Scan rejected"))
    }

    /// Adds `weight` of a by-weight item.
    ///
    /// ## Errors
    /// - `Validation` if `weight <= 0`
    /// - `ItemNotFound` if the item isn't in the catalog
    /// - `SaleModeMismatch` if the item is sold by unit
    pub fn scan_weight(&mut self, name: &str, weight: f64) -> CheckoutResult<()> {
        self.try_scan_weight(name, weight)
            .inspect_err(|e| debug!(item = name, weight, error = %e, "Scan rejected"))
    }

    // =========================================================================
    // Removing
    // =========================================================================

    /// Removes `qty` units of a by-unit item.
    ///
    /// Removing at least as many units as are in the order removes the item
    /// entirely.
    ///
    /// ## Errors
    /// - `NotInCart` if the item isn't in the order
    /// - `SaleModeMismatch` if the item is sold by weight
    /// - `Validation` if `qty == 0`
    pub fn remove_units(&mut self, name: &str, qty: u32) -> CheckoutResult<()> {
        self.try_remove_units(name, qty)
            .inspect_err(|e| debug!(item = name, qty, error = %e, "Removal rejected"))
    }

    /// Removes `weight` of a by-weight item.
    ///
    /// Removing at least the weight in the order removes the item entirely.
    ///
    /// ## Errors
    /// - `NotInCart` if the item isn't in the order
    /// - `SaleModeMismatch` if the item is sold by unit
    /// - `Validation` if `weight <= 0`
    pub fn remove_weight(&mut self, name: &str, weight: f64) -> CheckoutResult<()> {
        self.try_remove_weight(name, weight)
            .inspect_err(|e| debug!(item = name, weight, error = %e, "Removal rejected"))
    }

    /// Removes every unit or pound of an item from the order.
    pub fn remove_all(&mut self, name: &str) -> CheckoutResult<()> {
        if !self.cart.contains_key(name) {
            debug!(item = name, "Removal rejected, not in order");
            return Err(CheckoutError::NotInCart(name.to_string()));
        }

        let item = self.item(name)?;
        self.update_line(item, None)
    }

    // =========================================================================
    // Pricing
    // =========================================================================

    /// Price of `amount` of `item`: through its promotion if it has one,
    /// otherwise `amount × (price − markdown)`.
    pub fn price_for(item: &Item, amount: CartAmount) -> f64 {
        item.price_for(amount.as_f64())
    }

    /// Re-prices every line from scratch.
    ///
    /// Always equal (up to float rounding) to [`total_price`](Self::total_price).
    pub fn recomputed_total(&self) -> f64 {
        self.cart
            .iter()
            .filter_map(|(name, amount)| {
                self.catalog
                    .get(name)
                    .map(|item| Self::price_for(item, *amount))
            })
            .sum()
    }

    /// Builds a receipt-style summary of the order, lines sorted by name.
    pub fn summary(&self) -> OrderSummary {
        let mut lines: Vec<LineSummary> = self
            .cart
            .iter()
            .filter_map(|(name, amount)| {
                self.catalog
                    .get(name)
                    .map(|item| LineSummary::new(item, *amount))
            })
            .collect();
        lines.sort_by(|a, b| a.name.cmp(&b.name));

        let regular_total: f64 = lines.iter().map(|l| l.regular_total).sum();

        OrderSummary {
            order_id: self.id,
            opened_at: self.opened_at,
            line_count: lines.len(),
            regular_total,
            savings: regular_total - self.total_price,
            total: self.total_price,
            lines,
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn try_scan_unit(&mut self, name: &str) -> CheckoutResult<()> {
        let item = self.item_sold_by(name, SaleMode::Unit)?;
        let count = self.current_count(name)?.unwrap_or(0);
        let count = count.checked_add(1).ok_or_else(|| ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 0.0,
            max: f64::from(u32::MAX),
        })?;

        self.update_line(item, Some(CartAmount::Count(count)))
    }

    fn try_scan_weight(&mut self, name: &str, weight: f64) -> CheckoutResult<()> {
        validate_weight(weight)?;
        let item = self.item_sold_by(name, SaleMode::Weight)?;
        let current = self.current_weight(name)?.unwrap_or(0.0);
        let new_weight = current + weight;
        validate_weight(new_weight)?;

        self.update_line(item, Some(CartAmount::Weight(new_weight)))
    }

    fn try_remove_units(&mut self, name: &str, qty: u32) -> CheckoutResult<()> {
        if !self.cart.contains_key(name) {
            return Err(CheckoutError::NotInCart(name.to_string()));
        }
        let item = self.item_sold_by(name, SaleMode::Unit)?;
        validate_quantity(qty)?;

        let count = self.current_count(name)?.unwrap_or(0);
        let remaining = if qty >= count {
            None
        } else {
            Some(CartAmount::Count(count - qty))
        };

        self.update_line(item, remaining)
    }

    fn try_remove_weight(&mut self, name: &str, weight: f64) -> CheckoutResult<()> {
        if !self.cart.contains_key(name) {
            return Err(CheckoutError::NotInCart(name.to_string()));
        }
        let item = self.item_sold_by(name, SaleMode::Weight)?;
        validate_weight(weight)?;

        let current = self.current_weight(name)?.unwrap_or(0.0);
        let remaining = if weight >= current {
            None
        } else {
            Some(CartAmount::Weight(current - weight))
        };

        self.update_line(item, remaining)
    }

    fn item(&self, name: &str) -> CheckoutResult<&'a Item> {
        let catalog: &'a Catalog = self.catalog;
        catalog
            .get(name)
            .ok_or_else(|| CheckoutError::ItemNotFound(name.to_string()))
    }

    fn item_sold_by(&self, name: &str, expected: SaleMode) -> CheckoutResult<&'a Item> {
        let item = self.item(name)?;
        if item.sale_mode() != expected {
            return Err(CheckoutError::SaleModeMismatch {
                name: name.to_string(),
                expected,
                actual: item.sale_mode(),
            });
        }
        Ok(item)
    }

    fn current_count(&self, name: &str) -> CheckoutResult<Option<u32>> {
        match self.cart.get(name) {
            None => Ok(None),
            Some(CartAmount::Count(count)) => Ok(Some(*count)),
            Some(CartAmount::Weight(_)) => Err(CheckoutError::AmountKindMismatch {
                name: name.to_string(),
                expected: SaleMode::Unit,
            }),
        }
    }

    fn current_weight(&self, name: &str) -> CheckoutResult<Option<f64>> {
        match self.cart.get(name) {
            None => Ok(None),
            Some(CartAmount::Weight(weight)) => Ok(Some(*weight)),
            Some(CartAmount::Count(_)) => Err(CheckoutError::AmountKindMismatch {
                name: name.to_string(),
                expected: SaleMode::Weight,
            }),
        }
    }

    /// Sets the line for `item` to `amount` (`None` removes it) and moves the
    /// running total by the change in the line's price.
    fn update_line(&mut self, item: &Item, amount: Option<CartAmount>) -> CheckoutResult<()> {
        if let Some(amount) = amount {
            if amount.sale_mode() != item.sale_mode() {
                return Err(CheckoutError::AmountKindMismatch {
                    name: item.name().to_string(),
                    expected: item.sale_mode(),
                });
            }
        }

        let old_line = self
            .cart
            .get(item.name())
            .map_or(0.0, |old| Self::price_for(item, *old));
        let new_line = amount.map_or(0.0, |new| Self::price_for(item, new));
        if !new_line.is_finite() {
            return Err(ValidationError::NotFinite {
                field: "line total".to_string(),
            }
            .into());
        }

        match amount {
            Some(amount) => {
                self.cart.insert(item.name().to_string(), amount);
            }
            None => {
                self.cart.remove(item.name());
            }
        }

        self.total_price += new_line - old_line;
        if self.cart.is_empty() {
            // Sum over no lines; drop accumulated float residue.
            self.total_price = 0.0;
        }

        debug!(
            order_id = %self.id,
            item = item.name(),
            amount = ?amount,
            line_total = new_line,
            order_total = self.total_price,
            "Order line updated"
        );
        Ok(())
    }
}

// =============================================================================
// Summaries
// =============================================================================

/// One priced line of an order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineSummary {
    pub name: String,
    pub amount: CartAmount,
    /// Base price per unit or per lb.
    pub price: f64,
    pub markdown: f64,
    /// Human-readable description of the promotion, if any.
    pub promotion: Option<String>,
    /// `amount × price`, before markdown and promotion.
    pub regular_total: f64,
    /// What is charged for this line.
    pub total: f64,
    pub savings: f64,
}

impl LineSummary {
    fn new(item: &Item, amount: CartAmount) -> Self {
        let regular_total = amount.as_f64() * item.price();
        let total = Order::price_for(item, amount);
        LineSummary {
            name: item.name().to_string(),
            amount,
            price: item.price(),
            markdown: item.markdown(),
            promotion: item.promotion().map(|p| p.to_string()),
            regular_total,
            total,
            savings: regular_total - total,
        }
    }
}

/// Order totals summary for receipts and API responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub order_id: Uuid,
    pub opened_at: DateTime<Utc>,
    pub line_count: usize,
    pub lines: Vec<LineSummary>,
    pub regular_total: f64,
    pub savings: f64,
    pub total: f64,
}

// =============================================================================
// Unit Tests
// =============================================================================
