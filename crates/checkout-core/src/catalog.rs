//! # Catalog
//!
//! Keyed store of the items a register can sell.
//!
//! ## Responsibilities
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Catalog                                        │
//! │                                                                         │
//! │  insert(item) ──────────► unique by name                                │
//! │  get(name) ─────────────► Option<&Item>       (the only Order access)   │
//! │  set_price(name, p) ────► Item::set_price                               │
//! │  set_markdown(name, m) ─► Item::set_markdown                            │
//! │  set_promotion(name, p) ► sale-mode check, then Item::set_promotion     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use checkout_core::{BogoUnit, Catalog, Item, SaleMode};
//!
//! let mut catalog = Catalog::new();
//! catalog.insert(Item::new("Chips", SaleMode::Unit, 3.0)).unwrap();
//! catalog.set_promotion("Chips", BogoUnit::new(2, 1, 100.0)).unwrap();
//!
//! // Unit promotions cannot go on weighed items
//! catalog.insert(Item::new("Apple", SaleMode::Weight, 1.49)).unwrap();
//! assert!(catalog.set_promotion("Apple", BogoUnit::new(2, 1, 100.0)).is_err());
//! ```

use std::collections::HashMap;

use tracing::debug;

use crate::error::{CheckoutError, CheckoutResult};
use crate::item::Item;
use crate::promotion::Promotion;
use crate::validation::validate_item_name;

/// Items available for sale, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: HashMap<String, Item>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an item. Fails if the name is blank or an item with the same name
    /// already exists.
    pub fn insert(&mut self, item: Item) -> CheckoutResult<()> {
        validate_item_name(item.name())?;

        if self.items.contains_key(item.name()) {
            return Err(CheckoutError::DuplicateItem(item.name().to_string()));
        }

        debug!(
            item = item.name(),
            sale_mode = %item.sale_mode(),
            price = item.price(),
            "Item added to catalog"
        );
        self.items.insert(item.name().to_string(), item);
        Ok(())
    }

    /// Looks up an item by name.
    pub fn get(&self, name: &str) -> Option<&Item> {
        self.items.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over all items in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    /// Sets an item's base price.
    pub fn set_price(&mut self, name: &str, price: f64) -> CheckoutResult<()> {
        self.get_mut(name)?.set_price(price)?;
        Ok(())
    }

    /// Sets an item's markdown.
    pub fn set_markdown(&mut self, name: &str, markdown: f64) -> CheckoutResult<()> {
        self.get_mut(name)?.set_markdown(markdown)?;
        Ok(())
    }

    /// Attaches a promotion, replacing any existing one.
    ///
    /// ## Errors
    /// - `ItemNotFound` if the item isn't in the catalog
    /// - `SaleModeMismatch` if the promotion is for the other sale mode
    pub fn set_promotion(
        &mut self,
        name: &str,
        promotion: impl Into<Promotion>,
    ) -> CheckoutResult<()> {
        let promotion = promotion.into();
        let item = self.get_mut(name)?;

        if promotion.sale_mode() != item.sale_mode() {
            return Err(CheckoutError::SaleModeMismatch {
                name: name.to_string(),
                expected: promotion.sale_mode(),
                actual: item.sale_mode(),
            });
        }

        debug!(item = name, promotion = %promotion, "Promotion attached");
        item.set_promotion(Some(promotion));
        Ok(())
    }

    /// Removes an item's promotion, if it has one.
    pub fn clear_promotion(&mut self, name: &str) -> CheckoutResult<()> {
        self.get_mut(name)?.set_promotion(None);
        Ok(())
    }

    fn get_mut(&mut self, name: &str) -> CheckoutResult<&mut Item> {
        self.items
            .get_mut(name)
            .ok_or_else(|| CheckoutError::ItemNotFound(name.to_string()))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
