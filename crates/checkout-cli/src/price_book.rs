//! # Price Book
//!
//! A TOML file describing the catalog a checkout lane starts with.
//!
//! ## File Format
//! ```toml
//! [[item]]
//! name = "Soda"
//! sale_mode = "unit"
//! price = 4.99
//! promotion = { kind = "n_for_x", needed = 3, group_price = 12.0, limit = 3 }
//!
//! [[item]]
//! name = "Turkey"
//! sale_mode = "weight"
//! price = 9.49
//! markdown = 1.49
//! promotion = { kind = "bogo_weight", needed = 1.0, receive = 1.0, percent_off = 50.0, limit = 4.0 }
//! ```
//!
//! Entries go through the same [`Catalog`] operations a cashier would use, so
//! a price book can never build a catalog the API would refuse.

use std::path::Path;

use checkout_core::{BogoUnit, BogoWeight, Catalog, Item, NForX, Promotion, SaleMode};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{CliError, CliResult};

/// Parsed price book file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PriceBook {
    #[serde(rename = "item", default)]
    pub items: Vec<PriceBookEntry>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PriceBookEntry {
    pub name: String,
    pub sale_mode: SaleMode,
    pub price: f64,
    #[serde(default)]
    pub markdown: Option<f64>,
    #[serde(default)]
    pub promotion: Option<PromotionConfig>,
}

/// Promotion as written in a price book. A missing `limit` means unlimited.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PromotionConfig {
    BogoUnit {
        needed: u32,
        receive: u32,
        percent_off: f64,
        #[serde(default)]
        limit: u32,
    },
    BogoWeight {
        needed: f64,
        receive: f64,
        percent_off: f64,
        #[serde(default)]
        limit: f64,
    },
    NForX {
        needed: u32,
        group_price: f64,
        #[serde(default)]
        limit: u32,
    },
}

impl From<PromotionConfig> for Promotion {
    fn from(config: PromotionConfig) -> Self {
        match config {
            PromotionConfig::BogoUnit {
                needed,
                receive,
                percent_off,
                limit,
            } => BogoUnit::new(needed, receive, percent_off)
                .with_limit(limit)
                .into(),
            PromotionConfig::BogoWeight {
                needed,
                receive,
                percent_off,
                limit,
            } => BogoWeight::new(needed, receive, percent_off)
                .with_limit(limit)
                .into(),
            PromotionConfig::NForX {
                needed,
                group_price,
                limit,
            } => NForX::new(needed, group_price).with_limit(limit).into(),
        }
    }
}

impl PriceBook {
    /// Reads and parses a price book file.
    pub fn load(path: &Path) -> CliResult<Self> {
        debug!(path = %path.display(), "Loading price book");

        let contents = std::fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&contents)
    }

    /// Parses price book TOML.
    pub fn parse(contents: &str) -> CliResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Builds a catalog from the entries. The first rejected entry aborts.
    pub fn build_catalog(&self) -> CliResult<Catalog> {
        let mut catalog = Catalog::new();

        for entry in &self.items {
            entry
                .apply(&mut catalog)
                .map_err(|source| CliError::PriceBookEntry {
                    name: entry.name.clone(),
                    source,
                })?;
        }

        info!(items = catalog.len(), "Catalog built from price book");
        Ok(catalog)
    }
}

impl PriceBookEntry {
    fn apply(&self, catalog: &mut Catalog) -> checkout_core::CheckoutResult<()> {
        catalog.insert(Item::new(self.name.clone(), self.sale_mode, self.price))?;
        // Item::new takes the absolute price; the setter rejects negatives.
        catalog.set_price(&self.name, self.price)?;

        if let Some(markdown) = self.markdown {
            catalog.set_markdown(&self.name, markdown)?;
        }

        if let Some(promotion) = &self.promotion {
            catalog.set_promotion(&self.name, Promotion::from(promotion.clone()))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkout_core::CheckoutError;

    const BOOK: &str = r#"
        [[item]]
        name = "Soda"
        sale_mode = "unit"
        price = 4.99
        promotion = { kind = "n_for_x", needed = 3, group_price = 12.0, limit = 3 }

        [[item]]
        name = "Bread"
        sale_mode = "unit"
        price = 2.99
        markdown = 0.49

        [[item]]
        name = "Turkey"
        sale_mode = "weight"
        price = 9.49
        markdown = 1.49
        promotion = { kind = "bogo_weight", needed = 1.0, receive = 1.0, percent_off = 50.0, limit = 4.0 }

        [[item]]
        name = "Cereal"
        sale_mode = "unit"
        price = 2.50
        promotion = { kind = "bogo_unit", needed = 1, receive = 1, percent_off = 100.0 }
    "#;

    #[test]
    fn test_parse_price_book() {
        let book = PriceBook::parse(BOOK).unwrap();
        assert_eq!(book.items.len(), 4);
        assert_eq!(book.items[1].markdown, Some(0.49));
        assert_eq!(
            book.items[3].promotion,
            Some(PromotionConfig::BogoUnit {
                needed: 1,
                receive: 1,
                percent_off: 100.0,
                limit: 0,
            })
        );
    }

    #[test]
    fn test_build_catalog() {
        let catalog = PriceBook::parse(BOOK).unwrap().build_catalog().unwrap();
        assert_eq!(catalog.len(), 4);

        let soda = catalog.get("Soda").unwrap();
        assert_eq!(
            soda.promotion(),
            Some(&Promotion::from(NForX::new(3, 12.0).with_limit(3)))
        );

        let turkey = catalog.get("Turkey").unwrap();
        assert_eq!(turkey.sale_mode(), SaleMode::Weight);
        assert!((turkey.unit_price() - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_book() {
        let catalog = PriceBook::parse("").unwrap().build_catalog().unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_malformed_book() {
        let result = PriceBook::parse(
            r#"
            [[item]]
            name = "Soda"
            sale_mode = "by_the_crate"
            price = 4.99
            "#,
        );
        assert!(matches!(result, Err(CliError::PriceBookFormat(_))));
    }

    #[test]
    fn test_rejected_entries() {
        let duplicate = r#"
            [[item]]
            name = "Soda"
            sale_mode = "unit"
            price = 4.99

            [[item]]
            name = "Soda"
            sale_mode = "unit"
            price = 1.00
        "#;
        let err = PriceBook::parse(duplicate).unwrap().build_catalog().unwrap_err();
        assert!(matches!(
            err,
            CliError::PriceBookEntry {
                ref name,
                source: CheckoutError::DuplicateItem(_),
            } if name == "Soda"
        ));

        let wrong_mode = r#"
            [[item]]
            name = "Steak"
            sale_mode = "weight"
            price = 12.99
            promotion = { kind = "n_for_x", needed = 2, group_price = 20.0 }
        "#;
        let err = PriceBook::parse(wrong_mode).unwrap().build_catalog().unwrap_err();
        assert!(matches!(
            err,
            CliError::PriceBookEntry {
                source: CheckoutError::SaleModeMismatch { .. },
                ..
            }
        ));

        let big_markdown = r#"
            [[item]]
            name = "Eggs"
            sale_mode = "unit"
            price = 1.29
            markdown = 2.00
        "#;
        assert!(PriceBook::parse(big_markdown)
            .unwrap()
            .build_catalog()
            .is_err());

        let negative_price = r#"
            [[item]]
            name = "Eggs"
            sale_mode = "unit"
            price = -1.29
        "#;
        assert!(PriceBook::parse(negative_price)
            .unwrap()
            .build_catalog()
            .is_err());
    }
}
