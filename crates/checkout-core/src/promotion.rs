//! # Promotion Module
//!
//! Promotional pricing rules ("specials") that can be attached to an item.
//!
//! ## Rule Families
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Promotion                                       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    BogoUnit     │   │   BogoWeight    │   │      NForX      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  needed (u32)   │   │  needed (lb)    │   │  needed (u32)   │       │
//! │  │  receive (u32)  │   │  receive (lb)   │   │  group_price    │       │
//! │  │  percent_off    │   │  percent_off    │   │  limit (u32)    │       │
//! │  │  limit (u32)    │   │  limit (lb)     │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │      SaleMode::Unit       SaleMode::Weight       SaleMode::Unit         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Limits
//! A non-zero `limit` caps how much of the order takes part in the promotion.
//! Everything past the limit is charged at the full unit price and never enters
//! the promotion math.
//!
//! ```text
//! amount = 6, limit = 3, buy 2 get 1 free
//!
//!   [ 1 ][ 2 ][ 3 ] │ [ 4 ][ 5 ][ 6 ]
//!   └─ promotion ─┘ │ └─ full price ─┘
//!     pay 2, 1 free │   pay 3
//! ```
//!
//! ## Example
//! ```rust
//! use checkout_core::promotion::{BogoUnit, Promotion};
//!
//! // Buy 2, get 1 free
//! let promo = Promotion::from(BogoUnit::new(2, 1, 100.0));
//! assert_eq!(promo.calc_price(3.0, 1.5), 3.0);
//! ```

use serde::Serialize;
use std::fmt;
use tracing::warn;

use crate::types::SaleMode;
use crate::validation::validate_percent_off;

// =============================================================================
// Promotion
// =============================================================================

/// A promotion attached to an item.
///
/// Promotions are immutable once built; `calc_price` is a pure function of the
/// configuration and its arguments.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Promotion {
    /// Buy N units, get M units at a percentage off.
    BogoUnit(BogoUnit),
    /// Buy N lb, get M lb at a percentage off.
    BogoWeight(BogoWeight),
    /// N units for a fixed group price.
    NForX(NForX),
}

impl Promotion {
    /// The sale mode of items this promotion can be attached to.
    pub fn sale_mode(&self) -> SaleMode {
        match self {
            Promotion::BogoUnit(_) | Promotion::NForX(_) => SaleMode::Unit,
            Promotion::BogoWeight(_) => SaleMode::Weight,
        }
    }

    /// Returns the total price of `amount` items at `unit_price` after the
    /// promotion is applied.
    ///
    /// A negative `amount` is replaced by its absolute value; `unit_price` is
    /// used as given. Unit promotions only count whole units of `amount`.
    pub fn calc_price(&self, amount: f64, unit_price: f64) -> f64 {
        match self {
            Promotion::BogoUnit(rule) => rule.calc_price(whole_units(amount), unit_price),
            Promotion::BogoWeight(rule) => rule.calc_price(amount, unit_price),
            Promotion::NForX(rule) => rule.calc_price(whole_units(amount), unit_price),
        }
    }
}

impl From<BogoUnit> for Promotion {
    fn from(rule: BogoUnit) -> Self {
        Promotion::BogoUnit(rule)
    }
}

impl From<BogoWeight> for Promotion {
    fn from(rule: BogoWeight) -> Self {
        Promotion::BogoWeight(rule)
    }
}

impl From<NForX> for Promotion {
    fn from(rule: NForX) -> Self {
        Promotion::NForX(rule)
    }
}

impl fmt::Display for Promotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Promotion::BogoUnit(rule) => {
                write!(
                    f,
                    "buy {} get {} {}% off",
                    rule.needed, rule.receive, rule.percent_off
                )?;
                if rule.limit > 0 {
                    write!(f, ", limit {}", rule.limit)?;
                }
                Ok(())
            }
            Promotion::BogoWeight(rule) => {
                write!(
                    f,
                    "buy {} lb get {} lb {}% off",
                    rule.needed, rule.receive, rule.percent_off
                )?;
                if rule.limit > 0.0 {
                    write!(f, ", limit {} lb", rule.limit)?;
                }
                Ok(())
            }
            Promotion::NForX(rule) => {
                write!(f, "{} for ${:.2}", rule.needed, rule.group_price)?;
                if rule.limit > 0 {
                    write!(f, ", limit {}", rule.limit)?;
                }
                Ok(())
            }
        }
    }
}

// =============================================================================
// BOGO by Unit
// =============================================================================

/// Buy `needed` units, get `receive` units `percent_off` percent off.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BogoUnit {
    needed: u32,
    receive: u32,
    percent_off: f64,
    limit: u32,
}

impl BogoUnit {
    /// Creates an unlimited rule.
    ///
    /// A `percent_off` outside [0, 100] is replaced by 0 (no discount).
    pub fn new(needed: u32, receive: u32, percent_off: f64) -> Self {
        BogoUnit {
            needed,
            receive,
            percent_off: checked_percent(percent_off),
            limit: 0,
        }
    }

    /// Caps the number of units the promotion applies to. 0 means unlimited.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn needed(&self) -> u32 {
        self.needed
    }

    pub fn receive(&self) -> u32 {
        self.receive
    }

    pub fn percent_off(&self) -> f64 {
        self.percent_off
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Total price of `count` units.
    pub fn calc_price(&self, count: u64, unit_price: f64) -> f64 {
        let price = unit_price;
        let (count, excess) = carve_off_units(count, u64::from(self.limit));
        let group = u64::from(self.needed) + u64::from(self.receive);
        if group == 0 {
            return (count + excess) as f64 * price;
        }

        let applied = count / group;
        let remainder = count % group;
        let group_total = f64::from(self.needed) * price
            + f64::from(self.receive) * price * discount_factor(self.percent_off);

        applied as f64 * group_total + (remainder + excess) as f64 * price
    }
}

// =============================================================================
// BOGO by Weight
// =============================================================================

/// Buy `needed` lb, get up to `receive` lb `percent_off` percent off.
///
/// The last group is pro-rated: when less than `receive` is left after
/// covering `needed`, the discount applies to exactly what is left.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BogoWeight {
    needed: f64,
    receive: f64,
    percent_off: f64,
    limit: f64,
}

impl BogoWeight {
    /// Creates an unlimited rule.
    ///
    /// Negative weights are replaced by their absolute value. A `percent_off`
    /// outside [0, 100] is replaced by 0.
    pub fn new(needed: f64, receive: f64, percent_off: f64) -> Self {
        BogoWeight {
            needed: needed.abs(),
            receive: receive.abs(),
            percent_off: checked_percent(percent_off),
            limit: 0.0,
        }
    }

    /// Caps the weight the promotion applies to. 0 means unlimited.
    pub fn with_limit(mut self, limit: f64) -> Self {
        self.limit = limit.abs();
        self
    }

    pub fn needed(&self) -> f64 {
        self.needed
    }

    pub fn receive(&self) -> f64 {
        self.receive
    }

    pub fn percent_off(&self) -> f64 {
        self.percent_off
    }

    pub fn limit(&self) -> f64 {
        self.limit
    }

    /// Total price of `weight` at `unit_price` per lb.
    ///
    /// Whole groups are counted in one step, so the cost does not depend on
    /// how large `weight` is.
    pub fn calc_price(&self, weight: f64, unit_price: f64) -> f64 {
        let price = unit_price;
        let weight = weight.abs();
        let (remaining, excess) = carve_off_weight(weight, self.limit);

        let group = self.needed + self.receive;
        // Nothing would ever be consumed per group.
        if group <= 0.0 {
            return weight * price;
        }

        let discounted_price = price * discount_factor(self.percent_off);
        let group_total = self.needed * price + self.receive * discounted_price;

        let full_groups = (remaining / group).floor();
        let rest = (remaining - full_groups * group).max(0.0);

        // Last, partial group: pro-rated discount once `needed` is covered.
        let partial = if rest > self.needed {
            let discount_weight = (rest - self.needed).min(self.receive);
            self.needed * price
                + discount_weight * discounted_price
                + (rest - self.needed - discount_weight) * price
        } else {
            rest * price
        };

        full_groups * group_total + partial + excess * price
    }
}

// =============================================================================
// N for X
// =============================================================================

/// `needed` units for `group_price` total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NForX {
    needed: u32,
    group_price: f64,
    limit: u32,
}

impl NForX {
    /// Creates an unlimited rule. A negative `group_price` is replaced by its
    /// absolute value.
    pub fn new(needed: u32, group_price: f64) -> Self {
        NForX {
            needed,
            group_price: group_price.abs(),
            limit: 0,
        }
    }

    /// Caps the number of units the promotion applies to. 0 means unlimited.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn needed(&self) -> u32 {
        self.needed
    }

    pub fn group_price(&self) -> f64 {
        self.group_price
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Total price of `count` units.
    pub fn calc_price(&self, count: u64, unit_price: f64) -> f64 {
        let price = unit_price;
        let (count, excess) = carve_off_units(count, u64::from(self.limit));
        let needed = u64::from(self.needed);
        if needed == 0 {
            return (count + excess) as f64 * price;
        }

        let applied = count / needed;
        let remainder = count % needed;

        applied as f64 * self.group_price + (remainder + excess) as f64 * price
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn checked_percent(percent_off: f64) -> f64 {
    match validate_percent_off(percent_off) {
        Ok(()) => percent_off,
        Err(e) => {
            warn!(percent_off, "{}. Using 0% off", e);
            0.0
        }
    }
}

fn discount_factor(percent_off: f64) -> f64 {
    1.0 - percent_off / 100.0
}

fn whole_units(amount: f64) -> u64 {
    amount.abs().trunc() as u64
}

/// Splits `amount` into (promotion-eligible, full-price excess).
fn carve_off_units(amount: u64, limit: u64) -> (u64, u64) {
    if limit > 0 && amount > limit {
        (limit, amount - limit)
    } else {
        (amount, 0)
    }
}

fn carve_off_weight(weight: f64, limit: f64) -> (f64, f64) {
    if limit > 0.0 && weight > limit {
        (limit, weight - limit)
    } else {
        (weight, 0.0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(expected: f64, actual: f64) {
        assert!(
            (expected - actual).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_sale_mode_per_family() {
        assert_eq!(Promotion::from(BogoUnit::new(1, 1, 50.0)).sale_mode(), SaleMode::Unit);
        assert_eq!(Promotion::from(NForX::new(3, 10.0)).sale_mode(), SaleMode::Unit);
        assert_eq!(
            Promotion::from(BogoWeight::new(1.0, 1.0, 50.0)).sale_mode(),
            SaleMode::Weight
        );
    }

    #[test]
    fn test_invalid_percent_falls_back_to_zero() {
        assert_eq!(BogoUnit::new(2, 1, 101.0).percent_off(), 0.0);
        assert_eq!(BogoUnit::new(2, 1, -10.0).percent_off(), 0.0);
        assert_eq!(BogoWeight::new(1.0, 1.0, 150.0).percent_off(), 0.0);

        // No discount at all
        assert_close(3.0, BogoUnit::new(2, 1, 101.0).calc_price(3, 1.0));
    }

    #[test]
    fn test_negative_unit_price_is_kept() {
        assert_close(-2.0 * 1.5, BogoUnit::new(2, 1, 100.0).calc_price(3, -1.5));
        assert_close(-3.0, Promotion::from(BogoUnit::new(5, 1, 100.0)).calc_price(3.0, -1.0));
        assert_close(
            -(2.0 - 0.5) * 1.5,
            BogoWeight::new(1.5, 0.5, 100.0).calc_price(2.0, -1.5),
        );
        assert_close(10.0 - 1.0, NForX::new(3, 10.0).calc_price(4, -1.0));
    }

    #[test]
    fn test_negative_amount_uses_absolute_value() {
        assert_close(
            2.0 * 1.5,
            Promotion::from(BogoUnit::new(2, 1, 100.0)).calc_price(-3.0, 1.5),
        );
        assert_close(
            Promotion::from(BogoWeight::new(1.5, 0.5, 100.0)).calc_price(2.0, 1.5),
            Promotion::from(BogoWeight::new(1.5, 0.5, 100.0)).calc_price(-2.0, 1.5),
        );
    }

    #[test]
    fn test_bogo_unit_free() {
        let rule = BogoUnit::new(2, 1, 100.0);
        // Not enough for the special
        assert_close(3.0, rule.calc_price(2, 1.5));
        // Exactly one group
        assert_close(3.0, rule.calc_price(3, 1.5));
        // One group plus an extra
        assert_close(4.5, rule.calc_price(4, 1.5));
        // Two groups plus an extra
        assert_close(7.5, rule.calc_price(7, 1.5));
    }

    #[test]
    fn test_bogo_unit_percent_off() {
        let rule = BogoUnit::new(2, 1, 25.0);
        assert_close(2.0 * 1.5 + 1.5 * 0.75, rule.calc_price(3, 1.5));
        assert_close(3.0 * 1.5 + 1.5 * 0.75, rule.calc_price(4, 1.5));
    }

    #[test]
    fn test_bogo_unit_limits() {
        let rule = |limit| BogoUnit::new(2, 1, 100.0).with_limit(limit);

        // Limit smaller than a group: nothing qualifies
        assert_close(2.0 * 1.5, rule(1).calc_price(2, 1.5));
        // Limit not reached
        assert_close(1.5, rule(6).calc_price(1, 1.5));
        // Limit equal to amount: two free units
        assert_close(4.0 * 1.5, rule(6).calc_price(6, 1.5));
        // Limit exceeded: only one group fits under the limit
        assert_close(5.0 * 1.5, rule(3).calc_price(6, 1.5));
    }

    #[test]
    fn test_bogo_unit_degenerate_group() {
        assert_close(4.0 * 2.0, BogoUnit::new(0, 0, 100.0).calc_price(4, 2.0));
    }

    #[test]
    fn test_bogo_weight_free() {
        let rule = BogoWeight::new(1.5, 0.5, 100.0);
        // Not enough
        assert_close(1.0 * 3.49, rule.calc_price(1.0, 3.49));
        // Exactly needed + receive
        assert_close(1.5 * 3.49, rule.calc_price(2.0, 3.49));
        // Only half the receivable weight is there
        assert_close((1.75 - 0.25) * 3.49, rule.calc_price(1.75, 3.49));
        // One group plus extra full-price weight
        assert_close((2.5 - 0.5) * 3.49, rule.calc_price(2.5, 3.49));
        // One full group and one partial group
        assert_close(3.0 * 3.49, rule.calc_price(3.75, 3.49));
    }

    #[test]
    fn test_bogo_weight_needed_exactly_gets_no_discount() {
        let rule = BogoWeight::new(1.5, 0.5, 100.0);
        assert_close(1.5 * 3.49, rule.calc_price(1.5, 3.49));
    }

    #[test]
    fn test_bogo_weight_percent_off() {
        let rule = BogoWeight::new(1.5, 0.5, 25.0);
        assert_close(1.5 * 3.49 + 0.5 * 3.49 * 0.75, rule.calc_price(2.0, 3.49));
        assert_close(
            3.0 * 3.49 + 0.75 * 3.49 * 0.75,
            rule.calc_price(3.75, 3.49),
        );
    }

    #[test]
    fn test_bogo_weight_limits() {
        let rule = |limit| BogoWeight::new(2.5, 1.5, 100.0).with_limit(limit);

        // Limit smaller than needed: nothing qualifies
        assert_close(4.0 * 8.75, rule(1.5).calc_price(4.0, 8.75));
        // Limit not reached
        assert_close(2.0 * 8.75, rule(8.0).calc_price(2.0, 8.75));
        // Limit equal: two free groups
        assert_close((8.0 - 3.0) * 8.75, rule(8.0).calc_price(8.0, 8.75));
        // Limit exceeded: one free group
        assert_close((8.0 - 1.5) * 8.75, rule(4.0).calc_price(8.0, 8.75));
        // Limit between needed and needed + receive: partial discount
        assert_close((8.0 - 0.5) * 8.75, rule(3.0).calc_price(8.0, 8.75));
    }

    #[test]
    fn test_bogo_weight_negative_config_uses_absolute_value() {
        let rule = BogoWeight::new(-1.5, -0.5, 100.0).with_limit(-4.0);
        assert_eq!(rule.needed(), 1.5);
        assert_eq!(rule.receive(), 0.5);
        assert_eq!(rule.limit(), 4.0);
    }

    #[test]
    fn test_bogo_weight_huge_weight() {
        let rule = BogoWeight::new(1.5, 0.5, 100.0);
        let expected = 1e20 * 0.75 * 3.49;
        let actual = rule.calc_price(1e20, 3.49);
        assert!(((expected - actual) / expected).abs() < 1e-12, "got {actual}");

        // Far more groups than a loop could walk through
        let rule = BogoWeight::new(0.5, 0.5, 50.0);
        let actual = rule.calc_price(1e9, 2.0);
        assert!(((1e9 * 1.5 - actual) / (1e9 * 1.5)).abs() < 1e-12, "got {actual}");

        // Limit still caps the discounted weight
        let rule = BogoWeight::new(1.0, 1.0, 100.0).with_limit(4.0);
        assert_close(1e15 - 2.0, rule.calc_price(1e15, 1.0));
    }

    #[test]
    fn test_bogo_weight_zero_config_terminates() {
        assert_close(2.0 * 3.0, BogoWeight::new(0.0, 0.0, 100.0).calc_price(2.0, 3.0));
        // Every pound discounted when nothing is needed
        assert_close(0.0, BogoWeight::new(0.0, 0.5, 100.0).calc_price(2.0, 3.0));
    }

    #[test]
    fn test_n_for_x() {
        let rule = NForX::new(3, 10.0);
        assert_close(2.0 * 5.5, rule.calc_price(2, 5.5));
        assert_close(10.0, rule.calc_price(3, 5.5));
        assert_close(10.0 + 5.5, rule.calc_price(4, 5.5));
        assert_close(20.0 + 5.5, rule.calc_price(7, 5.5));
    }

    #[test]
    fn test_n_for_x_limits() {
        let rule = |limit| NForX::new(3, 20.0).with_limit(limit);

        assert_close(3.0 * 10.4, rule(2).calc_price(3, 10.4));
        assert_close(2.0 * 10.4, rule(6).calc_price(2, 10.4));
        assert_close(40.0, rule(6).calc_price(6, 10.4));
        assert_close(4.0 * 10.4 + 20.0, rule(3).calc_price(7, 10.4));
    }

    #[test]
    fn test_promotion_dispatch_truncates_unit_amounts() {
        let promo = Promotion::from(NForX::new(3, 10.0));
        assert_close(10.0, promo.calc_price(3.9, 5.5));
        assert_close(10.0, promo.calc_price(-3.0, 5.5));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Promotion::from(BogoUnit::new(2, 1, 100.0)).to_string(),
            "buy 2 get 1 100% off"
        );
        assert_eq!(
            Promotion::from(NForX::new(3, 12.0).with_limit(3)).to_string(),
            "3 for $12.00, limit 3"
        );
        assert_eq!(
            Promotion::from(BogoWeight::new(1.0, 0.5, 25.0)).to_string(),
            "buy 1 lb get 0.5 lb 25% off"
        );
    }
}
