//! # Sale Summary
//!
//! Derives the monetary total and the summary view data from a committed
//! sale. Pure functions; no side effects.
//!
//! ## User Workflow
//! ```text
//! Sale committed: 4 × Widget @ $2.50
//!      │
//!      ▼
//! total(&result) ── 4 × 250 cents = 1000 cents
//!      │
//!      ▼
//! SaleSummary { item: "Widget", in_stock: 6, ordered: 4, total: "$10.00" }
//!      │
//!      ▼
//! Summary screen renders the five rows
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{CurrencyFormat, Money};
use crate::types::SaleResult;

/// Computes the monetary total of a sale: `sold_quantity × unit price`.
///
/// Exact integer math; no rounding beyond currency precision. Defined for
/// `sold_quantity ≥ 0`, which the sale transaction guarantees.
///
/// ## Example
/// ```rust
/// use stockroom_core::money::Money;
/// use stockroom_core::summary::total;
/// use stockroom_core::types::{Item, SaleResult};
///
/// let result = SaleResult {
///     item: Item { id: 1, name: "Widget".into(), quantity: 6, price_cents: 250 },
///     sold_quantity: 4,
/// };
/// assert_eq!(total(&result), Money::from_cents(1000)); // $10.00
/// ```
pub fn total(result: &SaleResult) -> Money {
    result.item.price().multiply_quantity(result.sold_quantity)
}

// =============================================================================
// Summary View Data
// =============================================================================

/// Display-ready rows for the summary screen.
///
/// Matches what the presentation layer shows after a sale: the item, the
/// stock remaining after the sale, the unit price, the quantity ordered, and
/// the total - all monetary values rendered through a [`CurrencyFormat`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaleSummary {
    pub item_name: String,
    pub quantity_in_stock: i64,
    pub unit_price: String,
    pub ordered: i64,
    pub total: String,
}

impl SaleSummary {
    /// Builds summary rows from a sale result.
    pub fn from_result(result: &SaleResult, currency: &CurrencyFormat) -> Self {
        SaleSummary {
            item_name: result.item.name.clone(),
            quantity_in_stock: result.item.quantity,
            unit_price: currency.format(result.item.price()),
            ordered: result.sold_quantity,
            total: currency.format(total(result)),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
