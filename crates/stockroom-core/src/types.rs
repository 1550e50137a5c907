//! # Domain Types
//!
//! Core domain types used throughout Stockroom.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Item       │   │ CatalogSnapshot │   │   SaleRequest   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (ItemId)    │   │  items (Vec)    │   │  item_id        │       │
//! │  │  name           │   │  immutable,     │   │  quantity_input │       │
//! │  │  quantity ≥ 0   │   │  point-in-time  │   │  (raw text)     │       │
//! │  │  price_cents    │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │   SaleResult    │   │     NewItem     │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  item (post)    │   │  item without   │                             │
//! │  │  sold_quantity  │   │  an assigned id │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Item ids are positive integers assigned by the storage layer and immutable
//! after creation. A search miss is represented by `Option::None`, never by a
//! magic id value.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Item
// =============================================================================

/// Identifier assigned to an item by the storage layer.
///
/// Valid ids are positive; the storage layer hands them out sequentially.
pub type ItemId = i64;

/// An item held in stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Item {
    /// Unique identifier, assigned by the storage layer.
    pub id: ItemId,

    /// Display name shown in the catalog list and on the summary.
    pub name: String,

    /// Units currently in stock. Invariant: never negative.
    pub quantity: i64,

    /// Unit price in cents (smallest currency unit).
    pub price_cents: i64,
}

impl Item {
    /// Returns the unit price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Checks whether `quantity` units can be sold from current stock.
    #[inline]
    pub fn can_sell(&self, quantity: i64) -> bool {
        quantity >= 0 && quantity <= self.quantity
    }
}

/// An item payload without an id, handed to the store for insertion.
/// The store validates it and assigns the next id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewItem {
    pub name: String,
    pub quantity: i64,
    pub price_cents: i64,
}

// =============================================================================
// Catalog Snapshot
// =============================================================================

/// An immutable, point-in-time view of the catalog.
///
/// Snapshots are produced by the storage layer in commit order and are
/// read-only to consumers. A consumer never mutates a snapshot; it is
/// superseded atomically by the next one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CatalogSnapshot {
    items: Vec<Item>,
}

impl CatalogSnapshot {
    /// Creates a snapshot from an ordered sequence of items.
    pub fn new(items: Vec<Item>) -> Self {
        CatalogSnapshot { items }
    }

    /// Returns the items in this snapshot, in storage order.
    #[inline]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Number of items in the snapshot.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True for the empty snapshot (the state before the first delivery).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Looks up an item by id.
    pub fn find_by_id(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Looks up an item by exact (case-sensitive) name.
    pub fn find_by_name(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.name == name)
    }
}

// =============================================================================
// Sale Request / Result
// =============================================================================

/// A request to sell some quantity of an item.
///
/// The quantity is kept as the raw text the user typed; parsing and
/// validation happen inside the sale transaction so a malformed entry is a
/// typed [`crate::error::CoreError::InvalidQuantity`], not a panic.
/// Transient: created per user action and discarded after the summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaleRequest {
    pub item_id: ItemId,
    pub quantity_input: String,
}

impl SaleRequest {
    /// Creates a sale request from an id and the raw quantity text.
    pub fn new(item_id: ItemId, quantity_input: impl Into<String>) -> Self {
        SaleRequest {
            item_id,
            quantity_input: quantity_input.into(),
        }
    }
}

/// The outcome of a committed sale, used to render the summary screen.
///
/// `item` is the post-sale item (stock already decremented);
/// the summary total is `sold_quantity × item.price()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaleResult {
    pub item: Item,
    pub sold_quantity: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> Item {
        Item {
            id: 1,
            name: "Widget".to_string(),
            quantity: 10,
            price_cents: 250,
        }
    }

    #[test]
    fn test_item_price() {
        assert_eq!(widget().price(), Money::from_cents(250));
    }

    #[test]
    fn test_item_can_sell() {
        let item = widget();
        assert!(item.can_sell(0));
        assert!(item.can_sell(10));
        assert!(!item.can_sell(11));
        assert!(!item.can_sell(-1));
    }

    #[test]
    fn test_snapshot_default_is_empty() {
        let snapshot = CatalogSnapshot::default();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.len(), 0);
    }

    #[test]
    fn test_snapshot_lookups() {
        let snapshot = CatalogSnapshot::new(vec![widget()]);
        assert_eq!(snapshot.find_by_id(1).map(|i| i.name.as_str()), Some("Widget"));
        assert!(snapshot.find_by_id(2).is_none());
        assert_eq!(snapshot.find_by_name("Widget").map(|i| i.id), Some(1));
        // Name matching is case-sensitive
        assert!(snapshot.find_by_name("widget").is_none());
    }
}
