//! # Search Resolution
//!
//! Resolves a free-text query against a catalog snapshot to a single item id.
//!
//! ## Resolution Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How Resolution Works                                 │
//! │                                                                         │
//! │  User types: "Widget"                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. Exact (case-sensitive) name match ──► found? return its id         │
//! │       │ miss                                                            │
//! │       ▼                                                                 │
//! │  2. Parse query as an integer id ───────► existing id? return it       │
//! │       │ miss or not a number                                            │
//! │       ▼                                                                 │
//! │  3. None (a controlled miss, never a fault)                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A name match always wins over the numeric fallback: if some item is
//! literally named "2", querying "2" resolves to that item even when another
//! item has id 2.

use crate::types::{CatalogSnapshot, ItemId};

/// Resolves a query to the id of a single item in the snapshot.
///
/// Returns `None` when the query matches no name and is not the id of an
/// existing item. Non-numeric queries that match nothing are a well-formed
/// miss, not an error.
///
/// ## Example
/// ```rust
/// use stockroom_core::search::resolve;
/// use stockroom_core::types::{CatalogSnapshot, Item};
///
/// let snapshot = CatalogSnapshot::new(vec![Item {
///     id: 1,
///     name: "Widget".to_string(),
///     quantity: 10,
///     price_cents: 250,
/// }]);
///
/// assert_eq!(resolve("Widget", &snapshot), Some(1));
/// assert_eq!(resolve("1", &snapshot), Some(1)); // numeric fallback
/// assert_eq!(resolve("widget", &snapshot), None); // case-sensitive
/// ```
pub fn resolve(query: &str, snapshot: &CatalogSnapshot) -> Option<ItemId> {
    if let Some(item) = snapshot.find_by_name(query) {
        return Some(item.id);
    }

    // Numeric fallback: only an id that actually exists resolves.
    // The parse is guarded so "no such item" text is a miss, not a fault.
    let id = query.trim().parse::<ItemId>().ok()?;
    snapshot.find_by_id(id).map(|item| item.id)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Item;

    fn item(id: ItemId, name: &str) -> Item {
        Item {
            id,
            name: name.to_string(),
            quantity: 10,
            price_cents: 250,
        }
    }

    #[test]
    fn test_resolves_every_name_to_its_id() {
        let snapshot = CatalogSnapshot::new(vec![
            item(1, "Widget"),
            item(2, "Gadget"),
            item(3, "Sprocket"),
        ]);

        for it in snapshot.items() {
            assert_eq!(resolve(&it.name, &snapshot), Some(it.id));
        }
    }

    #[test]
    fn test_numeric_fallback_resolves_existing_id() {
        let snapshot = CatalogSnapshot::new(vec![item(1, "Widget"), item(7, "Gadget")]);
        assert_eq!(resolve("1", &snapshot), Some(1));
        assert_eq!(resolve("7", &snapshot), Some(7));
        assert_eq!(resolve(" 7 ", &snapshot), Some(7));
    }

    #[test]
    fn test_numeric_fallback_requires_existing_id() {
        let snapshot = CatalogSnapshot::new(vec![item(1, "Widget")]);
        assert_eq!(resolve("99", &snapshot), None);
    }

    #[test]
    fn test_name_match_wins_over_numeric_fallback() {
        // An item literally named "2" shadows the item whose id is 2
        let snapshot = CatalogSnapshot::new(vec![item(2, "Widget"), item(5, "2")]);
        assert_eq!(resolve("2", &snapshot), Some(5));
    }

    #[test]
    fn test_non_numeric_miss_is_none_not_a_fault() {
        let snapshot = CatalogSnapshot::new(vec![item(1, "Widget")]);
        assert_eq!(resolve("no such item", &snapshot), None);
        assert_eq!(resolve("", &snapshot), None);
    }

    #[test]
    fn test_name_match_is_case_sensitive() {
        let snapshot = CatalogSnapshot::new(vec![item(1, "Widget")]);
        assert_eq!(resolve("widget", &snapshot), None);
        assert_eq!(resolve("WIDGET", &snapshot), None);
    }

    #[test]
    fn test_empty_snapshot_always_misses() {
        let snapshot = CatalogSnapshot::default();
        assert_eq!(resolve("Widget", &snapshot), None);
        assert_eq!(resolve("1", &snapshot), None);
    }
}
