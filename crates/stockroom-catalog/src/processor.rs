//! # Sale Transaction Processor
//!
//! Validates a sale request against a catalog snapshot, commits the stock
//! update through the store, and returns the data the summary screen needs.
//!
//! ## Transaction Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        sell() Flow                                      │
//! │                                                                         │
//! │  locate item in snapshot ──── absent ────► ItemNotFound                │
//! │       │                                                                 │
//! │  parse quantity text ──── malformed ─────► InvalidQuantity             │
//! │       │                                                                 │
//! │  requested ≤ in stock? ──── no ──────────► InsufficientStock           │
//! │       │ yes                                                             │
//! │       ▼                                                                 │
//! │  store.update(id, quantity - requested)   ← THE ONLY SIDE EFFECT       │
//! │       │                                     issued exactly once,       │
//! │       ▼                                     never on failure           │
//! │  SaleResult { post-sale item, sold quantity }                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The commit is a request to the store, which serializes concurrent
//! updates; no locking happens here. Once `update` has been issued the sale
//! is not cancellable - callers may cancel only before calling `sell`.

use std::sync::Arc;

use tracing::{debug, info};

use stockroom_core::error::CoreError;
use stockroom_core::types::{CatalogSnapshot, Item, SaleRequest, SaleResult};
use stockroom_core::validation::parse_quantity;

use crate::error::{SaleError, StoreError};
use crate::store::CatalogStore;

/// Processes sale transactions against a catalog store.
#[derive(Clone)]
pub struct SaleTransactionProcessor {
    store: Arc<dyn CatalogStore>,
}

impl SaleTransactionProcessor {
    /// Creates a processor committing through the given store.
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        SaleTransactionProcessor { store }
    }

    /// Sells some quantity of an item and returns the summary data.
    ///
    /// ## Failure Modes
    /// - [`CoreError::ItemNotFound`] - the id is absent from `snapshot`, or
    ///   the item vanished between resolution and commit
    /// - [`CoreError::InvalidQuantity`] - the quantity text does not parse
    ///   as a non-negative integer
    /// - [`CoreError::InsufficientStock`] - more units requested than the
    ///   snapshot shows in stock (stock never goes negative)
    ///
    /// On success the stock update has been committed and the returned
    /// [`SaleResult`] carries the post-sale item.
    pub async fn sell(
        &self,
        request: &SaleRequest,
        snapshot: &CatalogSnapshot,
    ) -> Result<SaleResult, SaleError> {
        debug!(item_id = request.item_id, input = %request.quantity_input, "Processing sale");

        let item = snapshot
            .find_by_id(request.item_id)
            .ok_or(CoreError::ItemNotFound {
                item_id: request.item_id,
            })?;

        let requested = parse_quantity(&request.quantity_input)?;

        if requested > item.quantity {
            return Err(CoreError::InsufficientStock {
                name: item.name.clone(),
                available: item.quantity,
                requested,
            }
            .into());
        }

        // Validation passed; this commit is the single observable side effect
        let new_quantity = item.quantity - requested;
        match self.store.update(item.id, new_quantity).await {
            Ok(()) => {}
            // The item vanished between resolution and commit; the caller
            // should refresh its snapshot
            Err(StoreError::ItemNotFound(item_id)) => {
                return Err(CoreError::ItemNotFound { item_id }.into());
            }
            Err(err) => return Err(err.into()),
        }

        info!(
            item_id = item.id,
            sold = requested,
            remaining = new_quantity,
            "Sale committed"
        );

        Ok(SaleResult {
            item: Item {
                quantity: new_quantity,
                ..item.clone()
            },
            sold_quantity: requested,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
