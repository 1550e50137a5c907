//! # Catalog Error Types
//!
//! Error types for the reactive catalog layer.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  StoreError (collaborator failure)     CoreError (business rule)       │
//! │       │                                      │                          │
//! │       └──────────────┬───────────────────────┘                          │
//! │                      ▼                                                  │
//! │                  SaleError ← what SaleTransactionProcessor returns      │
//! │                      │                                                  │
//! │                      ▼                                                  │
//! │  Presentation layer displays a user-friendly message                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant is recoverable. Nothing in this layer is allowed to
//! terminate the process.

use thiserror::Error;

use stockroom_core::error::{CoreError, ValidationError};
use stockroom_core::types::ItemId;

// =============================================================================
// Store Error
// =============================================================================

/// Failures reported by the catalog store collaborator.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The id does not exist in the store.
    ///
    /// ## When This Occurs
    /// - Updating an item that was deleted after the snapshot was taken
    #[error("Item not found in store: {0}")]
    ItemNotFound(ItemId),

    /// An insert payload failed validation.
    #[error("Rejected item: {0}")]
    InvalidItem(#[from] ValidationError),

    /// The store has shut down and accepts no further commands.
    #[error("Catalog store is closed")]
    Closed,
}

/// Convenience type alias for Results with StoreError.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Sale Error
// =============================================================================

/// Failures surfaced by a sale transaction.
///
/// Business-rule violations arrive as [`CoreError`]; collaborator failures
/// as [`StoreError`]. Both are typed and recoverable: invalid or oversized
/// quantities block the transaction and the user is re-prompted, a vanished
/// item should trigger a catalog refresh.
#[derive(Debug, Error)]
pub enum SaleError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_messages() {
        let err = StoreError::ItemNotFound(3);
        assert_eq!(err.to_string(), "Item not found in store: 3");
    }

    #[test]
    fn test_sale_error_is_transparent() {
        let err: SaleError = CoreError::ItemNotFound { item_id: 3 }.into();
        assert_eq!(err.to_string(), "Item not found: 3");

        let err: SaleError = StoreError::Closed.into();
        assert_eq!(err.to_string(), "Catalog store is closed");
    }
}
