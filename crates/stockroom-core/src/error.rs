//! # Error Types
//!
//! Domain-specific error types for stockroom-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  stockroom-core errors (this file)                                     │
//! │  ├── CoreError        - Sale/domain errors                             │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  stockroom-catalog errors (separate crate)                             │
//! │  ├── StoreError       - Catalog store collaborator failures            │
//! │  └── SaleError        - Core or store failure during a sale            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → SaleError → Presentation          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (item id, quantities)
//! 3. Errors are enum variants, never String
//! 4. Every variant is recoverable; nothing here terminates the process
//!
//! Note that a search miss is NOT an error: [`crate::search::resolve`]
//! returns `Option<ItemId>` and `None` is the sentinel for "no such item".

use thiserror::Error;

use crate::types::ItemId;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They should be caught and translated to user-friendly messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Item cannot be found.
    ///
    /// ## When This Occurs
    /// - Item id doesn't exist in the snapshot handed to `sell`
    /// - Item vanished between search resolution and sale commit
    ///
    /// ## User Workflow
    /// Recoverable: the caller should refresh the catalog view.
    #[error("Item not found: {item_id}")]
    ItemNotFound { item_id: ItemId },

    /// The requested sale quantity does not parse as a non-negative integer.
    ///
    /// ## When This Occurs
    /// - Cashier types "abc" or "-3" into the quantity field
    ///
    /// ## User Workflow
    /// Recoverable: block the transaction and re-prompt for a quantity.
    #[error("Invalid quantity '{input}': must be a non-negative whole number")]
    InvalidQuantity { input: String },

    /// Insufficient stock to complete the sale.
    ///
    /// ## When This Occurs
    /// - Trying to sell more units than the snapshot shows in stock
    ///
    /// ## User Workflow
    /// ```text
    /// Sell (qty: 11)
    ///      │
    ///      ▼
    /// Check stock: available=10
    ///      │
    ///      ▼
    /// InsufficientStock { name: "Widget", available: 10, requested: 11 }
    ///      │
    ///      ▼
    /// UI shows: "Only 10 Widget in stock"
    /// ```
    #[error("Insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Convenience type alias for Results with ValidationError.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================
