//! # stockroom-core: Pure Business Logic for Stockroom
//!
//! This crate is the **heart** of Stockroom. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Stockroom Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   Presentation Layer (external)                 │   │
//! │  │    Home screen ──► Sell screen ──► Summary screen               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 stockroom-catalog (async layer)                 │   │
//! │  │    CatalogSubscription, SaleTransactionProcessor                │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ stockroom-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  search   │  │  summary  │  │   │
//! │  │   │   Item    │  │   Money   │  │  resolve  │  │   total   │  │   │
//! │  │   │ Snapshot  │  │  Currency │  │           │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Item, CatalogSnapshot, SaleRequest, SaleResult)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`search`] - Query-to-item resolution
//! - [`summary`] - Sale summary computation
//! - [`validation`] - Input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use stockroom_core::money::Money;
//! use stockroom_core::types::{CatalogSnapshot, Item};
//! use stockroom_core::search;
//!
//! let snapshot = CatalogSnapshot::new(vec![Item {
//!     id: 1,
//!     name: "Widget".to_string(),
//!     quantity: 10,
//!     price_cents: 250,
//! }]);
//!
//! // Exact name match wins over the numeric fallback
//! assert_eq!(search::resolve("Widget", &snapshot), Some(1));
//!
//! // A miss is a controlled None, never a fault
//! assert_eq!(search::resolve("no such item", &snapshot), None);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod search;
pub mod summary;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use stockroom_core::Money` instead of
// `use stockroom_core::money::Money`

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{CurrencyFormat, Money};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of an item name.
///
/// ## Business Reason
/// Keeps receipts and list rows renderable. Can be made configurable
/// per-store in future versions.
pub const MAX_ITEM_NAME_LEN: usize = 200;
