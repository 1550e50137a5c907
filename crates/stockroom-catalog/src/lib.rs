//! # stockroom-catalog: Reactive Catalog Layer for Stockroom
//!
//! Everything stateful around the catalog lives here: the storage
//! collaborator contract, the shared lifecycle-aware subscription over its
//! change stream, and the sale transaction that commits stock updates.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  CatalogStore ──► CatalogSubscription ──► observers (snapshots)        │
//! │       ▲                    │                                            │
//! │       │                    ├──► search::resolve (stockroom-core)       │
//! │       │                    └──► SaleTransactionProcessor               │
//! │       │                                 │                               │
//! │       └──────── update(id, qty) ────────┘                               │
//! │                                                                         │
//! │  summary::total / SaleSummary (stockroom-core) ──► presentation layer  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`store`] - the `CatalogStore` collaborator trait
//! - [`memory`] - in-memory reference store
//! - [`subscription`] - shared change-stream subscription with grace-window
//!   teardown
//! - [`processor`] - the sale transaction
//! - [`error`] - store and sale error types

pub mod error;
pub mod memory;
pub mod processor;
pub mod store;
pub mod subscription;

pub use error::{SaleError, StoreError, StoreResult};
pub use memory::MemoryCatalogStore;
pub use processor::SaleTransactionProcessor;
pub use store::{CatalogStore, SnapshotStream};
pub use subscription::{
    CatalogSubscription, ObservedSnapshots, SubscriptionConfig, DEFAULT_GRACE_WINDOW,
};
