//! # Catalog Store Contract
//!
//! The collaborator trait for the persistent storage engine. The core
//! consumes three operations:
//!
//! - a continuous change stream of catalog snapshots, delivered in commit
//!   order, each reflecting all updates committed so far;
//! - an atomic stock update for a single item;
//! - an insert that assigns the next item id.
//!
//! The store is the serializing authority for concurrent updates: the core
//! never locks item rows itself. Persistence format and storage engine
//! design live behind this trait and are out of scope here.

use async_trait::async_trait;
use std::pin::Pin;
use tokio_stream::Stream;

use stockroom_core::types::{CatalogSnapshot, ItemId, NewItem};

use crate::error::StoreResult;

/// A continuous stream of catalog snapshots, in commit order.
pub type SnapshotStream = Pin<Box<dyn Stream<Item = CatalogSnapshot> + Send>>;

/// The storage collaborator consumed by the catalog layer.
///
/// Implementations must serialize concurrent updates to the same item so
/// that lost-update races cannot occur, and must emit a snapshot for every
/// committed change.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Opens a subscription to the store's change stream.
    ///
    /// The stream yields the current snapshot on subscription, then a new
    /// snapshot after every committed update. Dropping the stream closes
    /// the subscription.
    fn change_stream(&self) -> SnapshotStream;

    /// Atomically sets the stock quantity of an item.
    ///
    /// Fails with [`crate::error::StoreError::ItemNotFound`] when the id is
    /// unknown. On success the change is reflected in the next snapshot.
    async fn update(&self, item_id: ItemId, new_quantity: i64) -> StoreResult<()>;

    /// Inserts a new item and returns the id the store assigned to it.
    async fn insert(&self, item: NewItem) -> StoreResult<ItemId>;
}
