//! # In-Memory Catalog Store
//!
//! Reference [`CatalogStore`] implementation backed by a `tokio::sync::watch`
//! channel. The production storage engine lives behind the same trait; this
//! store exists so the catalog layer is fully exercisable without one.
//!
//! ## Commit Ordering
//! The write lock is held across the read-modify-publish sequence, so every
//! committed update produces exactly one snapshot and snapshots are
//! delivered in commit order. This is what makes the store the serializing
//! authority the sale processor relies on.

use std::pin::Pin;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

use tokio::sync::{watch, RwLock};
use tokio_stream::wrappers::WatchStream;
use tokio_stream::Stream;
use tracing::{debug, info};

use stockroom_core::types::{CatalogSnapshot, Item, ItemId, NewItem};
use stockroom_core::validation::validate_new_item;

use crate::error::{StoreError, StoreResult};
use crate::store::{CatalogStore, SnapshotStream};

// =============================================================================
// Memory Catalog Store
// =============================================================================

/// An in-memory catalog store.
///
/// ## Usage
/// ```rust,ignore
/// let store = Arc::new(MemoryCatalogStore::new());
/// let id = store.insert(NewItem { name: "Widget".into(), quantity: 10, price_cents: 250 }).await?;
/// store.update(id, 6).await?;
/// ```
pub struct MemoryCatalogStore {
    /// Item rows, in insertion order.
    items: RwLock<Vec<Item>>,

    /// Next id to assign. Ids are positive and never reused.
    next_id: AtomicI64,

    /// Publishes a snapshot after every commit.
    snapshots: watch::Sender<CatalogSnapshot>,

    /// Currently open change streams.
    open_streams: Arc<AtomicUsize>,

    /// Total change streams ever opened (tests assert re-subscribe counts).
    stream_opens: AtomicUsize,
}

impl MemoryCatalogStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        let (snapshots, _rx) = watch::channel(CatalogSnapshot::default());
        MemoryCatalogStore {
            items: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(0),
            snapshots,
            open_streams: Arc::new(AtomicUsize::new(0)),
            stream_opens: AtomicUsize::new(0),
        }
    }

    /// Returns the current snapshot without subscribing.
    pub fn snapshot(&self) -> CatalogSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Number of change streams currently open.
    pub fn open_change_streams(&self) -> usize {
        self.open_streams.load(Ordering::SeqCst)
    }

    /// Total number of change streams ever opened.
    pub fn change_stream_opens(&self) -> usize {
        self.stream_opens.load(Ordering::SeqCst)
    }
}

impl Default for MemoryCatalogStore {
    fn default() -> Self {
        MemoryCatalogStore::new()
    }
}

#[async_trait::async_trait]
impl CatalogStore for MemoryCatalogStore {
    fn change_stream(&self) -> SnapshotStream {
        self.open_streams.fetch_add(1, Ordering::SeqCst);
        self.stream_opens.fetch_add(1, Ordering::SeqCst);
        debug!(
            open = self.open_streams.load(Ordering::SeqCst),
            "Change stream opened"
        );

        Box::pin(CountedStream {
            inner: WatchStream::new(self.snapshots.subscribe()),
            _guard: StreamGuard {
                open: Arc::clone(&self.open_streams),
            },
        })
    }

    async fn update(&self, item_id: ItemId, new_quantity: i64) -> StoreResult<()> {
        if new_quantity < 0 {
            return Err(StoreError::InvalidItem(
                stockroom_core::error::ValidationError::Negative {
                    field: "quantity".to_string(),
                },
            ));
        }

        // Hold the write lock across read-modify-publish: commits are
        // serialized and each produces exactly one snapshot.
        let mut items = self.items.write().await;
        let item = items
            .iter_mut()
            .find(|item| item.id == item_id)
            .ok_or(StoreError::ItemNotFound(item_id))?;
        item.quantity = new_quantity;

        let snapshot = CatalogSnapshot::new(items.clone());
        self.snapshots.send_replace(snapshot);

        debug!(item_id, new_quantity, "Stock updated");
        Ok(())
    }

    async fn insert(&self, item: NewItem) -> StoreResult<ItemId> {
        validate_new_item(&item)?;

        let mut items = self.items.write().await;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        items.push(Item {
            id,
            name: item.name.trim().to_string(),
            quantity: item.quantity,
            price_cents: item.price_cents,
        });

        let snapshot = CatalogSnapshot::new(items.clone());
        self.snapshots.send_replace(snapshot);

        info!(item_id = id, "Item inserted");
        Ok(id)
    }
}

// =============================================================================
// Counted Stream
// =============================================================================

/// Wraps the watch stream so the store can observe subscription lifetimes.
struct CountedStream {
    inner: WatchStream<CatalogSnapshot>,
    _guard: StreamGuard,
}

struct StreamGuard {
    open: Arc<AtomicUsize>,
}

impl Drop for StreamGuard {
    fn drop(&mut self) {
        self.open.fetch_sub(1, Ordering::SeqCst);
    }
}

impl Stream for CountedStream {
    type Item = CatalogSnapshot;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_stream::StreamExt;

    fn widget() -> NewItem {
        NewItem {
            name: "Widget".to_string(),
            quantity: 10,
            price_cents: 250,
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_positive_ids() {
        let store = MemoryCatalogStore::new();
        let first = store.insert(widget()).await.unwrap();
        let second = store
            .insert(NewItem {
                name: "Gadget".to_string(),
                quantity: 3,
                price_cents: 125,
            })
            .await
            .unwrap();

        assert_eq!(first, 1);
        assert_eq!(second, 2);
    }

    #[tokio::test]
    async fn test_insert_rejects_invalid_payload() {
        let store = MemoryCatalogStore::new();
        let err = store
            .insert(NewItem {
                name: "".to_string(),
                quantity: 1,
                price_cents: 100,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidItem(_)));
        assert!(store.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_update_changes_quantity_and_publishes() {
        let store = MemoryCatalogStore::new();
        let id = store.insert(widget()).await.unwrap();

        store.update(id, 6).await.unwrap();

        let snapshot = store.snapshot();
        assert_eq!(snapshot.find_by_id(id).unwrap().quantity, 6);
    }

    #[tokio::test]
    async fn test_update_unknown_id_fails() {
        let store = MemoryCatalogStore::new();
        let err = store.update(42, 1).await.unwrap_err();
        assert!(matches!(err, StoreError::ItemNotFound(42)));
    }

    #[tokio::test]
    async fn test_update_rejects_negative_quantity() {
        let store = MemoryCatalogStore::new();
        let id = store.insert(widget()).await.unwrap();
        let err = store.update(id, -1).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidItem(_)));
        // The committed state is untouched
        assert_eq!(store.snapshot().find_by_id(id).unwrap().quantity, 10);
    }

    #[tokio::test]
    async fn test_change_stream_delivers_in_commit_order() {
        let store = MemoryCatalogStore::new();
        let id = store.insert(widget()).await.unwrap();

        let mut stream = store.change_stream();
        // First delivery reflects all updates committed so far
        let current = stream.next().await.unwrap();
        assert_eq!(current.find_by_id(id).unwrap().quantity, 10);

        store.update(id, 6).await.unwrap();
        let next = stream.next().await.unwrap();
        assert_eq!(next.find_by_id(id).unwrap().quantity, 6);
    }

    #[tokio::test]
    async fn test_stream_counters_track_lifetimes() {
        let store = MemoryCatalogStore::new();
        assert_eq!(store.open_change_streams(), 0);

        let stream = store.change_stream();
        assert_eq!(store.open_change_streams(), 1);
        assert_eq!(store.change_stream_opens(), 1);

        drop(stream);
        assert_eq!(store.open_change_streams(), 0);
        assert_eq!(store.change_stream_opens(), 1);
    }
}
