//! # Catalog Subscription
//!
//! Wraps the store's change stream with lifecycle-aware sharing. Any number
//! of observers share a single upstream subscription; when the last one
//! detaches, the upstream is kept alive for a grace window so transient
//! detach/reattach cycles (a view being rebuilt, for instance) do not tear
//! it down and reopen it.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Upstream Subscription Lifecycle                      │
//! │                                                                         │
//! │  observe() #1 ──► spawn pump ──► ONE store.change_stream() open        │
//! │  observe() #2 ──► share the same pump                                  │
//! │       │                                                                 │
//! │  last observer drops                                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  grace timer (default 5000 ms)                                          │
//! │   ├── observer reattaches in time ──► timer is stale, pump survives    │
//! │   └── timer elapses ──────────────► pump aborted, upstream released    │
//! │                                                                         │
//! │  Invariant: at most one upstream subscription is open, and it is open  │
//! │  exactly while observers are attached or the grace window is pending.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Observers always receive the latest snapshot first - the empty snapshot
//! before the upstream has delivered anything - then live snapshots as they
//! arrive. Detaching one observer cancels delivery to that observer only.

use std::pin::Pin;
use std::sync::{Arc, Mutex, Weak};
use std::task::{Context, Poll};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::WatchStream;
use tokio_stream::{Stream, StreamExt};
use tracing::{debug, info};

use stockroom_core::types::CatalogSnapshot;

use crate::store::CatalogStore;

// =============================================================================
// Configuration
// =============================================================================

/// How long the upstream subscription survives after the last observer
/// detaches.
pub const DEFAULT_GRACE_WINDOW: Duration = Duration::from_millis(5000);

/// Configuration for a catalog subscription.
#[derive(Debug, Clone)]
pub struct SubscriptionConfig {
    /// Grace window before the upstream subscription is released.
    pub grace_window: Duration,
}

impl Default for SubscriptionConfig {
    fn default() -> Self {
        SubscriptionConfig {
            grace_window: DEFAULT_GRACE_WINDOW,
        }
    }
}

// =============================================================================
// Catalog Subscription
// =============================================================================

/// Shares one upstream change stream between any number of observers.
///
/// ## Usage
/// ```rust,ignore
/// let subscription = CatalogSubscription::new(store, SubscriptionConfig::default());
///
/// let mut snapshots = subscription.observe();
/// while let Some(snapshot) = snapshots.next().await {
///     render(snapshot);
/// }
/// ```
///
/// The subscription's lifetime is caller-controlled: it holds no ambient
/// scope, and [`CatalogSubscription::shutdown`] releases the upstream
/// exactly once. Dropping the last handle has the same effect.
#[derive(Clone)]
pub struct CatalogSubscription {
    inner: Arc<Inner>,
}

struct Inner {
    store: Arc<dyn CatalogStore>,
    config: SubscriptionConfig,
    /// Latest snapshot, replaced (never mutated) on each upstream delivery.
    latest: watch::Sender<CatalogSnapshot>,
    lifecycle: Mutex<Lifecycle>,
}

struct Lifecycle {
    /// Attached observers.
    observers: usize,
    /// Bumped on every attach and on shutdown; a pending grace timer only
    /// releases the pump if the epoch it captured is still current.
    epoch: u64,
    /// The task pumping upstream snapshots into `latest`, if running.
    pump: Option<JoinHandle<()>>,
    /// Set once by `shutdown`; no pump is spawned afterwards.
    shut_down: bool,
}

impl CatalogSubscription {
    /// Creates a subscription over a store.
    ///
    /// Nothing is subscribed upstream until the first observer attaches.
    pub fn new(store: Arc<dyn CatalogStore>, config: SubscriptionConfig) -> Self {
        let (latest, _rx) = watch::channel(CatalogSnapshot::default());
        CatalogSubscription {
            inner: Arc::new(Inner {
                store,
                config,
                latest,
                lifecycle: Mutex::new(Lifecycle {
                    observers: 0,
                    epoch: 0,
                    pump: None,
                    shut_down: false,
                }),
            }),
        }
    }

    /// Attaches an observer and returns its snapshot stream.
    ///
    /// The stream yields the latest snapshot immediately (the empty snapshot
    /// before the first upstream delivery), then live snapshots. Dropping
    /// the stream detaches the observer.
    pub fn observe(&self) -> ObservedSnapshots {
        let rx = self.inner.latest.subscribe();
        self.inner.attach();
        ObservedSnapshots {
            snapshots: WatchStream::new(rx),
            _guard: ObserverGuard {
                inner: Arc::downgrade(&self.inner),
            },
        }
    }

    /// Returns the latest snapshot without attaching an observer.
    pub fn latest(&self) -> CatalogSnapshot {
        self.inner.latest.borrow().clone()
    }

    /// Number of currently attached observers.
    pub fn observer_count(&self) -> usize {
        self.inner.lifecycle.lock().unwrap().observers
    }

    /// Releases the upstream subscription and stops serving live snapshots.
    ///
    /// Idempotent; the upstream is cancelled exactly once. Streams already
    /// handed out still deliver the last snapshot they have not seen, but
    /// nothing new arrives after that.
    pub fn shutdown(&self) {
        let mut lifecycle = self.inner.lifecycle.lock().unwrap();
        if lifecycle.shut_down {
            return;
        }
        lifecycle.shut_down = true;
        lifecycle.epoch += 1;
        if let Some(pump) = lifecycle.pump.take() {
            pump.abort();
        }
        info!("Catalog subscription shut down");
    }
}

impl Inner {
    /// Registers an observer, spawning the upstream pump if needed.
    fn attach(self: &Arc<Self>) {
        let mut lifecycle = self.lifecycle.lock().unwrap();
        lifecycle.observers += 1;
        // Invalidate any grace timer waiting to release the pump
        lifecycle.epoch += 1;

        if lifecycle.pump.is_none() && !lifecycle.shut_down {
            lifecycle.pump = Some(self.spawn_pump());
        }
        debug!(observers = lifecycle.observers, "Observer attached");
    }

    /// Deregisters an observer, arming the grace timer on the last detach.
    fn detach(self: &Arc<Self>) {
        let mut lifecycle = self.lifecycle.lock().unwrap();
        lifecycle.observers -= 1;
        debug!(observers = lifecycle.observers, "Observer detached");

        if lifecycle.observers > 0 || lifecycle.shut_down || lifecycle.pump.is_none() {
            return;
        }

        let armed_epoch = lifecycle.epoch;
        let grace = self.config.grace_window;
        let weak = Arc::downgrade(self);
        drop(lifecycle);

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    tokio::time::sleep(grace).await;
                    if let Some(inner) = weak.upgrade() {
                        inner.release_if_stale(armed_epoch);
                    }
                });
            }
            // No runtime left to time the grace window; release now
            Err(_) => {
                if let Some(inner) = weak.upgrade() {
                    inner.release_if_stale(armed_epoch);
                }
            }
        }
    }

    /// Releases the pump if no observer attached since the timer was armed.
    fn release_if_stale(&self, armed_epoch: u64) {
        let mut lifecycle = self.lifecycle.lock().unwrap();
        if lifecycle.observers == 0 && lifecycle.epoch == armed_epoch {
            if let Some(pump) = lifecycle.pump.take() {
                pump.abort();
                debug!("Upstream subscription released after grace window");
            }
        }
    }

    /// Spawns the task that forwards upstream snapshots into `latest`.
    ///
    /// The task holds only a weak reference back here, so dropping the last
    /// subscription handle lets everything unwind.
    fn spawn_pump(self: &Arc<Self>) -> JoinHandle<()> {
        let mut upstream = self.store.change_stream();
        let weak = Arc::downgrade(self);

        tokio::spawn(async move {
            while let Some(snapshot) = upstream.next().await {
                match weak.upgrade() {
                    Some(inner) => {
                        inner.latest.send_replace(snapshot);
                    }
                    None => break,
                }
            }
        })
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        // Last handle gone: cancel the upstream promptly rather than waiting
        // for the pump to notice its weak reference is dead
        if let Ok(mut lifecycle) = self.lifecycle.lock() {
            if let Some(pump) = lifecycle.pump.take() {
                pump.abort();
            }
        }
    }
}

// =============================================================================
// Observer Stream
// =============================================================================

/// The snapshot stream handed to one observer.
///
/// Yields the latest snapshot first, then every subsequent snapshot.
/// Dropping it detaches the observer; delivery to other observers is
/// unaffected.
pub struct ObservedSnapshots {
    snapshots: WatchStream<CatalogSnapshot>,
    _guard: ObserverGuard,
}

impl Stream for ObservedSnapshots {
    type Item = CatalogSnapshot;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.snapshots).poll_next(cx)
    }
}

struct ObserverGuard {
    inner: Weak<Inner>,
}

impl Drop for ObserverGuard {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.detach();
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryCatalogStore;
    use stockroom_core::types::NewItem;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("stockroom_catalog=debug")
            .try_init();
    }

    fn widget() -> NewItem {
        NewItem {
            name: "Widget".to_string(),
            quantity: 10,
            price_cents: 250,
        }
    }

    fn subscription_over(
        store: &Arc<MemoryCatalogStore>,
        grace: Duration,
    ) -> CatalogSubscription {
        CatalogSubscription::new(
            store.clone() as Arc<dyn CatalogStore>,
            SubscriptionConfig {
                grace_window: grace,
            },
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_emission_is_the_empty_snapshot() {
        let store = Arc::new(MemoryCatalogStore::new());
        let subscription = subscription_over(&store, DEFAULT_GRACE_WINDOW);

        let mut snapshots = subscription.observe();
        let first = snapshots.next().await.unwrap();
        assert!(first.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_observers_see_live_snapshots() {
        init_tracing();
        let store = Arc::new(MemoryCatalogStore::new());
        let subscription = subscription_over(&store, DEFAULT_GRACE_WINDOW);

        let mut snapshots = subscription.observe();
        assert!(snapshots.next().await.unwrap().is_empty());

        let id = store.insert(widget()).await.unwrap();
        let with_widget = snapshots.next().await.unwrap();
        assert_eq!(with_widget.find_by_id(id).unwrap().quantity, 10);

        store.update(id, 6).await.unwrap();
        let after_sale = snapshots.next().await.unwrap();
        assert_eq!(after_sale.find_by_id(id).unwrap().quantity, 6);
    }

    #[tokio::test(start_paused = true)]
    async fn test_observers_share_one_upstream_subscription() {
        let store = Arc::new(MemoryCatalogStore::new());
        let subscription = subscription_over(&store, DEFAULT_GRACE_WINDOW);

        let mut first = subscription.observe();
        let mut second = subscription.observe();
        assert!(first.next().await.unwrap().is_empty());
        assert!(second.next().await.unwrap().is_empty());

        assert_eq!(subscription.observer_count(), 2);
        assert_eq!(store.open_change_streams(), 1);
        assert_eq!(store.change_stream_opens(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_upstream_survives_detach_within_grace_window() {
        let store = Arc::new(MemoryCatalogStore::new());
        let subscription = subscription_over(&store, Duration::from_millis(5000));

        let mut snapshots = subscription.observe();
        assert!(snapshots.next().await.unwrap().is_empty());
        drop(snapshots);

        // Reattach well inside the grace window: same upstream, no reopen
        tokio::time::sleep(Duration::from_millis(2000)).await;
        let mut reattached = subscription.observe();
        assert!(reattached.next().await.is_some());

        tokio::time::sleep(Duration::from_millis(10_000)).await;
        assert_eq!(store.open_change_streams(), 1);
        assert_eq!(store.change_stream_opens(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_upstream_released_after_grace_window() {
        init_tracing();
        let store = Arc::new(MemoryCatalogStore::new());
        let subscription = subscription_over(&store, Duration::from_millis(5000));

        let mut snapshots = subscription.observe();
        assert!(snapshots.next().await.unwrap().is_empty());
        assert_eq!(store.open_change_streams(), 1);

        drop(snapshots);
        // Let the grace timer fire and the aborted pump task finish unwinding
        tokio::time::sleep(Duration::from_millis(5050)).await;
        tokio::task::yield_now().await;
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert_eq!(store.open_change_streams(), 0);

        // A later observer opens a fresh upstream subscription
        let mut fresh = subscription.observe();
        assert!(fresh.next().await.is_some());
        assert_eq!(store.open_change_streams(), 1);
        assert_eq!(store.change_stream_opens(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_detach_cancels_delivery_to_that_observer_only() {
        let store = Arc::new(MemoryCatalogStore::new());
        let subscription = subscription_over(&store, DEFAULT_GRACE_WINDOW);

        let mut kept = subscription.observe();
        let dropped = subscription.observe();
        assert!(kept.next().await.unwrap().is_empty());
        drop(dropped);

        let id = store.insert(widget()).await.unwrap();
        let snapshot = kept.next().await.unwrap();
        assert_eq!(snapshot.find_by_id(id).unwrap().name, "Widget");
        assert_eq!(subscription.observer_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_latest_tracks_most_recent_snapshot() {
        let store = Arc::new(MemoryCatalogStore::new());
        let subscription = subscription_over(&store, DEFAULT_GRACE_WINDOW);
        assert!(subscription.latest().is_empty());

        let mut snapshots = subscription.observe();
        assert!(snapshots.next().await.unwrap().is_empty());

        let id = store.insert(widget()).await.unwrap();
        let delivered = snapshots.next().await.unwrap();
        assert_eq!(subscription.latest(), delivered);
        assert!(subscription.latest().find_by_id(id).is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_releases_upstream_exactly_once() {
        let store = Arc::new(MemoryCatalogStore::new());
        let subscription = subscription_over(&store, DEFAULT_GRACE_WINDOW);

        let mut snapshots = subscription.observe();
        assert!(snapshots.next().await.unwrap().is_empty());
        assert_eq!(store.open_change_streams(), 1);

        subscription.shutdown();
        // Let the aborted pump task finish unwinding
        tokio::task::yield_now().await;
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(store.open_change_streams(), 0);

        // Idempotent, and no new upstream is opened afterwards
        subscription.shutdown();
        let mut after = subscription.observe();
        assert!(after.next().await.is_some());
        assert_eq!(store.open_change_streams(), 0);
    }
}
