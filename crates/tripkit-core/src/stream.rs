// ── Reactive cache subscriptions ──
//
// Subscription handles for consuming cache snapshots from an `EntityCache`.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::model::Entity;
use crate::store::CacheView;

/// A subscription to one entity cache.
///
/// Provides point-in-time snapshot access and change notification via
/// [`changed()`](Self::changed) or by converting into a `Stream`.
pub struct EntityStream<E: Entity> {
    current: CacheView<E>,
    receiver: watch::Receiver<CacheView<E>>,
}

impl<E: Entity> EntityStream<E> {
    pub(crate) fn new(receiver: watch::Receiver<CacheView<E>>) -> Self {
        let current = receiver.borrow().clone();
        Self { current, receiver }
    }

    /// The snapshot captured at creation or at the last `changed()`.
    pub fn current(&self) -> &CacheView<E> {
        &self.current
    }

    /// The latest snapshot (may have changed since creation).
    pub fn latest(&self) -> CacheView<E> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next transition, returning the new snapshot.
    /// Returns `None` once the cache has been dropped.
    pub async fn changed(&mut self) -> Option<CacheView<E>> {
        self.receiver.changed().await.ok()?;
        let snap = self.receiver.borrow_and_update().clone();
        self.current = snap.clone();
        Some(snap)
    }

    /// Convert into a `Stream` for use with `StreamExt` combinators.
    pub fn into_stream(self) -> CacheWatchStream<E> {
        CacheWatchStream {
            inner: WatchStream::new(self.receiver),
        }
    }
}

/// `Stream` adapter yielding a snapshot after every cache transition.
pub struct CacheWatchStream<E: Entity> {
    inner: WatchStream<CacheView<E>>,
}

impl<E: Entity> Stream for CacheWatchStream<E> {
    type Item = CacheView<E>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use futures_util::StreamExt;

    use crate::model::test_support::tour;
    use crate::model::Tour;
    use crate::store::EntityCache;

    #[tokio::test]
    async fn changed_yields_new_snapshot() {
        let cache: EntityCache<Tour> = EntityCache::default();
        let mut stream = cache.subscribe();
        assert!(stream.current().items.is_empty());

        cache.add(tour("t1", 450.0));
        let snap = stream.changed().await.unwrap();
        assert_eq!(snap.items.len(), 1);
        assert_eq!(stream.current().filtered.len(), 1);
    }

    #[tokio::test]
    async fn into_stream_starts_with_current_state() {
        let cache: EntityCache<Tour> = EntityCache::default();
        cache.add(tour("t1", 450.0));

        let mut stream = cache.subscribe().into_stream();
        let first = stream.next().await.unwrap();
        assert_eq!(first.items.len(), 1);
    }
}
