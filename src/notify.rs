use chrono::NaiveDate;
use dashmap::DashMap;
use tokio::sync::broadcast;
use ulid::Ulid;

const CHANNEL_CAPACITY: usize = 256;

/// Keys an external cache layer may be holding results under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// Day-scoped results: available slots, per-day listings, load cells.
    Date(NaiveDate),
    /// Owner-scoped results: an owner's appointment list.
    Owner(Ulid),
}

/// Broadcast hub for cache invalidation, keyed per cache key.
///
/// Every mutating scheduler operation sends the keys it dirtied before
/// returning success. Without subscribers a send is a no-op, so embedders
/// that deploy no cache pay nothing.
pub struct InvalidationHub {
    channels: DashMap<CacheKey, broadcast::Sender<CacheKey>>,
}

impl Default for InvalidationHub {
    fn default() -> Self {
        Self::new()
    }
}

impl InvalidationHub {
    pub fn new() -> Self {
        Self {
            channels: DashMap::new(),
        }
    }

    /// Subscribe to invalidations for one key. Creates the channel if needed.
    pub fn subscribe(&self, key: CacheKey) -> broadcast::Receiver<CacheKey> {
        let sender = self
            .channels
            .entry(key)
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0);
        sender.subscribe()
    }

    /// Send an invalidation. No-op if nobody is listening on the key.
    pub fn send(&self, key: CacheKey) {
        if let Some(sender) = self.channels.get(&key) {
            let _ = sender.send(key);
        }
    }

    /// Remove a channel (e.g. when an owner is purged).
    pub fn remove(&self, key: &CacheKey) {
        self.channels.remove(key);
    }
}
