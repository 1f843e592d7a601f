//! In-memory subscriber registry.

use std::collections::HashSet;

use tokio::sync::RwLock;

/// The set of chat ids currently opted in to receive digests.
///
/// Process-local by design: a restart starts empty and subscribers opt in
/// again. The command surface mutates the set while the broadcaster
/// iterates it, so access goes through an `RwLock` rather than relying on
/// the relay loop being the only task in flight.
#[derive(Debug, Default)]
pub struct SubscriberRegistry {
    inner: RwLock<HashSet<i64>>,
}

impl SubscriberRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the id was already subscribed.
    pub async fn add(&self, chat_id: i64) -> bool {
        self.inner.write().await.insert(chat_id)
    }

    /// Returns false if the id was not subscribed.
    pub async fn remove(&self, chat_id: i64) -> bool {
        self.inner.write().await.remove(&chat_id)
    }

    pub async fn contains(&self, chat_id: i64) -> bool {
        self.inner.read().await.contains(&chat_id)
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Point-in-time copy for iteration outside the lock.
    pub async fn snapshot(&self) -> Vec<i64> {
        self.inner.read().await.iter().copied().collect()
    }
}
