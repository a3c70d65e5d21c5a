//! In-memory query cache with per-scope staleness windows and request
//! coalescing.
//!
//! Entries hold the serialized response; typed decoding happens at the
//! edges. Invalidation marks entries stale without dropping them, so a
//! caller that tolerates stale data can still read the previous value
//! while a refetch is in flight.

mod keys;

pub use keys::{Mutation, QueryKey, Scope};

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use orgdesk_api::{ApiError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;

/// Observable lifecycle of one cache slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryState {
    Absent,
    Loading,
    Fresh,
    Stale,
}

struct Entry {
    value: serde_json::Value,
    fetched_at: Instant,
    invalidated: bool,
}

impl Entry {
    fn is_fresh(&self, scope: Scope) -> bool {
        !self.invalidated && self.fetched_at.elapsed() < scope.staleness_window()
    }
}

#[derive(Default)]
pub struct QueryCache {
    entries: Mutex<HashMap<QueryKey, Entry>>,
    // One lock per key so concurrent misses coalesce into a single fetch.
    fetch_locks: Mutex<HashMap<QueryKey, Arc<Mutex<()>>>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve from cache when fresh, otherwise run `fetch` and store the
    /// result. Concurrent callers for the same key wait on the in-flight
    /// fetch instead of issuing their own; whichever caller wins the
    /// per-key lock re-checks freshness before touching the network.
    ///
    /// Failed fetches are not cached. A previous (now stale) value stays
    /// in place so invalidation followed by a failed refetch does not
    /// erase data the UI is still showing.
    pub async fn get_or_fetch<T, F, Fut>(&self, key: QueryKey, fetch: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if let Some(value) = self.lookup_fresh(&key).await {
            return decode(value);
        }

        let lock = self.fetch_lock(&key).await;
        let _guard = lock.lock().await;

        // A coalesced caller may have populated the entry while we waited.
        if let Some(value) = self.lookup_fresh(&key).await {
            return decode(value);
        }

        log::debug!("cache miss for {:?}, fetching", key);
        let fetched = fetch().await?;
        let value = serde_json::to_value(&fetched).map_err(|e| ApiError::Parse(e.to_string()))?;
        self.entries.lock().await.insert(
            key,
            Entry {
                value,
                fetched_at: Instant::now(),
                invalidated: false,
            },
        );
        Ok(fetched)
    }

    /// Mark every entry in the given scopes stale. The next read for an
    /// affected key refetches; untouched scopes keep serving from cache.
    pub async fn invalidate(&self, scopes: &[Scope]) {
        let mut entries = self.entries.lock().await;
        for (key, entry) in entries.iter_mut() {
            if scopes.contains(&key.scope) {
                entry.invalidated = true;
            }
        }
    }

    /// Fan out invalidation along the static mutation graph.
    pub async fn apply_mutation(&self, mutation: Mutation) {
        log::debug!(
            "invalidating after {:?}: {:?}",
            mutation,
            mutation.invalidates()
        );
        self.invalidate(mutation.invalidates()).await;
    }

    pub async fn state(&self, key: &QueryKey) -> QueryState {
        {
            let entries = self.entries.lock().await;
            match entries.get(key) {
                Some(entry) if entry.is_fresh(key.scope) => return QueryState::Fresh,
                Some(_) => return QueryState::Stale,
                None => {}
            }
        }
        let locks = self.fetch_locks.lock().await;
        match locks.get(key) {
            Some(lock) if lock.try_lock().is_err() => QueryState::Loading,
            _ => QueryState::Absent,
        }
    }

    /// Drop entries past their staleness window or explicitly invalidated.
    pub async fn evict_stale(&self) {
        let mut entries = self.entries.lock().await;
        entries.retain(|key, entry| entry.is_fresh(key.scope));
    }

    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }

    async fn lookup_fresh(&self, key: &QueryKey) -> Option<serde_json::Value> {
        let entries = self.entries.lock().await;
        entries
            .get(key)
            .filter(|entry| entry.is_fresh(key.scope))
            .map(|entry| entry.value.clone())
    }

    async fn fetch_lock(&self, key: &QueryKey) -> Arc<Mutex<()>> {
        let mut locks = self.fetch_locks.lock().await;
        Arc::clone(locks.entry(key.clone()).or_default())
    }
}

fn decode<T: DeserializeOwned>(value: serde_json::Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| ApiError::Parse(e.to_string()))
}
