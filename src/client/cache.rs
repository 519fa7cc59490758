// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Query cache with in-flight request de-duplication.
//!
//! A cache entry is keyed by request identity ([`QueryKey`]). For each key:
//! 1. A settled result is served until the key is invalidated.
//! 2. While a request is outstanding, later callers await the same shared
//!    future instead of issuing another request.
//! 3. Failures reach every waiter but are never cached.
//!
//! Invalidating a key while its request is in flight detaches that request:
//! its waiters still get the result, but it is not stored, and the next
//! caller starts a fresh request.

use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use futures_util::future::{BoxFuture, FutureExt, Shared};

use super::ClientError;

/// Request identity: method, path and sorted query parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    method: &'static str,
    path: String,
    params: Vec<(String, String)>,
}

impl QueryKey {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: "GET",
            path: path.into(),
            params: Vec::new(),
        }
    }

    /// Add a query parameter. Parameter order does not affect identity.
    pub fn param(mut self, name: &str, value: impl ToString) -> Self {
        let entry = (name.to_string(), value.to_string());
        let pos = self.params.partition_point(|p| *p < entry);
        self.params.insert(pos, entry);
        self
    }

    /// Add a query parameter only if `value` is present.
    pub fn param_opt<V: ToString>(self, name: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.param(name, value),
            None => self,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Path plus URL-encoded query string, as sent on the wire.
    pub fn path_and_query(&self) -> String {
        if self.params.is_empty() {
            return self.path.clone();
        }
        let query: Vec<String> = self
            .params
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect();
        format!("{}?{}", self.path, query.join("&"))
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path_and_query())
    }
}

type SharedFetch<V> = Shared<BoxFuture<'static, Result<V, ClientError>>>;

struct InFlight<V: Clone> {
    /// Distinguishes this request from a later one for the same key
    token: u64,
    future: SharedFetch<V>,
}

struct Inner<V: Clone> {
    settled: DashMap<QueryKey, V>,
    in_flight: DashMap<QueryKey, InFlight<V>>,
    next_token: AtomicU64,
}

impl<V: Clone> Inner<V> {
    /// Record a finished request, unless it was invalidated meanwhile.
    ///
    /// The in-flight entry stays locked while the result is stored, so an
    /// invalidation cannot slip in between the check and the insert.
    fn settle(&self, key: &QueryKey, token: u64, result: &Result<V, ClientError>) {
        if let Entry::Occupied(entry) = self.in_flight.entry(key.clone()) {
            if entry.get().token != token {
                return;
            }
            if let Ok(value) = result {
                self.settled.insert(key.clone(), value.clone());
            }
            entry.remove();
        }
    }
}

/// Shared query cache. Clones share the same entries.
pub struct QueryCache<V: Clone> {
    inner: Arc<Inner<V>>,
}

impl<V: Clone> Clone for QueryCache<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V: Clone> Default for QueryCache<V> {
    fn default() -> Self {
        Self {
            inner: Arc::new(Inner {
                settled: DashMap::new(),
                in_flight: DashMap::new(),
                next_token: AtomicU64::new(0),
            }),
        }
    }
}

impl<V> QueryCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached value for `key`, if settled.
    pub fn get(&self, key: &QueryKey) -> Option<V> {
        self.inner.settled.get(key).map(|v| v.clone())
    }

    /// Return the cached result for `key`, joining or starting a request.
    ///
    /// `loader` is called only when this caller starts the request.
    pub async fn fetch<F, Fut>(&self, key: QueryKey, loader: F) -> Result<V, ClientError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, ClientError>> + Send + 'static,
    {
        if let Some(value) = self.get(&key) {
            return Ok(value);
        }

        let future = match self.inner.in_flight.entry(key.clone()) {
            Entry::Occupied(entry) => {
                tracing::trace!(key = %key, "Joining in-flight request");
                entry.get().future.clone()
            }
            Entry::Vacant(entry) => {
                // Settled between the fast-path check and taking the entry
                if let Some(value) = self.get(&key) {
                    return Ok(value);
                }

                let token = self.inner.next_token.fetch_add(1, Ordering::Relaxed);
                let inner = Arc::clone(&self.inner);
                let request = loader();
                let future = async move {
                    let result = request.await;
                    inner.settle(&key, token, &result);
                    result
                }
                .boxed()
                .shared();

                entry.insert(InFlight {
                    token,
                    future: future.clone(),
                });
                future
            }
        };

        future.await
    }

    /// Drop the settled value and detach any in-flight request for `key`.
    pub fn invalidate(&self, key: &QueryKey) {
        self.inner.in_flight.remove(key);
        self.inner.settled.remove(key);
    }

    /// Invalidate every key whose path starts with `prefix`.
    pub fn invalidate_prefix(&self, prefix: &str) {
        self.inner
            .in_flight
            .retain(|key, _| !key.path.starts_with(prefix));
        self.inner
            .settled
            .retain(|key, _| !key.path.starts_with(prefix));
        tracing::debug!(prefix, "Invalidated cached queries");
    }

    /// Invalidate everything.
    pub fn clear(&self) {
        self.inner.in_flight.clear();
        self.inner.settled.clear();
    }

    /// Number of settled entries.
    pub fn len(&self) -> usize {
        self.inner.settled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.settled.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use tokio::sync::oneshot;

    #[test]
    fn test_query_key_identity() {
        let a = QueryKey::get("/api/events")
            .param("sport", "Cycling")
            .param("location", "French Alps");
        let b = QueryKey::get("/api/events")
            .param("location", "French Alps")
            .param("sport", "Cycling");

        assert_eq!(a, b);
        assert_eq!(
            a.to_string(),
            "GET /api/events?location=French%20Alps&sport=Cycling"
        );
        assert_eq!(QueryKey::get("/api/events").to_string(), "GET /api/events");
    }

    #[tokio::test]
    async fn test_concurrent_fetches_share_one_request() {
        let cache: QueryCache<u32> = QueryCache::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let (release, gate) = oneshot::channel::<()>();

        let key = QueryKey::get("/api/events");
        let first = {
            let calls = calls.clone();
            cache.fetch(key.clone(), move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                let _ = gate.await;
                Ok(7)
            })
        };
        let second = {
            let calls = calls.clone();
            cache.fetch(key.clone(), move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(8)
            })
        };

        let releaser = async move {
            tokio::task::yield_now().await;
            let _ = release.send(());
        };
        let (a, b, ()) = tokio::join!(first, second, releaser);

        assert_eq!(a.unwrap(), 7);
        assert_eq!(b.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.get(&key), Some(7));
    }

    #[tokio::test]
    async fn test_failure_not_cached() {
        let cache: QueryCache<u32> = QueryCache::new();
        let key = QueryKey::get("/api/trips").param("userId", 1);

        let err = cache
            .fetch(key.clone(), || async {
                Err(ClientError::Network("connection refused".to_string()))
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Network(_)));
        assert!(cache.is_empty());

        let ok = cache.fetch(key.clone(), || async { Ok(3) }).await.unwrap();
        assert_eq!(ok, 3);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_invalidate_prefix() {
        let cache: QueryCache<u32> = QueryCache::new();
        let trips = QueryKey::get("/api/trips").param("userId", 1);
        let trip = QueryKey::get("/api/trips/4");
        let events = QueryKey::get("/api/events");

        for key in [&trips, &trip, &events] {
            cache.fetch(key.clone(), || async { Ok(1) }).await.unwrap();
        }
        cache.invalidate_prefix("/api/trips");

        assert_eq!(cache.get(&trips), None);
        assert_eq!(cache.get(&trip), None);
        assert_eq!(cache.get(&events), Some(1));
    }

    #[tokio::test]
    async fn test_invalidation_during_flight_discards_result() {
        let cache: QueryCache<u32> = QueryCache::new();
        let key = QueryKey::get("/api/reminders").param("userId", 1);
        let (release, gate) = oneshot::channel::<()>();

        let pending = cache.fetch(key.clone(), move || async move {
            let _ = gate.await;
            Ok(1)
        });
        let invalidate = async {
            tokio::task::yield_now().await;
            cache.invalidate(&key);
            let _ = release.send(());
        };
        let (stale, ()) = tokio::join!(pending, invalidate);

        // The original waiter still gets its answer...
        assert_eq!(stale.unwrap(), 1);
        // ...but the cache does not keep it.
        assert_eq!(cache.get(&key), None);

        let fresh = cache.fetch(key.clone(), || async { Ok(2) }).await.unwrap();
        assert_eq!(fresh, 2);
    }
}
