//! Append-only ring log with a coherent read cache.

use crate::config::Config;
use crate::db::cache::LogCache;
use crate::db::store::{LogStore, open_store};
use crate::errors::{AppError, AppResult};
use crate::models::filter::RingFilter;
use crate::models::ring_event::RingEvent;
use std::sync::{Arc, Mutex, MutexGuard};

/// Owns the durable store and its cache. Safe to share between threads:
/// writes are serialised and every write invalidates the cache before
/// returning, so a query issued after a successful `append` sees the event.
pub struct RingEventLog {
    store: Box<dyn LogStore>,
    cache: Mutex<LogCache>,
    writer: Mutex<()>,
}

impl RingEventLog {
    pub fn new(store: Box<dyn LogStore>) -> Self {
        Self {
            store,
            cache: Mutex::new(LogCache::new()),
            writer: Mutex::new(()),
        }
    }

    /// Log backed by the store the configuration selects.
    pub fn open(cfg: &Config) -> Self {
        Self::new(open_store(cfg))
    }

    pub fn store(&self) -> &dyn LogStore {
        self.store.as_ref()
    }

    /// Persist one event. Any storage problem is a `Storage` error: the ring
    /// must not be reported as done.
    pub fn append(&self, event: &RingEvent) -> AppResult<()> {
        let _w = lock(&self.writer)?;
        let res = self.store.append(event);
        lock(&self.cache)?.invalidate();
        res.map_err(|e| AppError::Storage(e.to_string()))
    }

    /// Discard the whole log.
    pub fn clear(&self) -> AppResult<()> {
        let _w = lock(&self.writer)?;
        let res = self.store.clear();
        lock(&self.cache)?.invalidate();
        res
    }

    /// Full materialised log, in append order.
    pub fn snapshot(&self) -> AppResult<Arc<Vec<RingEvent>>> {
        let mut cache = lock(&self.cache)?;
        let stamp = self.store.stamp();

        if let Some(events) = cache.get(&stamp) {
            return Ok(events);
        }

        let events = self.store.load();
        Ok(cache.fill(stamp, events))
    }

    /// Events matching `filter`; order is append order.
    pub fn query(&self, filter: &RingFilter) -> AppResult<Vec<RingEvent>> {
        let all = self.snapshot()?;
        Ok(filter.apply(&all))
    }
}

fn lock<T>(m: &Mutex<T>) -> AppResult<MutexGuard<'_, T>> {
    m.lock()
        .map_err(|_| AppError::Other("ring log lock poisoned".into()))
}
