//! Read-through snapshot of the whole ring log.
//!
//! Invalidated by `RingEventLog` on every append and clear, and treated as
//! stale whenever the store fingerprint differs from the one it was built on.

use crate::db::store::StoreStamp;
use crate::models::ring_event::RingEvent;
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct LogCache {
    snapshot: Option<(StoreStamp, Arc<Vec<RingEvent>>)>,
}

impl LogCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached events if they were built on exactly `stamp`.
    pub fn get(&self, stamp: &StoreStamp) -> Option<Arc<Vec<RingEvent>>> {
        match &self.snapshot {
            Some((s, events)) if s == stamp => Some(Arc::clone(events)),
            _ => None,
        }
    }

    pub fn fill(&mut self, stamp: StoreStamp, events: Vec<RingEvent>) -> Arc<Vec<RingEvent>> {
        let events = Arc::new(events);
        self.snapshot = Some((stamp, Arc::clone(&events)));
        events
    }

    pub fn invalidate(&mut self) {
        self.snapshot = None;
    }

    pub fn is_warm(&self) -> bool {
        self.snapshot.is_some()
    }
}
