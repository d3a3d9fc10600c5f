//! Collection counters for the current page session.
//!
//! Counters are atomic so the host can read a consistent snapshot at any
//! time without coordinating with the tracker.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Counters for the current session.
#[derive(Debug, Default)]
pub struct CollectionStats {
    /// Interactions handed to the tracker
    interactions_seen: AtomicU64,
    /// Interactions suppressed by a do-not-track marker
    dnt_suppressed: AtomicU64,
    /// Interactions suppressed because the element was not visible
    invisible_suppressed: AtomicU64,
    /// Events fully enriched
    events_enriched: AtomicU64,
    /// Events accepted by the host pipeline
    events_dispatched: AtomicU64,
    /// Events dropped at handoff
    events_dropped: AtomicU64,
}

impl CollectionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_interaction_seen(&self) {
        self.interactions_seen.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_dnt_suppressed(&self) {
        self.dnt_suppressed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_invisible_suppressed(&self) {
        self.invisible_suppressed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_event_enriched(&self) {
        self.events_enriched.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_event_dispatched(&self) {
        self.events_dispatched.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_event_dropped(&self) {
        self.events_dropped.fetch_add(1, Ordering::Relaxed);
    }

    /// Get the current counter snapshot.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            interactions_seen: self.interactions_seen.load(Ordering::Relaxed),
            dnt_suppressed: self.dnt_suppressed.load(Ordering::Relaxed),
            invisible_suppressed: self.invisible_suppressed.load(Ordering::Relaxed),
            events_enriched: self.events_enriched.load(Ordering::Relaxed),
            events_dispatched: self.events_dispatched.load(Ordering::Relaxed),
            events_dropped: self.events_dropped.load(Ordering::Relaxed),
            taken_at: Utc::now(),
        }
    }

    /// Get a summary string for display.
    pub fn summary(&self) -> String {
        let snapshot = self.snapshot();
        format!(
            "Session statistics:\n\
             - Interactions seen: {}\n\
             - Suppressed (do-not-track): {}\n\
             - Suppressed (not visible): {}\n\
             - Events enriched: {}\n\
             - Events dispatched: {}\n\
             - Events dropped: {}",
            snapshot.interactions_seen,
            snapshot.dnt_suppressed,
            snapshot.invisible_suppressed,
            snapshot.events_enriched,
            snapshot.events_dispatched,
            snapshot.events_dropped
        )
    }

    /// Reset all counters.
    pub fn reset(&self) {
        self.interactions_seen.store(0, Ordering::Relaxed);
        self.dnt_suppressed.store(0, Ordering::Relaxed);
        self.invisible_suppressed.store(0, Ordering::Relaxed);
        self.events_enriched.store(0, Ordering::Relaxed);
        self.events_dispatched.store(0, Ordering::Relaxed);
        self.events_dropped.store(0, Ordering::Relaxed);
    }
}

/// Snapshot of the session counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub interactions_seen: u64,
    pub dnt_suppressed: u64,
    pub invisible_suppressed: u64,
    pub events_enriched: u64,
    pub events_dispatched: u64,
    pub events_dropped: u64,
    pub taken_at: DateTime<Utc>,
}

/// Shared handle to the session counters.
pub type SharedCollectionStats = Arc<CollectionStats>;

/// Create a new shared counter set.
pub fn create_shared_stats() -> SharedCollectionStats {
    Arc::new(CollectionStats::new())
}
