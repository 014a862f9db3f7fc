// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Counters for one serialization context.
//!
//! All fields use relaxed atomics: readers only need monotonic snapshots for
//! observability, never a consistent cut across counters.

use std::sync::atomic::{AtomicU64, Ordering};

/// Live counters updated on the resolve and commit paths.
#[derive(Debug, Default)]
pub struct ContextStats {
    resolves: AtomicU64,
    first_seen: AtomicU64,
    empty_hits: AtomicU64,
    deltas_enqueued: AtomicU64,
    deltas_committed: AtomicU64,
    deltas_discarded: AtomicU64,
    fields_committed: AtomicU64,
    commit_passes: AtomicU64,
}

/// Point-in-time copy of [`ContextStats`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// `resolve` calls.
    pub resolves: u64,
    /// Resolves that found no cache entry for the type.
    pub first_seen: u64,
    /// Resolves answered with the empty delta.
    pub empty_hits: u64,
    /// Deltas placed on the pending queue.
    pub deltas_enqueued: u64,
    /// Deltas folded into the cache.
    pub deltas_committed: u64,
    /// Deltas dropped by `discard_pending`.
    pub deltas_discarded: u64,
    /// Fields that became known through commits.
    pub fields_committed: u64,
    /// `commit_pending` calls that drained at least one delta.
    pub commit_passes: u64,
}

impl ContextStats {
    /// Zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub(crate) fn record_resolve(&self, first_seen: bool) {
        self.resolves.fetch_add(1, Ordering::Relaxed);
        if first_seen {
            self.first_seen.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[inline]
    pub(crate) fn record_empty_hit(&self) {
        self.empty_hits.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_enqueued(&self) {
        self.deltas_enqueued.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_committed(&self, deltas: u64, new_fields: u64) {
        self.deltas_committed.fetch_add(deltas, Ordering::Relaxed);
        self.fields_committed.fetch_add(new_fields, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_commit_pass(&self) {
        self.commit_passes.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_discarded(&self, deltas: u64) {
        self.deltas_discarded.fetch_add(deltas, Ordering::Relaxed);
    }

    /// Copy the current counters.
    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            resolves: self.resolves.load(Ordering::Relaxed),
            first_seen: self.first_seen.load(Ordering::Relaxed),
            empty_hits: self.empty_hits.load(Ordering::Relaxed),
            deltas_enqueued: self.deltas_enqueued.load(Ordering::Relaxed),
            deltas_committed: self.deltas_committed.load(Ordering::Relaxed),
            deltas_discarded: self.deltas_discarded.load(Ordering::Relaxed),
            fields_committed: self.fields_committed.load(Ordering::Relaxed),
            commit_passes: self.commit_passes.load(Ordering::Relaxed),
        }
    }
}
