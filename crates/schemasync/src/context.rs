// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Per-connection schema-metadata synchronization.
//!
//! A [`SerializationContext`] remembers, for every type serialized over one
//! connection, which fields the peer already knows. Serializer threads call
//! [`resolve`](SerializationContext::resolve) before encoding an object and
//! embed the returned delta in the message's schema block. Once the
//! transport accepted the write, the connection driver calls
//! [`commit_pending`](SerializationContext::commit_pending) so those fields
//! stop being re-sent.
//!
//! # Concurrency
//!
//! - **Known cache**: `DashMap` keyed by [`TypeKey`]; unrelated types live in
//!   different shards and never contend.
//! - **Pending queue**: crossbeam `SegQueue`, lock-free multi-producer append
//!   from `resolve`, drained by `commit_pending`.
//! - **Commit**: each delta is folded with one entry upsert, so the
//!   absent-check and the insert are atomic per type.
//!
//! ```text
//!   resolve(T, F) ──► cache[T]? ──► F - known ──► pending.push(delta)
//!                                                       │
//!   commit_pending() ◄── write accepted by transport ◄──┘
//!        └─► cache[T] ∪= delta.fields
//! ```
//!
//! # Example
//!
//! ```
//! use schemasync::{FieldType, SerializationContext, TypeKey, TypeSchema};
//!
//! let ctx = SerializationContext::new();
//! let point = TypeSchema::builder(TypeKey::new("Point"))
//!     .field("x", FieldType::Int)
//!     .field("y", FieldType::Int)
//!     .build()?;
//!
//! let delta = ctx.resolve_schema(&point);
//! assert_eq!(delta.len(), 2);
//!
//! ctx.commit_pending();
//! assert!(ctx.resolve_schema(&point).is_empty());
//! # Ok::<(), schemasync::Error>(())
//! ```

use crate::config::{CommitPolicy, ContextConfig};
use crate::delta::ClassMetadataDelta;
use crate::entry::TypeMetadataEntry;
use crate::error::Result;
use crate::field::FieldMetadata;
use crate::schema::TypeSchema;
use crate::stats::{ContextStats, StatsSnapshot};
use crate::type_key::TypeKey;
use crossbeam::queue::SegQueue;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};

/// Schema-metadata state of one connection.
#[derive(Debug)]
pub struct SerializationContext {
    /// Fields the peer is known to have, per type.
    cache: DashMap<TypeKey, TypeMetadataEntry>,
    /// Deltas handed out by `resolve` and not yet folded into `cache`.
    pending: SegQueue<ClassMetadataDelta>,
    config: ContextConfig,
    stats: ContextStats,
    /// Set once the backlog warning fired, cleared by the next commit.
    backlog_warned: AtomicBool,
}

impl Default for SerializationContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SerializationContext {
    /// Context with the default configuration.
    pub fn new() -> Self {
        Self::build(ContextConfig::default())
    }

    /// Context with a validated custom configuration.
    pub fn with_config(config: ContextConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: ContextConfig) -> Self {
        Self {
            cache: DashMap::with_capacity(config.initial_capacity),
            pending: SegQueue::new(),
            config,
            stats: ContextStats::new(),
            backlog_warned: AtomicBool::new(false),
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    /// Fields of `fields` the peer does not know yet, for `type_key`.
    ///
    /// Returns [`ClassMetadataDelta::EMPTY`] when every field is known.
    /// Otherwise returns a delta tagged with `type_key` and, under
    /// [`CommitPolicy::OnFlush`], queues it for the next
    /// [`commit_pending`](Self::commit_pending). A type with no cache entry
    /// gets the whole candidate set.
    ///
    /// Safe to call from many threads for the same or different types.
    /// Two threads racing on a type's first use may both receive the full
    /// set; the duplicate is harmless since commits are unions.
    pub fn resolve(
        &self,
        type_key: &TypeKey,
        fields: &BTreeSet<FieldMetadata>,
    ) -> ClassMetadataDelta {
        // The shard guard must be released before any commit below touches
        // the same shard.
        let computed = match self.cache.get(type_key) {
            Some(entry) => {
                self.stats.record_resolve(false);
                entry.compute_delta(type_key, fields)
            }
            None => {
                self.stats.record_resolve(true);
                log::debug!(
                    "[SerializationContext::resolve] first use of {:?} ({} fields)",
                    type_key,
                    fields.len()
                );
                Some(ClassMetadataDelta::new(type_key.clone(), fields.clone()))
            }
        };

        let Some(delta) = computed else {
            self.stats.record_empty_hit();
            return ClassMetadataDelta::EMPTY;
        };

        match self.config.commit_policy {
            CommitPolicy::OnFlush => self.enqueue(delta.clone()),
            CommitPolicy::Immediate => {
                let added = self.fold(delta.clone());
                self.stats.record_committed(1, added as u64);
            }
        }

        delta
    }

    /// [`resolve`](Self::resolve) for a built [`TypeSchema`].
    pub fn resolve_schema(&self, schema: &TypeSchema) -> ClassMetadataDelta {
        self.resolve(schema.type_key(), schema.field_set())
    }

    /// Fold every queued delta into the known cache.
    ///
    /// Drains the deltas present when the call starts. Deltas queued by
    /// concurrent `resolve` calls meanwhile are left for the next pass.
    /// Returns the number of deltas folded.
    pub fn commit_pending(&self) -> usize {
        let budget = self.pending.len();
        let mut drained = 0usize;
        let mut new_fields = 0usize;

        for _ in 0..budget {
            // A concurrent commit may have taken part of our budget.
            let Some(delta) = self.pending.pop() else {
                break;
            };
            new_fields += self.fold(delta);
            drained += 1;
        }

        self.backlog_warned.store(false, Ordering::Relaxed);

        if drained > 0 {
            self.stats.record_committed(drained as u64, new_fields as u64);
            self.stats.record_commit_pass();
            log::debug!(
                "[SerializationContext::commit_pending] committed {} deltas, {} new fields, {} types known",
                drained,
                new_fields,
                self.cache.len()
            );
        }

        drained
    }

    /// Drop every queued delta without committing it.
    ///
    /// For a driver whose write failed: the dropped fields will simply be
    /// resolved as new again and re-sent. Returns the number dropped.
    pub fn discard_pending(&self) -> usize {
        let mut dropped = 0usize;
        while self.pending.pop().is_some() {
            dropped += 1;
        }

        self.backlog_warned.store(false, Ordering::Relaxed);

        if dropped > 0 {
            self.stats.record_discarded(dropped as u64);
            log::debug!(
                "[SerializationContext::discard_pending] dropped {} deltas",
                dropped
            );
        }

        dropped
    }

    /// Fields of `type_key` the peer is known to have.
    pub fn known_fields(&self, type_key: &TypeKey) -> Option<BTreeSet<FieldMetadata>> {
        self.cache
            .get(type_key)
            .map(|entry| entry.known_fields().clone())
    }

    /// True when `type_key` has a committed entry.
    pub fn is_known(&self, type_key: &TypeKey) -> bool {
        self.cache.contains_key(type_key)
    }

    /// Number of types with a committed entry.
    pub fn known_type_count(&self) -> usize {
        self.cache.len()
    }

    /// Number of deltas waiting for a commit.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Copy of the counters.
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Forget everything; the next resolve of any type starts from scratch.
    ///
    /// For a connection that re-handshakes with a fresh peer.
    pub fn clear(&self) {
        let dropped = self.discard_pending();
        self.cache.clear();
        log::debug!(
            "[SerializationContext::clear] cache reset ({} pending deltas dropped)",
            dropped
        );
    }

    fn enqueue(&self, delta: ClassMetadataDelta) {
        log::trace!(
            "[SerializationContext::resolve] queued {} new fields for {:?}",
            delta.len(),
            delta.type_key()
        );
        self.pending.push(delta);
        self.stats.record_enqueued();

        let depth = self.pending.len();
        if depth >= self.config.pending_warn_threshold
            && !self.backlog_warned.swap(true, Ordering::Relaxed)
        {
            log::warn!(
                "[schemasync] {} schema deltas pending without commit; full field sets keep being re-sent",
                depth
            );
        }
    }

    /// Union one delta into its type's entry. Returns the count of fields
    /// that were not known before.
    fn fold(&self, delta: ClassMetadataDelta) -> usize {
        let Some((type_key, fields)) = delta.into_parts() else {
            return 0;
        };

        match self.cache.entry(type_key) {
            Entry::Occupied(mut occupied) => occupied.get_mut().merge_fields(&fields),
            Entry::Vacant(vacant) => {
                let added = fields.len();
                vacant.insert(TypeMetadataEntry::from_fields(fields));
                added
            }
        }
    }
}
