// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Constants and per-connection configuration.
//!
//! # Architecture
//!
//! - **Level 1 (Static)**: protocol constants (hash parameters, defaults)
//! - **Level 2 (Dynamic)**: [`ContextConfig`] handed to
//!   [`SerializationContext::with_config`](crate::SerializationContext::with_config)
//!
//! # Example
//!
//! ```
//! use schemasync::{CommitPolicy, ContextConfig, SerializationContext};
//!
//! let config = ContextConfig::default()
//!     .with_commit_policy(CommitPolicy::OnFlush)
//!     .with_pending_warn_threshold(256);
//! let ctx = SerializationContext::with_config(config)?;
//! assert_eq!(ctx.pending_len(), 0);
//! # Ok::<(), schemasync::Error>(())
//! ```

use crate::error::{Error, Result};

// =======================================================================
// Portable protocol hash parameters
// =======================================================================

/// FNV offset basis used to seed schema ids.
pub const FNV1_OFFSET_BASIS: u32 = 0x811C_9DC5;

/// FNV prime used to fold each field-id byte into a schema id.
pub const FNV1_PRIME: u32 = 0x0100_0193;

/// Multiplier of the lower-case name hash used for field and type ids.
pub const NAME_HASH_MULTIPLIER: i32 = 31;

// =======================================================================
// Runtime defaults
// =======================================================================

/// Pending-queue depth above which a warning is logged.
///
/// The queue is expected to stay bounded by the number of distinct types in
/// one batch. Crossing this depth means the connection driver is not
/// calling `commit_pending`.
pub const DEFAULT_PENDING_WARN_THRESHOLD: usize = 1024;

/// Number of type entries pre-allocated in the known-metadata cache.
pub const DEFAULT_INITIAL_CAPACITY: usize = 64;

/// When resolved deltas become part of the known-metadata cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommitPolicy {
    /// Deltas are staged and only folded in by `commit_pending`, which the
    /// driver calls once the transport accepted the write.
    #[default]
    OnFlush,
    /// Deltas are folded into the cache as soon as `resolve` returns them.
    ///
    /// Saves the commit call but assumes every resolved message reaches the
    /// peer. A dropped message leaves the peer missing fields for good.
    Immediate,
}

/// Configuration of a [`SerializationContext`](crate::SerializationContext).
#[derive(Debug, Clone)]
pub struct ContextConfig {
    /// Commit discipline for resolved deltas (default: `OnFlush`).
    pub commit_policy: CommitPolicy,
    /// Pending-queue depth that triggers a backlog warning (default: 1024).
    pub pending_warn_threshold: usize,
    /// Pre-allocated cache capacity (default: 64).
    pub initial_capacity: usize,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            commit_policy: CommitPolicy::OnFlush,
            pending_warn_threshold: DEFAULT_PENDING_WARN_THRESHOLD,
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
        }
    }
}

impl ContextConfig {
    /// Set the commit policy.
    #[must_use]
    pub fn with_commit_policy(mut self, policy: CommitPolicy) -> Self {
        self.commit_policy = policy;
        self
    }

    /// Set the backlog warning threshold.
    #[must_use]
    pub fn with_pending_warn_threshold(mut self, threshold: usize) -> Self {
        self.pending_warn_threshold = threshold;
        self
    }

    /// Set the pre-allocated cache capacity.
    #[must_use]
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<()> {
        if self.pending_warn_threshold == 0 {
            return Err(Error::InvalidConfig(
                "pending_warn_threshold must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}
