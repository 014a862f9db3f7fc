// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # schemasync - Incremental schema metadata for portable serialization
//!
//! Tracks, per connection, which field descriptors of each serialized type
//! the remote peer has already received, so the binary protocol only ships
//! schema information that changed.
//!
//! ## Quick Start
//!
//! ```rust
//! use schemasync::{FieldType, SerializationContext, TypeKey, TypeSchema};
//!
//! let ctx = SerializationContext::new();
//!
//! let v1 = TypeSchema::builder(TypeKey::new("Point"))
//!     .field("x", FieldType::Double)
//!     .field("y", FieldType::Double)
//!     .build()?;
//!
//! // Serializer: embed the delta in the outgoing schema block.
//! let delta = ctx.resolve_schema(&v1);
//! assert_eq!(delta.len(), 2);
//!
//! // Driver: the write was accepted, the peer now knows x and y.
//! ctx.commit_pending();
//! assert!(ctx.resolve_schema(&v1).is_empty());
//!
//! // Schema evolution: only the new field travels.
//! let v2 = TypeSchema::builder(TypeKey::new("Point"))
//!     .field("x", FieldType::Double)
//!     .field("y", FieldType::Double)
//!     .field("z", FieldType::Double)
//!     .build()?;
//! let delta = ctx.resolve_schema(&v2);
//! assert_eq!(delta.iter().map(|f| f.name()).collect::<Vec<_>>(), ["z"]);
//! # Ok::<(), schemasync::Error>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +-------------------------------------------------------------------+
//! |  SerializationContext (one per connection)                        |
//! |    resolve()  ──► DashMap<TypeKey, TypeMetadataEntry>             |
//! |        │                                                          |
//! |        └──────► SegQueue<ClassMetadataDelta> ──► commit_pending() |
//! +-------------------------------------------------------------------+
//! |  TypeSchema / FieldMetadata / TypeKey (value objects)             |
//! +-------------------------------------------------------------------+
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`SerializationContext`] | Known-field cache and pending deltas of one connection |
//! | [`ClassMetadataDelta`] | Fields still to be sent for a type, or the empty sentinel |
//! | [`TypeMetadataEntry`] | Fields of one type the peer already knows |
//! | [`TypeSchema`] | Validated field layout of a type |
//! | [`FieldMetadata`] | One field: name and portable type tag |
//!
//! ## Logging
//!
//! Emits through the [`log`] facade (`debug` for first use of a type and
//! commit passes, `trace` per queued delta, `warn` when deltas pile up
//! without commits). Install any `log` backend to see them.

/// Constants and per-connection configuration.
pub mod config;
/// Per-connection schema-metadata synchronization.
pub mod context;
/// Schema deltas.
pub mod delta;
/// Per-type known-field records.
pub mod entry;
/// Error type.
pub mod error;
/// Field descriptors and portable type tags.
pub mod field;
/// Validated type layouts.
pub mod schema;
/// Context counters.
pub mod stats;
/// Type identity.
pub mod type_key;

pub use config::{CommitPolicy, ContextConfig};
pub use context::SerializationContext;
pub use delta::ClassMetadataDelta;
pub use entry::TypeMetadataEntry;
pub use error::{Error, Result};
pub use field::{FieldMetadata, FieldType};
pub use schema::{schema_id, TypeSchema, TypeSchemaBuilder};
pub use stats::{ContextStats, StatsSnapshot};
pub use type_key::TypeKey;
