// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Schema deltas: the fields of a type the peer has not seen yet.
//!
//! Every delta returned by [`SerializationContext::resolve`] is either the
//! [`ClassMetadataDelta::EMPTY`] sentinel (nothing to embed in the outgoing
//! schema block) or a delta tagged with its type and carrying exactly the
//! fields that are still unknown to the peer.
//!
//! [`SerializationContext::resolve`]: crate::SerializationContext::resolve

use crate::field::FieldMetadata;
use crate::type_key::TypeKey;
use std::collections::btree_set;
use std::collections::BTreeSet;

/// Fields of one type that still have to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassMetadataDelta {
    type_key: Option<TypeKey>,
    fields: BTreeSet<FieldMetadata>,
}

impl ClassMetadataDelta {
    /// "Nothing to send". Type-agnostic, never queued, never merged.
    pub const EMPTY: ClassMetadataDelta = ClassMetadataDelta {
        type_key: None,
        fields: BTreeSet::new(),
    };

    /// Delta for `type_key` carrying `fields`.
    pub fn new(type_key: TypeKey, fields: BTreeSet<FieldMetadata>) -> Self {
        Self {
            type_key: Some(type_key),
            fields,
        }
    }

    /// True for the [`EMPTY`](Self::EMPTY) sentinel.
    ///
    /// A type seen for the first time with no fields at all still yields a
    /// tagged, non-empty delta: the peer has to learn that the type exists.
    pub fn is_empty(&self) -> bool {
        self.type_key.is_none()
    }

    /// Type this delta describes (`None` for the sentinel).
    pub fn type_key(&self) -> Option<&TypeKey> {
        self.type_key.as_ref()
    }

    /// New fields, in stable order.
    pub fn fields(&self) -> &BTreeSet<FieldMetadata> {
        &self.fields
    }

    /// Number of new fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Iterate the new fields.
    pub fn iter(&self) -> btree_set::Iter<'_, FieldMetadata> {
        self.fields.iter()
    }

    pub(crate) fn into_parts(self) -> Option<(TypeKey, BTreeSet<FieldMetadata>)> {
        let type_key = self.type_key?;
        Some((type_key, self.fields))
    }
}

impl Default for ClassMetadataDelta {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl<'a> IntoIterator for &'a ClassMetadataDelta {
    type Item = &'a FieldMetadata;
    type IntoIter = btree_set::Iter<'a, FieldMetadata>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
