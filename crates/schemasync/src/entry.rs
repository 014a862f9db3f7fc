// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Per-type record of the fields the peer already knows.

use crate::delta::ClassMetadataDelta;
use crate::field::FieldMetadata;
use crate::type_key::TypeKey;
use std::collections::BTreeSet;

/// Fields of one type already acknowledged as sent.
///
/// The known set only grows: [`merge_fields`](Self::merge_fields) is the one
/// mutation path and it is a set union.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeMetadataEntry {
    known_fields: BTreeSet<FieldMetadata>,
}

impl TypeMetadataEntry {
    /// Entry whose known set is `fields`.
    pub fn from_fields(fields: BTreeSet<FieldMetadata>) -> Self {
        Self {
            known_fields: fields,
        }
    }

    /// Fields the peer knows.
    pub fn known_fields(&self) -> &BTreeSet<FieldMetadata> {
        &self.known_fields
    }

    /// Number of known fields.
    pub fn len(&self) -> usize {
        self.known_fields.len()
    }

    /// True when no field is known yet.
    pub fn is_empty(&self) -> bool {
        self.known_fields.is_empty()
    }

    /// True when every candidate field is already known.
    pub fn covers(&self, candidate: &BTreeSet<FieldMetadata>) -> bool {
        self.known_fields.is_superset(candidate)
    }

    /// Compute what of `candidate` still has to be sent.
    ///
    /// Returns `None` when the known set covers `candidate`: the caller sends
    /// [`ClassMetadataDelta::EMPTY`] and queues nothing. Otherwise returns a
    /// delta tagged with `type_key` carrying `candidate - known` only.
    pub fn compute_delta(
        &self,
        type_key: &TypeKey,
        candidate: &BTreeSet<FieldMetadata>,
    ) -> Option<ClassMetadataDelta> {
        if self.covers(candidate) {
            return None;
        }

        let new_fields: BTreeSet<FieldMetadata> = candidate
            .difference(&self.known_fields)
            .cloned()
            .collect();

        Some(ClassMetadataDelta::new(type_key.clone(), new_fields))
    }

    /// Union `fields` into the known set.
    ///
    /// Returns how many fields were not known before.
    pub fn merge_fields<'a, I>(&mut self, fields: I) -> usize
    where
        I: IntoIterator<Item = &'a FieldMetadata>,
    {
        fields
            .into_iter()
            .filter(|field| self.known_fields.insert((*field).clone()))
            .count()
    }
}
