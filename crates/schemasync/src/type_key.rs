// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Identity of a serialized type.

use crate::field::name_hash;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Identifies a serialized type within one connection.
///
/// Two keys are equal when both the type id and the name match. The id
/// defaults to the lower-case name hash; types registered with an explicit
/// id use [`TypeKey::with_id`].
#[derive(Clone, Eq)]
pub struct TypeKey {
    type_id: i32,
    name: Arc<str>,
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id && self.name == other.name
    }
}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
        self.name.hash(state);
    }
}

impl TypeKey {
    /// Key with the id derived from `name`.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        let name = name.into();
        Self {
            type_id: name_hash(&name),
            name,
        }
    }

    /// Key with an explicitly assigned id.
    pub fn with_id(name: impl Into<Arc<str>>, type_id: i32) -> Self {
        Self {
            type_id,
            name: name.into(),
        }
    }

    /// Key for a Rust type, named after [`std::any::type_name`].
    pub fn of<T: ?Sized>() -> Self {
        Self::new(std::any::type_name::<T>())
    }

    /// Wire type id.
    pub const fn type_id(&self) -> i32 {
        self.type_id
    }

    /// Type name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeKey({}#{})", self.name, self.type_id)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
