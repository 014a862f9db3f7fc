// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Validated field layouts handed to the serialization context.
//!
//! The type-introspection side of the serializer describes each type's
//! current shape as a [`TypeSchema`]. Building one checks the layout the way
//! the peer will: field names must be non-empty and unique, and no two names
//! may map to the same wire field id.
//!
//! ```
//! use schemasync::{FieldType, TypeKey, TypeSchema};
//!
//! let schema = TypeSchema::builder(TypeKey::new("Point"))
//!     .field("x", FieldType::Int)
//!     .field("y", FieldType::Int)
//!     .build()?;
//!
//! assert_eq!(schema.fields().len(), 2);
//! assert_ne!(schema.schema_id(), 0);
//! # Ok::<(), schemasync::Error>(())
//! ```

use crate::config::{FNV1_OFFSET_BASIS, FNV1_PRIME};
use crate::error::{Error, Result};
use crate::field::{FieldMetadata, FieldType};
use crate::type_key::TypeKey;
use std::collections::{BTreeSet, HashMap};

/// Current shape of one type: its key plus fields in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSchema {
    type_key: TypeKey,
    fields: Vec<FieldMetadata>,
    field_set: BTreeSet<FieldMetadata>,
    schema_id: i32,
}

impl TypeSchema {
    /// Start describing `type_key`.
    pub fn builder(type_key: TypeKey) -> TypeSchemaBuilder {
        TypeSchemaBuilder {
            type_key,
            fields: Vec::new(),
        }
    }

    /// Type this schema describes.
    pub fn type_key(&self) -> &TypeKey {
        &self.type_key
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[FieldMetadata] {
        &self.fields
    }

    /// Fields as the candidate set passed to `resolve`.
    pub fn field_set(&self) -> &BTreeSet<FieldMetadata> {
        &self.field_set
    }

    /// Layout id over the field ids in declaration order.
    pub const fn schema_id(&self) -> i32 {
        self.schema_id
    }
}

/// Builder for [`TypeSchema`].
#[derive(Debug, Clone)]
pub struct TypeSchemaBuilder {
    type_key: TypeKey,
    fields: Vec<FieldMetadata>,
}

impl TypeSchemaBuilder {
    /// Append a field.
    #[must_use]
    pub fn field(mut self, name: &str, field_type: FieldType) -> Self {
        self.fields.push(FieldMetadata::new(name, field_type));
        self
    }

    /// Append an already built descriptor.
    #[must_use]
    pub fn field_metadata(mut self, field: FieldMetadata) -> Self {
        self.fields.push(field);
        self
    }

    /// Validate the layout and compute its schema id.
    pub fn build(self) -> Result<TypeSchema> {
        let type_name = self.type_key.name();
        let mut by_id: HashMap<i32, &str> = HashMap::with_capacity(self.fields.len());

        for field in &self.fields {
            let name = field.name();
            if name.is_empty() {
                return Err(Error::EmptyFieldName {
                    type_name: type_name.to_string(),
                });
            }

            let field_id = field.field_id();
            if let Some(first) = by_id.insert(field_id, name) {
                if first == name {
                    return Err(Error::DuplicateField {
                        type_name: type_name.to_string(),
                        field: name.to_string(),
                    });
                }
                return Err(Error::FieldIdCollision {
                    type_name: type_name.to_string(),
                    first: first.to_string(),
                    second: name.to_string(),
                    field_id,
                });
            }
        }

        let schema_id = schema_id(self.fields.iter().map(FieldMetadata::field_id));
        let field_set = self.fields.iter().cloned().collect();

        Ok(TypeSchema {
            type_key: self.type_key,
            fields: self.fields,
            field_set,
            schema_id,
        })
    }
}

/// Fold field ids into a schema id.
///
/// Each little-endian byte of each id is xor-ed into the running hash, then
/// multiplied by the FNV prime. No fields means id `0`.
pub fn schema_id<I>(field_ids: I) -> i32
where
    I: IntoIterator<Item = i32>,
{
    let mut hash = FNV1_OFFSET_BASIS;
    let mut any = false;

    for field_id in field_ids {
        any = true;
        for byte in field_id.to_le_bytes() {
            hash ^= u32::from(byte);
            hash = hash.wrapping_mul(FNV1_PRIME);
        }
    }

    if any {
        hash as i32
    } else {
        0
    }
}
