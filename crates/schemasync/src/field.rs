// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Field descriptors exchanged in schema blocks.
//!
//! A [`FieldMetadata`] is the unit the peer learns about: one field name plus
//! its portable type tag. Identity is `(name, type tag)`, so a field whose
//! type changes between two versions of a type is a new field as far as the
//! peer is concerned.

use crate::config::NAME_HASH_MULTIPLIER;
use std::fmt;
use std::sync::Arc;

/// Portable wire type tag of a field.
///
/// Values are the portable protocol type codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum FieldType {
    // --- Primitives ---
    /// Signed 8-bit integer
    Byte = 1,
    /// Signed 16-bit integer
    Short = 2,
    /// Signed 32-bit integer
    Int = 3,
    /// Signed 64-bit integer
    Long = 4,
    /// 32-bit IEEE float
    Float = 5,
    /// 64-bit IEEE float
    Double = 6,
    /// UTF-16 code unit
    Char = 7,
    /// Boolean
    Bool = 8,

    // --- Well-known objects ---
    /// UTF-8 string
    String = 9,
    /// 128-bit UUID
    Uuid = 10,
    /// Milliseconds since epoch
    Date = 11,

    // --- Arrays ---
    /// Array of `Byte`
    ByteArray = 12,
    /// Array of `Short`
    ShortArray = 13,
    /// Array of `Int`
    IntArray = 14,
    /// Array of `Long`
    LongArray = 15,
    /// Array of `Float`
    FloatArray = 16,
    /// Array of `Double`
    DoubleArray = 17,
    /// Array of `Char`
    CharArray = 18,
    /// Array of `Bool`
    BoolArray = 19,
    /// Array of `String`
    StringArray = 20,
    /// Array of `Uuid`
    UuidArray = 21,
    /// Array of `Date`
    DateArray = 22,
    /// Array of arbitrary objects
    ObjectArray = 23,

    // --- Containers ---
    /// Collection
    Collection = 24,
    /// Map
    Map = 25,
    /// Single map entry
    MapEntry = 26,
    /// Nested portable object
    Portable = 27,
    /// Enum ordinal
    Enum = 28,
    /// Array of enum ordinals
    EnumArray = 29,
    /// Arbitrary-precision decimal
    Decimal = 30,
    /// Array of `Decimal`
    DecimalArray = 31,

    /// User object
    Object = 103,
}

impl FieldType {
    /// Wire code of this tag.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Map a wire code back to its tag.
    pub const fn from_code(code: u8) -> Option<Self> {
        let ty = match code {
            1 => Self::Byte,
            2 => Self::Short,
            3 => Self::Int,
            4 => Self::Long,
            5 => Self::Float,
            6 => Self::Double,
            7 => Self::Char,
            8 => Self::Bool,
            9 => Self::String,
            10 => Self::Uuid,
            11 => Self::Date,
            12 => Self::ByteArray,
            13 => Self::ShortArray,
            14 => Self::IntArray,
            15 => Self::LongArray,
            16 => Self::FloatArray,
            17 => Self::DoubleArray,
            18 => Self::CharArray,
            19 => Self::BoolArray,
            20 => Self::StringArray,
            21 => Self::UuidArray,
            22 => Self::DateArray,
            23 => Self::ObjectArray,
            24 => Self::Collection,
            25 => Self::Map,
            26 => Self::MapEntry,
            27 => Self::Portable,
            28 => Self::Enum,
            29 => Self::EnumArray,
            30 => Self::Decimal,
            31 => Self::DecimalArray,
            103 => Self::Object,
            _ => return None,
        };
        Some(ty)
    }

    /// Returns true for array tags.
    pub const fn is_array(self) -> bool {
        matches!(
            self,
            Self::ByteArray
                | Self::ShortArray
                | Self::IntArray
                | Self::LongArray
                | Self::FloatArray
                | Self::DoubleArray
                | Self::CharArray
                | Self::BoolArray
                | Self::StringArray
                | Self::UuidArray
                | Self::DateArray
                | Self::ObjectArray
                | Self::EnumArray
                | Self::DecimalArray
        )
    }
}

/// Lower-case name hash used for field ids and type ids.
///
/// 31-multiplier string hash over the UTF-16 code units of the name with
/// ASCII letters lower-cased, wrapping on overflow.
pub(crate) fn name_hash(name: &str) -> i32 {
    let mut hash: i32 = 0;
    for ch in name.chars() {
        let mut units = [0u16; 2];
        for unit in ch.to_ascii_lowercase().encode_utf16(&mut units) {
            hash = hash
                .wrapping_mul(NAME_HASH_MULTIPLIER)
                .wrapping_add(i32::from(*unit));
        }
    }
    hash
}

/// Immutable descriptor of one serialized field.
///
/// Cloning is cheap: the name is shared.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldMetadata {
    name: Arc<str>,
    field_type: FieldType,
}

impl FieldMetadata {
    /// Create a descriptor.
    pub fn new(name: impl Into<Arc<str>>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }

    /// Field name as declared.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Portable type tag.
    pub const fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// Wire field id derived from the name.
    pub fn field_id(&self) -> i32 {
        name_hash(&self.name)
    }
}

impl fmt::Debug for FieldMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:?}", self.name, self.field_type)
    }
}

impl fmt::Display for FieldMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
