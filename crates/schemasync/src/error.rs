// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error type for the fallible edges of the crate.
//!
//! Metadata bookkeeping itself (`resolve`, `commit_pending`) never fails.
//! Errors only surface while validating configuration or building a
//! [`TypeSchema`](crate::TypeSchema) from caller-supplied field lists.

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure modes for configuration and schema construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// A [`ContextConfig`](crate::ContextConfig) value is out of range.
    InvalidConfig(String),

    // ========================================================================
    // Schema Errors
    // ========================================================================
    /// A field was declared with an empty name.
    EmptyFieldName {
        /// Type the field was declared on.
        type_name: String,
    },
    /// The same field name was declared twice on one type.
    DuplicateField {
        /// Type the field was declared on.
        type_name: String,
        /// Offending field name.
        field: String,
    },
    /// Two distinct field names map to the same wire field id.
    FieldIdCollision {
        /// Type the fields were declared on.
        type_name: String,
        /// Field declared first.
        first: String,
        /// Field that collided with it.
        second: String,
        /// Shared field id.
        field_id: i32,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            Error::EmptyFieldName { type_name } => {
                write!(f, "Empty field name on type {}", type_name)
            }
            Error::DuplicateField { type_name, field } => {
                write!(f, "Duplicate field '{}' on type {}", field, type_name)
            }
            Error::FieldIdCollision {
                type_name,
                first,
                second,
                field_id,
            } => write!(
                f,
                "Field id collision on type {}: '{}' and '{}' both hash to {}",
                type_name, first, second, field_id
            ),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = Error::InvalidConfig("pending_warn_threshold must be > 0".into());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: pending_warn_threshold must be > 0"
        );

        let err = Error::DuplicateField {
            type_name: "Point".into(),
            field: "x".into(),
        };
        assert_eq!(err.to_string(), "Duplicate field 'x' on type Point");

        let err = Error::FieldIdCollision {
            type_name: "Pair".into(),
            first: "c0".into(),
            second: "an".into(),
            field_id: 3117,
        };
        assert!(err.to_string().contains("3117"));
    }

    #[test]
    fn test_error_is_std_error() {
        fn assert_error<E: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<Error>();
    }
}
