//! Error types for schema validation.

use thiserror::Error;

/// Error type for IR validation.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Field sizes and padding of a fixed struct do not add up to its size.
    #[error("struct '{name}' declares bytesize {declared} but its fields occupy {computed} bytes")]
    StructLayout {
        /// Struct name.
        name: String,
        /// Declared byte size.
        declared: usize,
        /// Sum of field sizes and padding.
        computed: usize,
    },

    /// Fixed struct size is not a multiple of its alignment.
    #[error("struct '{name}' has bytesize {bytesize} which is not a multiple of minalign {minalign}")]
    Alignment {
        /// Struct name.
        name: String,
        /// Declared byte size.
        bytesize: usize,
        /// Declared alignment.
        minalign: usize,
    },

    /// Enum values are not in ascending order.
    #[error("enum '{name}' value {value} is out of ascending order")]
    EnumOrder {
        /// Enum name.
        name: String,
        /// Offending value.
        value: i64,
    },

    /// Two enum members share a value.
    #[error("enum '{name}' declares value {value} more than once")]
    DuplicateEnumValue {
        /// Enum name.
        name: String,
        /// Duplicated value.
        value: i64,
    },

    /// Vector whose element is a bare union.
    #[error("field '{field}' of '{declaration}' is a vector of unions")]
    VectorOfUnion {
        /// Owning struct or table.
        declaration: String,
        /// Field name.
        field: String,
    },

    /// Vector whose element is itself a vector.
    #[error("field '{field}' of '{declaration}' is a vector of vectors")]
    NestedVector {
        /// Owning struct or table.
        declaration: String,
        /// Field name.
        field: String,
    },

    /// Root type id does not name a table of this IR.
    #[error("root type {index} does not name a table")]
    UnknownRoot {
        /// Index of the root declaration.
        index: usize,
    },

    /// Other validation failure.
    #[error("validation error: {message}")]
    Validation {
        /// Error message.
        message: String,
    },
}

impl SchemaError {
    /// Creates a vector-of-union error.
    pub fn vector_of_union(declaration: impl Into<String>, field: impl Into<String>) -> Self {
        Self::VectorOfUnion {
            declaration: declaration.into(),
            field: field.into(),
        }
    }

    /// Creates a nested vector error.
    pub fn nested_vector(declaration: impl Into<String>, field: impl Into<String>) -> Self {
        Self::NestedVector {
            declaration: declaration.into(),
            field: field.into(),
        }
    }

    /// Creates a generic validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}
