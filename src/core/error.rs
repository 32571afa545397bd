use thiserror::Error;

use super::types::{Field, ValueKind};

/// Errors raised while validating an invoice record against the e-URA schema.
///
/// Validation is fail-fast: the first offending field in schema order is
/// reported and nothing is formatted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SchemaError {
    /// A required field is absent from the record.
    #[error("missing required field {field}")]
    MissingField {
        /// The absent field.
        field: Field,
    },

    /// The supplied value has a different runtime kind than the schema declares.
    #[error("invalid type for {field}: expected {expected}, got {actual}")]
    Type {
        /// The offending field.
        field: Field,
        /// Kind declared by the schema.
        expected: ValueKind,
        /// Kind actually supplied.
        actual: ValueKind,
    },

    /// A date whose year does not fit the four-digit `YYYY` payload slot.
    #[error("date out of range for {field}: year {year} is not in 0..=9999")]
    DateOutOfRange {
        /// The offending field.
        field: Field,
        /// The rejected year.
        year: i32,
    },

    /// The supplied value is not one of the field's legal enum values.
    #[error("invalid enum value for {field}: {value}")]
    InvalidEnum {
        /// The offending field.
        field: Field,
        /// The rejected value, rendered as text.
        value: String,
    },

    /// The schema table itself is defective for this field.
    ///
    /// Never produced by [`Schema::eura`](super::Schema::eura); reported by
    /// [`Schema::verify`](super::Schema::verify) for hand-assembled tables.
    #[error("unknown kind {kind} for field {field}")]
    UnknownKind {
        /// Field whose rule is ill-formed.
        field: Field,
        /// Description of the offending kind declaration.
        kind: String,
    },

    /// A field name that is not part of the e-URA schema.
    #[error("unknown field name {0:?}")]
    UnknownField(String),
}

impl SchemaError {
    /// The schema field the error refers to, if any.
    pub fn field(&self) -> Option<Field> {
        match self {
            Self::MissingField { field }
            | Self::Type { field, .. }
            | Self::DateOutOfRange { field, .. }
            | Self::InvalidEnum { field, .. }
            | Self::UnknownKind { field, .. } => Some(*field),
            Self::UnknownField(_) => None,
        }
    }
}
