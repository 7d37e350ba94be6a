//! Error types for unit construction.
//!
//! Validation never fails with an error; problems found in field values are
//! reported as [`Issue`](crate::Issue) data. These errors cover records that
//! cannot be turned into a unit at all.

use thiserror::Error;

/// A record could not be turned into a unit.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UnitError {
    /// The record names a field the unit type does not declare.
    #[error("{unit} unit has no field '{field}'")]
    UnknownField {
        /// Display name of the unit type.
        unit: &'static str,
        /// The undeclared field name.
        field: String,
    },

    /// The record sets the same field more than once.
    #[error("{unit} unit field '{field}' is given more than once")]
    DuplicateField {
        /// Display name of the unit type.
        unit: &'static str,
        /// The repeated field name.
        field: String,
    },

    /// A field value is not a string.
    #[error("{unit} unit field '{field}' must be a string, got {found}")]
    NonStringValue {
        /// Display name of the unit type.
        unit: &'static str,
        /// The field holding the bad value.
        field: String,
        /// JSON type name of the value that was found.
        found: &'static str,
    },

    /// The record is not a key/value object.
    #[error("{unit} unit record must be an object, got {found}")]
    NotAnObject {
        /// Display name of the unit type.
        unit: &'static str,
        /// JSON type name of the value that was found.
        found: &'static str,
    },
}
