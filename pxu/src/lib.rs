//! # pxu
//!
//! Unit records and field validation for test providers.
//!
//! Every artifact of a provider is described by a *unit*: a typed record
//! whose fields are checked by a declarative table of field validators.
//! [`FileUnit`] describes one file of a provider and carries its path and
//! [`FileRole`].
//!
//! ```rust
//! use pxu::{FileRole, FileUnit, Problem, Severity, check_unit};
//!
//! let unit = FileUnit::for_path("/provider/units/suite.txt", Some(FileRole::UnitSource));
//! let issues = check_unit(&unit);
//! assert_eq!(issues.len(), 1);
//! assert_eq!(issues[0].problem, Problem::Deprecated);
//! assert_eq!(issues[0].severity, Severity::Advice);
//! ```

pub mod error;
pub mod file;
pub mod record;
pub mod unit;
pub mod validation;
pub mod validators;


#[cfg(test)]
mod unit_tests;

// Re-export commonly used types
pub use error::UnitError;
pub use file::{FileField, FileRole, FileUnit, FileUnitValidator, UNIT_SOURCE_EXTENSION};
pub use pxu_symbol::{Symbol, SymbolError, Symbolic};
pub use record::UnitRecord;
pub use unit::{StockUnitValidator, Unit, UnitValidator, ValidatorTable, check_unit, evaluate_unit};
pub use validation::{Issue, Problem, Severity, Verdict};
pub use validators::FieldValidator;
