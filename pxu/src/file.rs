//! File units: one per file shipped in a provider.
//!
//! File units are generated by the provider itself, so nobody writes them by
//! hand. They exist for contextual validation of other units and, for now,
//! to advise against unit definitions in files without the `.pxu`
//! extension.

use std::fmt;
use std::sync::LazyLock;

use pxu_symbol::{Symbol, Symbolic, symbol_def};
use serde_json::Value;

use crate::error::UnitError;
use crate::record::UnitRecord;
use crate::unit::{Unit, UnitValidator, ValidatorTable};
use crate::validation::{Problem, Severity};
use crate::validators::FieldValidator;

/// Extension expected on files holding unit definitions.
pub const UNIT_SOURCE_EXTENSION: &str = "pxu";

/// Where the extension convention is documented.
pub const UNIT_SOURCE_EXTENSION_DOCS: &str =
    "http://plainbox.readthedocs.org/en/latest/author/faq.html#faq-1";

symbol_def! {
    /// Role a file plays within a provider.
    ///
    /// The set may grow; validators only ever ask whether a value is a known
    /// role.
    pub enum FileRole {
        /// Unit definitions.
        UnitSource = "unit-source",
        LegacyWhitelist = "legacy-whitelist",
        /// Architecture independent executable.
        Script = "script",
        /// Architecture dependent executable.
        Binary = "binary",
        Data = "data",
        /// Translation catalog.
        I18n = "i18n",
        /// Provider management script.
        ManagePy = "manage.py",
        /// License and copyright.
        Legal = "legal",
        Docs = "docs",
        /// Unclassified.
        Unknown = "unknown",
        /// Build artefact.
        Build = "build",
        /// A file that will never be used.
        Invalid = "invalid",
        /// Version control data.
        Vcs = "vcs",
        Src = "src",
    }
}

symbol_def! {
    /// Fields a file unit can have.
    pub enum FileField {
        /// Absolute path of the file.
        Path = "path",
        /// Role of the file within the provider.
        Role = "role",
        /// Base directory that relative paths are computed against.
        Base = "base",
    }
}

/// A single file of a provider.
#[derive(Clone, PartialEq, Eq)]
pub struct FileUnit {
    record: UnitRecord<FileField>,
    role: Option<Symbolic<FileRole>>,
}

impl FileUnit {
    /// Wrap a record, coercing its role through [`FileRole`].
    ///
    /// Roles outside the set are kept as-is so the role validator can report
    /// them; construction itself never fails on a field value.
    #[must_use]
    pub fn new(record: UnitRecord<FileField>) -> Self {
        let role = record
            .get(FileField::Role)
            .filter(|raw| !raw.is_empty())
            .map(Symbolic::parse);
        if let Some(Symbolic::Unknown(raw)) = &role {
            tracing::debug!(
                path = record.get(FileField::Path).unwrap_or_default(),
                role = raw.as_str(),
                "file unit has an unrecognized role"
            );
        }
        Self { record, role }
    }

    /// File unit for `path` with an already classified role.
    #[must_use]
    pub fn for_path(path: impl Into<String>, role: Option<FileRole>) -> Self {
        let record = UnitRecord::new().with(FileField::Path, path);
        let record = match role {
            Some(role) => record.with(FileField::Role, role.as_str()),
            None => record,
        };
        Self::new(record)
    }

    /// Build from `(field name, value)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`UnitError`] if a field name is not one of `path`, `role`,
    /// `base`, or is repeated.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, UnitError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        UnitRecord::from_pairs(Self::NAME, pairs).map(Self::new)
    }

    /// Build from a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`UnitError`] if `value` is not an object of string values
    /// keyed by declared field names.
    pub fn from_json(value: &Value) -> Result<Self, UnitError> {
        UnitRecord::from_json(Self::NAME, value).map(Self::new)
    }

    /// Absolute path of the file this unit describes, verbatim.
    ///
    /// Relative paths are usually wanted for display; see
    /// [`relative_path`](Self::relative_path).
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        self.record.get(FileField::Path)
    }

    /// Role of the file within the provider; `None` when unclassified.
    #[must_use]
    pub fn role(&self) -> Option<&Symbolic<FileRole>> {
        self.role.as_ref()
    }

    #[must_use]
    pub fn has_role(&self, role: FileRole) -> bool {
        self.role.as_ref().is_some_and(|r| *r == role)
    }

    #[must_use]
    pub fn base(&self) -> Option<&str> {
        self.record.get(FileField::Base)
    }

    /// The path with the base directory stripped.
    ///
    /// Pure string operation. A path outside the base, or a unit without a
    /// base, yields the path unchanged.
    #[must_use]
    pub fn relative_path(&self) -> Option<&str> {
        let path = self.path()?;
        let Some(base) = self.base().filter(|b| !b.is_empty()) else {
            return Some(path);
        };
        let Some(rest) = path.strip_prefix(base) else {
            return Some(path);
        };
        if base.ends_with('/') {
            Some(rest)
        } else {
            Some(rest.strip_prefix('/').unwrap_or(path))
        }
    }
}

impl fmt::Display for FileUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path().unwrap_or_default())
    }
}

impl fmt::Debug for FileUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.path().unwrap_or_default();
        match &self.role {
            Some(role) => write!(f, "<FileUnit path:{path:?}, role:{:?}>", role.as_str()),
            None => write!(f, "<FileUnit path:{path:?}, role:None>"),
        }
    }
}

impl Unit for FileUnit {
    type Field = FileField;
    type Validator = FileUnitValidator;

    const NAME: &'static str = "file";
    const VALIDATOR: FileUnitValidator = FileUnitValidator;

    fn record(&self) -> &UnitRecord<FileField> {
        &self.record
    }

    fn field_validators() -> &'static ValidatorTable<Self> {
        &FILE_FIELD_VALIDATORS
    }
}

/// Explanations for file units.
///
/// Same as the stock rendering without the `field '...'` prefix: file units
/// are generated, so the notion of a field would only confuse readers.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileUnitValidator;

impl UnitValidator<FileUnit> for FileUnitValidator {
    fn explain(
        &self,
        _unit: &FileUnit,
        _field: FileField,
        problem: Problem,
        message: &str,
    ) -> Option<String> {
        if message.is_empty() {
            self.stock_message(problem).map(ToOwned::to_owned)
        } else {
            Some(message.to_owned())
        }
    }
}

static FILE_FIELD_VALIDATORS: LazyLock<ValidatorTable<FileUnit>> = LazyLock::new(|| {
    ValidatorTable::new()
        .field(
            FileField::Path,
            [FieldValidator::correct_value(has_unit_source_extension)
                .with_problem(Problem::Deprecated)
                .with_severity(Severity::Advice)
                .only_if(is_unit_source)
                .with_message(format!(
                    "please use .{UNIT_SOURCE_EXTENSION} as an extension for all files \
                     with unit definitions, see: {UNIT_SOURCE_EXTENSION_DOCS}"
                ))],
        )
        .field(
            FileField::Role,
            [FieldValidator::correct_value(is_role_or_unset).with_message(format!(
                "valid values are: {}",
                FileRole::sorted_identifiers().join(", ")
            ))],
        )
});

fn is_unit_source(unit: &FileUnit) -> bool {
    unit.has_role(FileRole::UnitSource)
}

/// An empty role means "unclassified", not a bad role.
fn is_role_or_unset(raw: &str) -> bool {
    raw.is_empty() || FileRole::is_member(raw)
}

fn has_unit_source_extension(path: &str) -> bool {
    path_extension(path) == Some(UNIT_SOURCE_EXTENSION)
}

/// Extension of the last path component, without the dot.
///
/// Works on the raw string: trailing separators and `.` components are not
/// tidied away, and leading dots of the component do not start an extension.
fn path_extension(path: &str) -> Option<&str> {
    let name = path.rsplit('/').next().unwrap_or(path);
    let stem = name.trim_start_matches('.');
    stem.rsplit_once('.').map(|(_, ext)| ext)
}
