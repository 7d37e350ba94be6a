//! Problem and severity vocabulary shared by every unit type, and the
//! records produced when a field validator fires.

use pxu_symbol::symbol_def;
use serde::Serialize;

symbol_def! {
    /// Classification of what is wrong with a field.
    pub enum Problem {
        /// A required field is absent.
        Missing = "missing",
        /// The field value is incorrect.
        Wrong = "wrong",
        /// The field has no effect in its context.
        Useless = "useless",
        /// The field or its value is deprecated.
        Deprecated = "deprecated",
        /// The value must be parametrized but is constant.
        Constant = "constant",
        /// The value must be constant but is parametrized.
        Variable = "variable",
        /// The value refers to a parameter that does not exist.
        UnknownParam = "unknown-param",
        /// The value must be unique but is not.
        NotUnique = "not-unique",
        /// The field should be marked as translatable.
        ExpectedI18n = "expected-i18n",
        /// The field should not be marked as translatable.
        UnexpectedI18n = "unexpected-i18n",
        /// The value cannot be parsed.
        SyntaxError = "syntax-error",
        /// The value refers to a unit that does not exist.
        BadReference = "bad-reference",
    }
}

symbol_def! {
    /// How serious a detected problem is.
    pub enum Severity {
        /// The unit cannot be used as written.
        Error = "error",
        /// The unit works but is probably not what the author meant.
        Warning = "warning",
        /// A style or convention recommendation.
        Advice = "advice",
    }
}

impl Severity {
    /// Rank used for thresholds: advice < warning < error.
    ///
    /// Symbol ordering is by identifier and says nothing about seriousness,
    /// so thresholds compare weights instead.
    #[must_use]
    pub const fn weight(self) -> u8 {
        match self {
            Self::Advice => 0,
            Self::Warning => 1,
            Self::Error => 2,
        }
    }

    /// Whether this severity reaches `threshold`.
    #[must_use]
    pub const fn at_least(self, threshold: Self) -> bool {
        self.weight() >= threshold.weight()
    }
}

/// A violation detected by a field validator, with its rendered explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub struct Issue {
    /// Display name of the unit type (e.g. `file`).
    pub unit: &'static str,
    /// The offending field.
    pub field: &'static str,
    /// What is wrong.
    pub problem: Problem,
    /// How serious it is.
    pub severity: Severity,
    /// Rendered explanation. `None` when neither the validator nor the unit
    /// validator has a message for this problem kind.
    pub message: Option<String>,
}

impl Issue {
    /// Format the issue for human-readable output.
    ///
    /// `{severity}: {message} [{problem}]`, or, when there is no explanation,
    /// `{severity}: [{problem}] (field '{field}')`.
    #[must_use]
    pub fn format_human_readable(&self) -> String {
        match &self.message {
            Some(message) => format!("{}: {message} [{}]", self.severity, self.problem),
            None => format!(
                "{}: [{}] (field '{}')",
                self.severity, self.problem, self.field
            ),
        }
    }
}

/// Outcome of evaluating one field validator against one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The validator's guard rejected the unit; nothing was checked.
    NotApplicable,
    /// The validator applied and the value is acceptable.
    Passed,
    /// The validator applied and the value is not acceptable.
    Violated(Issue),
}

impl Verdict {
    #[must_use]
    pub fn is_violation(&self) -> bool {
        matches!(self, Self::Violated(_))
    }

    #[must_use]
    pub fn is_applicable(&self) -> bool {
        !matches!(self, Self::NotApplicable)
    }

    #[must_use]
    pub fn into_issue(self) -> Option<Issue> {
        match self {
            Self::Violated(issue) => Some(issue),
            Self::NotApplicable | Self::Passed => None,
        }
    }
}
