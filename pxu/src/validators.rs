//! Field validators: a predicate on one raw field value, classified by
//! problem and severity, optionally guarded by a condition on the unit.

use std::fmt;

use pxu_symbol::Symbol;

use crate::unit::{Unit, UnitValidator};
use crate::validation::{Issue, Problem, Severity, Verdict};

/// Correctness check on a raw field value.
pub type Predicate = fn(&str) -> bool;

/// Applicability check on the whole unit.
pub type Guard<U> = fn(&U) -> bool;

/// One rule attached to one field of unit type `U`.
///
/// Applicability (the guard) is kept apart from correctness (the predicate)
/// so a field can host several rules that activate under different
/// conditions.
pub struct FieldValidator<U: Unit> {
    predicate: Predicate,
    problem: Problem,
    severity: Severity,
    message: String,
    onlyif: Option<Guard<U>>,
}

impl<U: Unit> FieldValidator<U> {
    /// A validator that flags values for which `predicate` returns `false`.
    ///
    /// Defaults: problem [`Problem::Wrong`], severity [`Severity::Error`],
    /// empty message (the unit validator's stock message is used), no guard.
    #[must_use]
    pub fn correct_value(predicate: Predicate) -> Self {
        Self {
            predicate,
            problem: Problem::Wrong,
            severity: Severity::Error,
            message: String::new(),
            onlyif: None,
        }
    }

    #[must_use]
    pub fn with_problem(mut self, problem: Problem) -> Self {
        self.problem = problem;
        self
    }

    #[must_use]
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Custom explanation. An empty message falls back to the stock one.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Only check units for which `guard` returns `true`.
    #[must_use]
    pub fn only_if(mut self, guard: Guard<U>) -> Self {
        self.onlyif = Some(guard);
        self
    }

    #[must_use]
    pub fn problem(&self) -> Problem {
        self.problem
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Whether the guard (if any) accepts `unit`.
    #[must_use]
    pub fn applies_to(&self, unit: &U) -> bool {
        self.onlyif.is_none_or(|guard| guard(unit))
    }

    /// Check `field` of `unit`.
    ///
    /// A rejected guard yields [`Verdict::NotApplicable`] whatever the value.
    /// Absent values pass: absence is not a correctness failure. An empty
    /// value is present and goes through the predicate like any other.
    #[must_use]
    pub fn evaluate(&self, unit: &U, field: U::Field) -> Verdict {
        if !self.applies_to(unit) {
            return Verdict::NotApplicable;
        }

        let Some(value) = unit.get_record_value(field) else {
            return Verdict::Passed;
        };

        if (self.predicate)(value) {
            return Verdict::Passed;
        }

        let message = U::VALIDATOR.explain(unit, field, self.problem, &self.message);
        Verdict::Violated(Issue {
            unit: U::NAME,
            field: field.as_str(),
            problem: self.problem,
            severity: self.severity,
            message,
        })
    }
}

impl<U: Unit> fmt::Debug for FieldValidator<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldValidator")
            .field("problem", &self.problem)
            .field("severity", &self.severity)
            .field("message", &self.message)
            .field("guarded", &self.onlyif.is_some())
            .finish_non_exhaustive()
    }
}
