//! The generic unit model: the [`Unit`] trait every unit type implements,
//! explanation rendering through [`UnitValidator`], the declarative
//! [`ValidatorTable`], and a driver that runs any unit's table.
//!
//! New unit types are added by declaring a field set, a table and a display
//! name; nothing in the driver is specific to one unit type.

use std::fmt;

use pxu_symbol::Symbol;

use crate::record::UnitRecord;
use crate::validation::{Issue, Problem, Verdict};
use crate::validators::FieldValidator;

/// A typed record describing one artifact of a provider.
pub trait Unit: Sized + 'static {
    /// Names of the fields this unit type declares.
    type Field: Symbol;

    /// Renders explanations for violations found on this unit type.
    type Validator: UnitValidator<Self>;

    /// Human-readable name of the unit type.
    const NAME: &'static str;

    const VALIDATOR: Self::Validator;

    /// The raw field values of this unit.
    fn record(&self) -> &UnitRecord<Self::Field>;

    /// Field validators of this unit type, built once per process.
    fn field_validators() -> &'static ValidatorTable<Self>;

    /// The raw value of `field`, if set.
    fn get_record_value(&self, field: Self::Field) -> Option<&str> {
        self.record().get(field)
    }
}

/// Turns a detected violation into the text shown to the user.
pub trait UnitValidator<U: Unit> {
    /// Message used when a validator has no message of its own.
    fn stock_message(&self, problem: Problem) -> Option<&'static str> {
        stock_message(problem)
    }

    /// Render the explanation for a violation of `problem` on `field`.
    ///
    /// Prefers `message`, then the stock message for `problem`. Returns
    /// `None` when neither exists; the violation still stands, it just has
    /// no text.
    fn explain(
        &self,
        _unit: &U,
        field: U::Field,
        problem: Problem,
        message: &str,
    ) -> Option<String> {
        let text = if message.is_empty() {
            self.stock_message(problem)?
        } else {
            message
        };
        Some(format!("field '{field}', {text}"))
    }
}

/// Explanation rendering shared by unit types without special needs.
#[derive(Debug, Clone, Copy, Default)]
pub struct StockUnitValidator;

impl<U: Unit> UnitValidator<U> for StockUnitValidator {}

/// Stock message for each problem kind.
#[must_use]
pub fn stock_message(problem: Problem) -> Option<&'static str> {
    Some(match problem {
        Problem::Missing => "required field missing",
        Problem::Wrong => "incorrect value supplied",
        Problem::Useless => "definition useless in this context",
        Problem::Deprecated => "deprecated field used",
        Problem::Constant => "value must be variant (parametrized)",
        Problem::Variable => "value must be invariant (unparametrized)",
        Problem::UnknownParam => "field refers to unknown parameter",
        Problem::NotUnique => "field value is not unique",
        Problem::ExpectedI18n => "field should be marked as translatable",
        Problem::UnexpectedI18n => "field should not be marked as translatable",
        Problem::SyntaxError => "syntax error inside the field",
        Problem::BadReference => "bad reference to another unit",
    })
}

/// Field validators of one unit type, in registration order per field.
pub struct ValidatorTable<U: Unit> {
    entries: Vec<(U::Field, Vec<FieldValidator<U>>)>,
}

impl<U: Unit> Default for ValidatorTable<U> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<U: Unit> ValidatorTable<U> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `validators` to the list for `field`.
    #[must_use]
    pub fn field(
        mut self,
        field: U::Field,
        validators: impl IntoIterator<Item = FieldValidator<U>>,
    ) -> Self {
        if let Some((_, list)) = self.entries.iter_mut().find(|(f, _)| *f == field) {
            list.extend(validators);
        } else {
            self.entries.push((field, validators.into_iter().collect()));
        }
        self
    }

    /// Validators registered for `field`; empty if there are none.
    #[must_use]
    pub fn for_field(&self, field: U::Field) -> &[FieldValidator<U>] {
        match self.entries.iter().find(|(f, _)| *f == field) {
            Some((_, list)) => list,
            None => &[],
        }
    }

    /// Fields that have at least one registration, in registration order.
    pub fn fields(&self) -> impl Iterator<Item = U::Field> + '_ {
        self.entries.iter().map(|(field, _)| *field)
    }

    /// Total number of validators across all fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.iter().map(|(_, list)| list.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<U: Unit> fmt::Debug for ValidatorTable<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(field, list)| (field.as_str(), list)))
            .finish()
    }
}

/// Run every validator registered for `unit`'s type.
///
/// Fields are visited in field-set declaration order and validators in
/// registration order, so the output is reproducible.
#[must_use]
pub fn evaluate_unit<U: Unit>(unit: &U) -> Vec<(U::Field, Verdict)> {
    let table = U::field_validators();
    let mut verdicts = Vec::with_capacity(table.len());
    for &field in U::Field::ALL {
        for validator in table.for_field(field) {
            let verdict = validator.evaluate(unit, field);
            tracing::trace!(
                unit = U::NAME,
                field = field.as_str(),
                ?verdict,
                "evaluated field validator"
            );
            verdicts.push((field, verdict));
        }
    }
    verdicts
}

/// Issues found on `unit`; empty when every applicable validator passed.
#[must_use]
pub fn check_unit<U: Unit>(unit: &U) -> Vec<Issue> {
    let issues: Vec<Issue> = evaluate_unit(unit)
        .into_iter()
        .filter_map(|(_, verdict)| verdict.into_issue())
        .collect();
    if !issues.is_empty() {
        tracing::debug!(unit = U::NAME, issues = issues.len(), "unit failed validation");
    }
    issues
}
