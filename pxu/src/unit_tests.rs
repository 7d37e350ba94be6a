#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::use_debug)]
mod tests {
    use std::sync::LazyLock;

    use pxu_symbol::symbol_def;

    use crate::record::UnitRecord;
    use crate::unit::{
        StockUnitValidator, Unit, UnitValidator, ValidatorTable, check_unit, evaluate_unit,
        stock_message,
    };
    use crate::validation::{Problem, Severity, Verdict};
    use crate::validators::FieldValidator;

    // ---- a unit type declared purely as data ----

    symbol_def! {
        enum NoteField {
            Id = "id",
            Summary = "summary",
            Requires = "requires",
        }
    }

    struct NoteUnit {
        record: UnitRecord<NoteField>,
    }

    impl NoteUnit {
        fn new(pairs: &[(&str, &str)]) -> Self {
            Self {
                record: UnitRecord::from_pairs(Self::NAME, pairs.iter().copied()).unwrap(),
            }
        }
    }

    fn has_id(unit: &NoteUnit) -> bool {
        unit.get_record_value(NoteField::Id).is_some()
    }

    static NOTE_VALIDATORS: LazyLock<ValidatorTable<NoteUnit>> = LazyLock::new(|| {
        ValidatorTable::new()
            .field(
                NoteField::Id,
                [FieldValidator::correct_value(|v| !v.contains(' '))],
            )
            .field(
                NoteField::Summary,
                [FieldValidator::correct_value(|v| v.len() <= 10)
                    .with_problem(Problem::Useless)
                    .with_severity(Severity::Warning)
                    .with_message("summary too long")
                    .only_if(has_id)],
            )
            .field(
                NoteField::Summary,
                [FieldValidator::correct_value(|v| !v.ends_with('.'))
                    .with_severity(Severity::Advice)],
            )
    });

    impl Unit for NoteUnit {
        type Field = NoteField;
        type Validator = StockUnitValidator;

        const NAME: &'static str = "note";
        const VALIDATOR: StockUnitValidator = StockUnitValidator;

        fn record(&self) -> &UnitRecord<NoteField> {
            &self.record
        }

        fn field_validators() -> &'static ValidatorTable<Self> {
            &NOTE_VALIDATORS
        }
    }

    // ---- a unit type whose validator lacks some stock messages ----

    symbol_def! {
        enum LinkField {
            Target = "target",
        }
    }

    struct LinkUnit {
        record: UnitRecord<LinkField>,
    }

    struct TerseValidator;

    impl UnitValidator<LinkUnit> for TerseValidator {
        fn stock_message(&self, problem: Problem) -> Option<&'static str> {
            (problem == Problem::Missing).then_some("target missing")
        }
    }

    static LINK_VALIDATORS: LazyLock<ValidatorTable<LinkUnit>> = LazyLock::new(|| {
        ValidatorTable::new().field(
            LinkField::Target,
            [
                FieldValidator::correct_value(|v| v.starts_with("unit:"))
                    .with_problem(Problem::BadReference),
                FieldValidator::correct_value(|v| v != "unit:")
                    .with_problem(Problem::Missing),
            ],
        )
    });

    impl Unit for LinkUnit {
        type Field = LinkField;
        type Validator = TerseValidator;

        const NAME: &'static str = "link";
        const VALIDATOR: TerseValidator = TerseValidator;

        fn record(&self) -> &UnitRecord<LinkField> {
            &self.record
        }

        fn field_validators() -> &'static ValidatorTable<Self> {
            &LINK_VALIDATORS
        }
    }

    fn link(target: &str) -> LinkUnit {
        LinkUnit {
            record: UnitRecord::new().with(LinkField::Target, target),
        }
    }

    // ---- table ----

    #[test]
    fn test_table_appends_per_field() {
        let table = NoteUnit::field_validators();
        assert_eq!(table.len(), 3);
        assert_eq!(table.for_field(NoteField::Summary).len(), 2);
        assert!(table.for_field(NoteField::Requires).is_empty());
        assert_eq!(
            table.fields().collect::<Vec<_>>(),
            vec![NoteField::Id, NoteField::Summary]
        );
    }

    #[test]
    fn test_table_debug_lists_fields() {
        let rendered = format!("{:?}", NoteUnit::field_validators());
        assert!(rendered.contains("\"summary\""), "got: {rendered}");
        assert!(rendered.contains("Useless"), "got: {rendered}");
    }

    // ---- driver ----

    #[test]
    fn test_clean_unit_has_no_issues() {
        let unit = NoteUnit::new(&[("id", "n1"), ("summary", "short")]);
        assert!(check_unit(&unit).is_empty());
    }

    #[test]
    fn test_verdicts_in_declaration_order() {
        let unit = NoteUnit::new(&[("id", "n 1"), ("summary", "a long summary.")]);
        let verdicts = evaluate_unit(&unit);
        let fields: Vec<NoteField> = verdicts.iter().map(|(f, _)| *f).collect();
        assert_eq!(
            fields,
            vec![NoteField::Id, NoteField::Summary, NoteField::Summary]
        );
        assert!(verdicts.iter().all(|(_, v)| v.is_violation()));
    }

    #[test]
    fn test_stock_message_gets_field_prefix() {
        let unit = NoteUnit::new(&[("id", "has space")]);
        let issues = check_unit(&unit);
        assert_eq!(issues.len(), 1);
        let issue = &issues[0];
        assert_eq!(issue.unit, "note");
        assert_eq!(issue.field, "id");
        assert_eq!(issue.problem, Problem::Wrong);
        assert_eq!(issue.severity, Severity::Error);
        assert_eq!(
            issue.message.as_deref(),
            Some("field 'id', incorrect value supplied")
        );
    }

    #[test]
    fn test_custom_message_wins_over_stock() {
        let unit = NoteUnit::new(&[("id", "n1"), ("summary", "far too long")]);
        let issues = check_unit(&unit);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].problem, Problem::Useless);
        assert_eq!(issues[0].severity, Severity::Warning);
        assert_eq!(
            issues[0].message.as_deref(),
            Some("field 'summary', summary too long")
        );
    }

    #[test]
    fn test_guard_makes_validator_not_applicable() {
        // Summary is too long, but without an id the length rule is inert.
        let unit = NoteUnit::new(&[("summary", "far too long")]);
        let verdicts = evaluate_unit(&unit);
        let summary: Vec<&Verdict> = verdicts
            .iter()
            .filter(|(f, _)| *f == NoteField::Summary)
            .map(|(_, v)| v)
            .collect();
        assert_eq!(summary[0], &Verdict::NotApplicable);
        assert_eq!(summary[1], &Verdict::Passed);
    }

    #[test]
    fn test_absent_value_passes_but_is_applicable() {
        let unit = NoteUnit::new(&[("id", "n1")]);
        let verdicts = evaluate_unit(&unit);
        assert!(verdicts.iter().all(|(_, v)| *v == Verdict::Passed));
        assert!(verdicts.iter().all(|(_, v)| v.is_applicable()));
    }

    #[test]
    fn test_empty_value_goes_through_predicate() {
        // The id rule accepts "", so an empty id is fine.
        let unit = NoteUnit::new(&[("id", "")]);
        assert!(check_unit(&unit).is_empty());

        // The target rule does not, so an empty target is a violation.
        let issues = check_unit(&link(""));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].problem, Problem::BadReference);

        let verdicts = evaluate_unit(&link(""));
        assert!(verdicts[0].1.is_violation());
        assert_eq!(verdicts[1].1, Verdict::Passed);
    }

    // ---- explain ----

    #[test]
    fn test_explain_prefers_custom_message() {
        let unit = NoteUnit::new(&[]);
        let text =
            StockUnitValidator.explain(&unit, NoteField::Id, Problem::Deprecated, "custom text");
        assert_eq!(text.as_deref(), Some("field 'id', custom text"));
    }

    #[test]
    fn test_explain_falls_back_to_stock() {
        let unit = NoteUnit::new(&[]);
        let text = StockUnitValidator.explain(&unit, NoteField::Id, Problem::Deprecated, "");
        assert_eq!(text.as_deref(), Some("field 'id', deprecated field used"));
    }

    #[test]
    fn test_explain_without_any_message_is_none() {
        let unit = link("x");
        assert_eq!(
            TerseValidator.explain(&unit, LinkField::Target, Problem::BadReference, ""),
            None
        );
        assert_eq!(
            TerseValidator
                .explain(&unit, LinkField::Target, Problem::Missing, "")
                .as_deref(),
            Some("field 'target', target missing")
        );
    }

    #[test]
    fn test_violation_without_message_is_still_reported() {
        let issues = check_unit(&link("elsewhere"));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].problem, Problem::BadReference);
        assert_eq!(issues[0].message, None);
    }

    #[test]
    fn test_stock_message_for_every_problem() {
        use pxu_symbol::Symbol;

        for problem in Problem::ALL {
            assert!(stock_message(*problem).is_some(), "no stock for {problem}");
        }
        let issues = check_unit(&link("unit:"));
        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0].message.as_deref(),
            Some("field 'target', target missing")
        );
    }
}
