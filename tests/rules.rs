#![forbid(unsafe_code)]
use simulateur::{
    evaluate, evaluate_rule_set, CondLogic, FieldValue, Rule, RuleAction, RuleCategory,
    RuleCondition, RuleContext, RuleField, RuleKind, RuleOperator, RuleSeverity,
};

fn cond(field: RuleField, operator: RuleOperator, value: FieldValue) -> RuleCondition {
    RuleCondition {
        field,
        operator,
        value,
        logic: None,
    }
}

fn chained(
    logic: CondLogic,
    field: RuleField,
    operator: RuleOperator,
    value: FieldValue,
) -> RuleCondition {
    RuleCondition {
        field,
        operator,
        value,
        logic: Some(logic),
    }
}

fn constraint(conditions: Vec<RuleCondition>) -> Rule {
    Rule {
        id: "max-gardes".into(),
        name: "Maximum 2 gardes consécutives".into(),
        description: None,
        category: RuleCategory::Safety,
        kind: RuleKind::Constraint,
        severity: RuleSeverity::Error,
        active: true,
        action: RuleAction::BlockAssignment,
        conditions,
    }
}

#[test]
fn truth_table_greater_than() {
    let rule = constraint(vec![cond(
        RuleField::ConsecutiveGuards,
        RuleOperator::GreaterThan,
        FieldValue::Number(2.0),
    )]);

    let matched = RuleContext::new().set(RuleField::ConsecutiveGuards, 3i64);
    assert!(evaluate(&rule, &matched));

    let unmatched = RuleContext::new().set(RuleField::ConsecutiveGuards, 2i64);
    assert!(!evaluate(&rule, &unmatched));
}

#[test]
fn and_combination_all_four_cases() {
    let rule = constraint(vec![
        cond(
            RuleField::ConsecutiveGuards,
            RuleOperator::GreaterThan,
            FieldValue::Number(2.0),
        ),
        chained(
            CondLogic::And,
            RuleField::RestHours,
            RuleOperator::LessThan,
            FieldValue::Number(11.0),
        ),
    ]);

    let cases = [
        (3i64, 8i64, true),
        (3, 24, false),
        (1, 8, false),
        (1, 24, false),
    ];
    for (guards, rest, expected) in cases {
        let ctx = RuleContext::new()
            .set(RuleField::ConsecutiveGuards, guards)
            .set(RuleField::RestHours, rest);
        assert_eq!(evaluate(&rule, &ctx), expected, "guards={guards} rest={rest}");
    }
}

#[test]
fn or_combination_matches_either_side() {
    let rule = constraint(vec![
        cond(
            RuleField::ConsecutiveGuards,
            RuleOperator::GreaterThan,
            FieldValue::Number(2.0),
        ),
        chained(
            CondLogic::Or,
            RuleField::RestHours,
            RuleOperator::LessThan,
            FieldValue::Number(11.0),
        ),
    ]);

    let left_only = RuleContext::new()
        .set(RuleField::ConsecutiveGuards, 3i64)
        .set(RuleField::RestHours, 24i64);
    assert!(evaluate(&rule, &left_only));

    let right_only = RuleContext::new()
        .set(RuleField::ConsecutiveGuards, 0i64)
        .set(RuleField::RestHours, 5i64);
    assert!(evaluate(&rule, &right_only));

    let neither = RuleContext::new()
        .set(RuleField::ConsecutiveGuards, 0i64)
        .set(RuleField::RestHours, 24i64);
    assert!(!evaluate(&rule, &neither));
}

#[test]
fn chain_evaluates_left_to_right_without_grouping() {
    // a OU b ET c se lit (a OU b) ET c, jamais a OU (b ET c)
    let rule = constraint(vec![
        cond(
            RuleField::ConsecutiveGuards,
            RuleOperator::GreaterThan,
            FieldValue::Number(2.0),
        ),
        chained(
            CondLogic::Or,
            RuleField::RestHours,
            RuleOperator::LessThan,
            FieldValue::Number(11.0),
        ),
        chained(
            CondLogic::And,
            RuleField::WeeklyHours,
            RuleOperator::GreaterThan,
            FieldValue::Number(48.0),
        ),
    ]);

    let ctx = RuleContext::new()
        .set(RuleField::ConsecutiveGuards, 3i64)
        .set(RuleField::RestHours, 24i64)
        .set(RuleField::WeeklyHours, 10i64);
    assert!(!evaluate(&rule, &ctx));
}

#[test]
fn missing_context_field_fails_closed() {
    let rule = constraint(vec![cond(
        RuleField::ConsecutiveGuards,
        RuleOperator::GreaterThan,
        FieldValue::Number(2.0),
    )]);
    assert!(!evaluate(&rule, &RuleContext::new()));
}

#[test]
fn contains_on_text_and_equals_on_role() {
    let rule = constraint(vec![
        cond(
            RuleField::StaffRole,
            RuleOperator::Equals,
            FieldValue::Text("MAR".into()),
        ),
        chained(
            CondLogic::And,
            RuleField::ShiftType,
            RuleOperator::Contains,
            FieldValue::Text("GARDE".into()),
        ),
    ]);
    let ctx = RuleContext::new()
        .set(RuleField::StaffRole, "MAR")
        .set(RuleField::ShiftType, "GARDE");
    assert!(evaluate(&rule, &ctx));
}

#[test]
fn validation_rejects_empty_conditions() {
    let rule = constraint(Vec::new());
    let err = rule.validate().unwrap_err();
    assert!(err.to_string().contains("condition"));
}

#[test]
fn validation_rejects_empty_name() {
    let mut rule = constraint(vec![cond(
        RuleField::RestHours,
        RuleOperator::LessThan,
        FieldValue::Number(11.0),
    )]);
    rule.name = "  ".into();
    assert!(rule.validate().is_err());
}

#[test]
fn validation_enforces_logic_placement() {
    let first_with_logic = constraint(vec![chained(
        CondLogic::And,
        RuleField::RestHours,
        RuleOperator::LessThan,
        FieldValue::Number(11.0),
    )]);
    assert!(first_with_logic.validate().is_err());

    let second_without_logic = constraint(vec![
        cond(
            RuleField::RestHours,
            RuleOperator::LessThan,
            FieldValue::Number(11.0),
        ),
        cond(
            RuleField::ConsecutiveGuards,
            RuleOperator::GreaterThan,
            FieldValue::Number(2.0),
        ),
    ]);
    assert!(second_without_logic.validate().is_err());
}

#[test]
fn validation_rejects_incompatible_operator() {
    let rule = constraint(vec![cond(
        RuleField::StaffRole,
        RuleOperator::LessThan,
        FieldValue::Text("MAR".into()),
    )]);
    assert!(rule.validate().is_err());
}

#[test]
fn rule_set_blocks_only_on_error_block_assignment() {
    let blocking = constraint(vec![cond(
        RuleField::ConsecutiveGuards,
        RuleOperator::GreaterThan,
        FieldValue::Number(2.0),
    )]);

    let mut notify = blocking.clone();
    notify.id = "notify".into();
    notify.action = RuleAction::Notify;
    notify.severity = RuleSeverity::Warning;

    let ctx = RuleContext::new().set(RuleField::ConsecutiveGuards, 3i64);
    let outcome = evaluate_rule_set(&[blocking, notify], &ctx);
    assert!(outcome.blocks());
    assert_eq!(outcome.blocked.len(), 1);
    assert_eq!(outcome.warnings.len(), 1);
}

#[test]
fn info_severity_block_assignment_never_blocks() {
    // anomalie de configuration : la sévérité prime sur l'action
    let mut rule = constraint(vec![cond(
        RuleField::ConsecutiveGuards,
        RuleOperator::GreaterThan,
        FieldValue::Number(2.0),
    )]);
    rule.severity = RuleSeverity::Info;

    let ctx = RuleContext::new().set(RuleField::ConsecutiveGuards, 3i64);
    let outcome = evaluate_rule_set(&[rule], &ctx);
    assert!(!outcome.blocks());
    assert_eq!(outcome.infos.len(), 1);
}

#[test]
fn inactive_and_recommendation_rules_are_ignored() {
    let mut inactive = constraint(vec![cond(
        RuleField::ConsecutiveGuards,
        RuleOperator::GreaterThan,
        FieldValue::Number(2.0),
    )]);
    inactive.active = false;

    let mut recommendation = constraint(vec![cond(
        RuleField::ConsecutiveGuards,
        RuleOperator::GreaterThan,
        FieldValue::Number(2.0),
    )]);
    recommendation.id = "suggestion".into();
    recommendation.kind = RuleKind::Recommendation;

    let ctx = RuleContext::new().set(RuleField::ConsecutiveGuards, 3i64);
    let outcome = evaluate_rule_set(&[inactive, recommendation], &ctx);
    assert!(!outcome.blocks());
    assert!(outcome.warnings.is_empty());
    assert!(outcome.infos.is_empty());
}
