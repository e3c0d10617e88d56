#![forbid(unsafe_code)]
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use simulateur::{
    check_eligibility, detect_conflicts, fill_assignments, rank_candidates, Assignment,
    AssignmentCategory, AssignmentId, AssignmentStatus, CheckOptions, ConflictKind,
    EligibilityScore, FieldValue, LeavePeriod, Post, Roster, Rule, RuleAction, RuleCategory,
    RuleCondition, RuleField, RuleKind, RuleOperator, RuleSeverity, Staff, StaffId, StaffRole,
};

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 11, day).unwrap()
}

fn mar(handle: &str) -> Staff {
    let mut staff = Staff::new(handle, handle.to_uppercase(), StaffRole::Mar);
    staff.id = StaffId::new(handle);
    staff
}

fn garde(id: &str, day: u32, assigned: Vec<StaffId>) -> Assignment {
    let start = Utc.with_ymd_and_hms(2025, 11, day, 8, 0, 0).unwrap();
    Assignment {
        id: AssignmentId::new(id),
        date: date(day),
        period_id: "p-jour".into(),
        slot_id: "s-garde".into(),
        category: AssignmentCategory::Garde,
        start,
        end: start + Duration::hours(24),
        post: Post::new(StaffRole::Mar, 1, 1),
        status: if assigned.is_empty() {
            AssignmentStatus::Unresolved
        } else {
            AssignmentStatus::Assigned
        },
        assigned,
    }
}

#[test]
fn leave_overrides_rotation_fairness() {
    let mut staff = mar("alice");
    staff.leaves.push(
        LeavePeriod::new(
            Utc.with_ymd_and_hms(2025, 11, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 11, 10, 0, 0, 0).unwrap(),
        )
        .unwrap(),
    );

    // aucun historique : sans congé, alice serait recommandée
    let target = garde("g1", 3, Vec::new());
    let eligibility = check_eligibility(&staff, &target, &[], CheckOptions::default());
    assert_eq!(eligibility.score, EligibilityScore::NotEligible);
    assert!(!eligibility.is_eligible());

    let ranked = rank_candidates(&[staff], &target, &[], CheckOptions::default());
    assert_eq!(ranked[0].1.score, EligibilityScore::NotEligible);
}

#[test]
fn recent_same_category_assignment_is_not_recommended() {
    let staff = mar("alice");
    let history = vec![garde("h1", 1, vec![staff.id.clone()])];

    let target = garde("g1", 4, Vec::new());
    let eligibility = check_eligibility(&staff, &target, &history, CheckOptions::default());
    assert_eq!(eligibility.score, EligibilityScore::NotRecommended);
    // déconseillé mais mobilisable en dernier recours
    assert!(eligibility.is_eligible());
}

#[test]
fn wrong_role_is_not_eligible() {
    let iade = Staff::new("ibrahim", "Ibrahim", StaffRole::Iade);
    let target = garde("g1", 3, Vec::new());
    let eligibility = check_eligibility(&iade, &target, &[], CheckOptions::default());
    assert_eq!(eligibility.score, EligibilityScore::NotEligible);
}

#[test]
fn oldest_rotation_becomes_recommended() {
    let alice = mar("alice");
    let bob = mar("bob");
    let carol = mar("carol");
    let history = vec![
        // alice : il y a 10 jours, apte ; carol : il y a 3 jours, déconseillée
        garde("h1", 3, vec![alice.id.clone()]),
        garde("h2", 10, vec![carol.id.clone()]),
    ];

    let target = garde("g1", 13, Vec::new());
    let ranked = rank_candidates(
        &[alice.clone(), bob.clone(), carol.clone()],
        &target,
        &history,
        CheckOptions::default(),
    );

    // bob n'a jamais été affecté : repos le plus long, recommandé
    assert_eq!(ranked[0].0, bob.id);
    assert_eq!(ranked[0].1.score, EligibilityScore::Recommended);
    assert_eq!(ranked[1].0, alice.id);
    assert_eq!(ranked[1].1.score, EligibilityScore::Eligible);
    assert_eq!(ranked[2].0, carol.id);
    assert_eq!(ranked[2].1.score, EligibilityScore::NotRecommended);
}

#[test]
fn rank_ties_break_on_staff_id() {
    let a = mar("aaa");
    let b = mar("bbb");
    let target = garde("g1", 3, Vec::new());
    let ranked = rank_candidates(&[b, a], &target, &[], CheckOptions::default());
    assert_eq!(ranked[0].0.as_str(), "aaa");
    assert_eq!(ranked[0].1.score, EligibilityScore::Recommended);
}

#[test]
fn detects_double_booking_overlap() {
    let alice = mar("alice");
    let roster = Roster {
        staff: vec![alice.clone()],
    };
    let mut second = garde("g2", 3, vec![alice.id.clone()]);
    second.slot_id = "s-bis".into();
    let assignments = vec![garde("g1", 3, vec![alice.id.clone()]), second];

    let conflicts = detect_conflicts(&assignments, &roster, CheckOptions::default());
    assert!(conflicts
        .iter()
        .any(|c| c.kind == ConflictKind::SchedulingConflict && c.staff == Some(alice.id.clone())));
}

#[test]
fn detects_rest_violation_between_close_shifts() {
    let alice = mar("alice");
    let roster = Roster {
        staff: vec![alice.clone()],
    };
    // garde de 24 h puis reprise 2 h plus tard
    let first = garde("g1", 3, vec![alice.id.clone()]);
    let mut second = garde("g2", 4, vec![alice.id.clone()]);
    second.start = first.end + Duration::hours(2);
    second.end = second.start + Duration::hours(8);

    let conflicts = detect_conflicts(&[first, second], &roster, CheckOptions::default());
    assert!(conflicts.iter().any(|c| c.kind == ConflictKind::RestViolation));
}

#[test]
fn detects_coverage_gap_for_unfilled_required_post() {
    let roster = Roster { staff: Vec::new() };
    let assignments = vec![garde("g1", 3, Vec::new())];
    let conflicts = detect_conflicts(&assignments, &roster, CheckOptions::default());
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].kind, ConflictKind::CoverageGap);

    // poste optionnel : pas de rupture de couverture
    let mut optional = garde("g2", 3, Vec::new());
    optional.post.required = false;
    let conflicts = detect_conflicts(&[optional], &roster, CheckOptions::default());
    assert!(conflicts.is_empty());
}

#[test]
fn detects_specialty_mismatch() {
    let mut ibrahim = Staff::new("ibrahim", "Ibrahim", StaffRole::Iade);
    ibrahim.id = StaffId::new("ibrahim");
    let roster = Roster {
        staff: vec![ibrahim.clone()],
    };
    let assignments = vec![garde("g1", 3, vec![ibrahim.id.clone()])];
    let conflicts = detect_conflicts(&assignments, &roster, CheckOptions::default());
    assert!(conflicts
        .iter()
        .any(|c| c.kind == ConflictKind::SpecialtyMismatch));
}

#[test]
fn detects_consecutive_run_beyond_maximum() {
    let alice = mar("alice");
    let roster = Roster {
        staff: vec![alice.clone()],
    };
    // cinq jours d'affilée, maximum 3 ; les gardes de 24 h s'enchaînent
    // sans repos, la violation de repos est attendue elle aussi
    let assignments: Vec<Assignment> = (3..8)
        .map(|day| garde(&format!("g{day}"), day, vec![alice.id.clone()]))
        .collect();

    let conflicts = detect_conflicts(&assignments, &roster, CheckOptions::default());
    let run = conflicts
        .iter()
        .find(|c| c.kind == ConflictKind::ConsecutiveExceeded)
        .expect("série consécutive attendue");
    assert_eq!(run.date, date(6));
    assert_eq!(run.assignments.len(), 5);
}

#[test]
fn conflicts_are_sorted_by_date_staff_kind() {
    let alice = mar("alice");
    let bob = mar("bob");
    let roster = Roster {
        staff: vec![alice.clone(), bob.clone()],
    };
    let assignments = vec![
        garde("g1", 5, Vec::new()),
        garde("g2", 3, Vec::new()),
        garde("g3", 4, Vec::new()),
    ];
    let conflicts = detect_conflicts(&assignments, &roster, CheckOptions::default());
    let dates: Vec<NaiveDate> = conflicts.iter().map(|c| c.date).collect();
    let mut sorted = dates.clone();
    sorted.sort();
    assert_eq!(dates, sorted);
}

#[test]
fn fill_assigns_all_posts_with_enough_staff() {
    let alice = mar("alice");
    let bob = mar("bob");
    let roster = Roster {
        staff: vec![alice, bob],
    };
    let mut assignments = vec![
        garde("g1", 3, Vec::new()),
        garde("g2", 4, Vec::new()),
        garde("g3", 5, Vec::new()),
    ];

    let report = fill_assignments(
        &mut assignments,
        &roster,
        &[],
        &[],
        CheckOptions::default(),
    );
    assert_eq!(report.picks, 3);
    assert!(assignments.iter().all(|a| a.status == AssignmentStatus::Assigned));
    // rotation : jamais deux jours de suite pour la même personne
    assert_ne!(assignments[0].assigned, assignments[1].assigned);
}

#[test]
fn fill_respects_blocking_rule() {
    let alice = mar("alice");
    let roster = Roster {
        staff: vec![alice],
    };
    let no_consecutive = Rule {
        id: "aucune-garde-consecutive".into(),
        name: "Aucune garde deux jours de suite".into(),
        description: None,
        category: RuleCategory::Safety,
        kind: RuleKind::Constraint,
        severity: RuleSeverity::Error,
        active: true,
        action: RuleAction::BlockAssignment,
        conditions: vec![RuleCondition {
            field: RuleField::ConsecutiveGuards,
            operator: RuleOperator::GreaterThan,
            value: FieldValue::Number(0.0),
            logic: None,
        }],
    };

    let mut assignments = vec![garde("g1", 3, Vec::new()), garde("g2", 4, Vec::new())];
    let report = fill_assignments(
        &mut assignments,
        &roster,
        &[],
        &[no_consecutive],
        CheckOptions::default(),
    );

    assert_eq!(assignments[0].status, AssignmentStatus::Assigned);
    assert!(assignments[1].assigned.is_empty());
    assert_eq!(report.blocked_by_rules, 1);
}
