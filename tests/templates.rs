#![forbid(unsafe_code)]
use chrono::{NaiveDate, NaiveTime};
use simulateur::{
    expand, AssignmentCategory, AssignmentStatus, MonthType, Period, Post, RecurrenceType, Slot,
    StaffRole, Trame, WeekType,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn time(hour: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, 0, 0).unwrap()
}

fn garde_slot(id: &str, start_hour: u32) -> Slot {
    Slot {
        id: id.into(),
        category: AssignmentCategory::Garde,
        start_time: time(start_hour),
        duration_minutes: 1440,
        concurrent_allowed: false,
        posts: vec![Post::new(StaffRole::Mar, 1, 1)],
    }
}

fn weekday_trame() -> Trame {
    Trame {
        id: "bloc-garde".into(),
        name: "Garde de semaine".into(),
        description: Some("Une garde MAR chaque jour ouvré".into()),
        recurrence: RecurrenceType::Hebdomadaire,
        week_type: WeekType::Toutes,
        month_type: MonthType::Tous,
        effective_start: date(2025, 1, 1),
        effective_end: None,
        site_id: None,
        periods: vec![Period {
            id: "p-jour".into(),
            name: "Journée complète".into(),
            start_time: time(8),
            end_time: time(20),
            active: true,
            days: vec![1, 2, 3, 4, 5],
            slots: vec![garde_slot("s-garde", 8)],
        }],
    }
}

#[test]
fn expansion_is_deterministic_over_template_variants() {
    let week_types = [WeekType::Toutes, WeekType::Paires, WeekType::Impaires];
    let month_types = [MonthType::Tous, MonthType::Pairs, MonthType::Impairs];
    let ranges = [
        (date(2025, 10, 20), date(2025, 11, 16)),
        (date(2025, 11, 3), date(2025, 11, 3)),
        (date(2025, 12, 22), date(2026, 1, 11)),
    ];

    for week_type in week_types {
        for month_type in month_types {
            for (start, end) in ranges {
                let mut trame = weekday_trame();
                trame.week_type = week_type;
                trame.month_type = month_type;
                trame
                    .periods[0]
                    .slots
                    .push(garde_slot("s-astreinte", 20));

                let first = expand(&trame, start, end).unwrap();
                let second = expand(&trame, start, end).unwrap();
                assert_eq!(first, second);
            }
        }
    }
}

#[test]
fn effective_end_is_inclusive_boundary() {
    let mut trame = weekday_trame();
    // vendredi 7 novembre 2025
    trame.effective_end = Some(date(2025, 11, 7));

    let assignments = expand(&trame, date(2025, 11, 3), date(2025, 11, 14)).unwrap();
    assert!(assignments.iter().any(|a| a.date == date(2025, 11, 7)));
    assert!(assignments.iter().all(|a| a.date <= date(2025, 11, 7)));
}

#[test]
fn week_parity_filters_iso_weeks() {
    let mut paires = weekday_trame();
    paires.week_type = WeekType::Paires;

    // lundi 20 octobre 2025 = semaine ISO 43 (impaire),
    // lundi 27 octobre 2025 = semaine ISO 44 (paire)
    let assignments = expand(&paires, date(2025, 10, 20), date(2025, 11, 2)).unwrap();
    assert!(!assignments.is_empty());
    assert!(assignments.iter().all(|a| a.date >= date(2025, 10, 27)));

    let mut impaires = weekday_trame();
    impaires.week_type = WeekType::Impaires;
    let assignments = expand(&impaires, date(2025, 10, 20), date(2025, 11, 2)).unwrap();
    assert!(assignments.iter().all(|a| a.date < date(2025, 10, 27)));
}

#[test]
fn month_parity_filters_alternating_months() {
    let mut impairs = weekday_trame();
    impairs.month_type = MonthType::Impairs;

    // novembre (11) est impair, décembre (12) est pair
    let assignments = expand(&impairs, date(2025, 11, 24), date(2025, 12, 7)).unwrap();
    assert!(!assignments.is_empty());
    assert!(assignments.iter().all(|a| a.date.format("%m").to_string() == "11"));
}

#[test]
fn inactive_days_and_periods_are_skipped() {
    let mut trame = weekday_trame();
    trame.periods[0].days = vec![1]; // lundi uniquement

    let assignments = expand(&trame, date(2025, 11, 3), date(2025, 11, 16)).unwrap();
    assert_eq!(assignments.len(), 2);

    trame.periods[0].active = false;
    let assignments = expand(&trame, date(2025, 11, 3), date(2025, 11, 16)).unwrap();
    assert!(assignments.is_empty());
}

#[test]
fn dates_outside_effect_window_are_skipped_silently() {
    let mut trame = weekday_trame();
    trame.effective_start = date(2026, 1, 1);

    let assignments = expand(&trame, date(2025, 11, 3), date(2025, 11, 16)).unwrap();
    assert!(assignments.is_empty());
}

#[test]
fn overlapping_slots_are_flagged_conflicted_not_rejected() {
    let mut trame = weekday_trame();
    // deux gardes sur la même fenêtre horaire, sans autorisation de concurrence
    trame.periods[0].slots.push(garde_slot("s-double", 8));

    let assignments = expand(&trame, date(2025, 11, 3), date(2025, 11, 3)).unwrap();
    assert_eq!(assignments.len(), 2);
    assert!(assignments
        .iter()
        .all(|a| a.status == AssignmentStatus::Conflicted));

    // la même trame est rejetée par la validation stricte
    assert!(trame.validate().is_err());

    // concurrence autorisée : plus de conflit
    let mut concurrent = weekday_trame();
    let mut second = garde_slot("s-double", 8);
    second.concurrent_allowed = true;
    concurrent.periods[0].slots.push(second);
    let assignments = expand(&concurrent, date(2025, 11, 3), date(2025, 11, 3)).unwrap();
    assert!(assignments
        .iter()
        .all(|a| a.status == AssignmentStatus::Unresolved));
    assert!(concurrent.validate().is_ok());
}

#[test]
fn aucune_recurrence_applies_once_at_range_start() {
    let mut trame = weekday_trame();
    trame.recurrence = RecurrenceType::Aucune;

    let assignments = expand(&trame, date(2025, 11, 3), date(2025, 11, 16)).unwrap();
    assert_eq!(assignments.len(), 1);
    assert_eq!(assignments[0].date, date(2025, 11, 3));
}

#[test]
fn output_is_ordered_by_date_then_template_order() {
    let mut trame = weekday_trame();
    trame.periods[0].slots.push(garde_slot("s-nuit", 20));

    let assignments = expand(&trame, date(2025, 11, 3), date(2025, 11, 7)).unwrap();
    assert_eq!(assignments.len(), 10);
    for pair in assignments.windows(2) {
        assert!(pair[0].date <= pair[1].date);
    }
    // au sein d'une date, l'ordre des créneaux de la trame est conservé
    assert_eq!(assignments[0].slot_id, "s-garde");
    assert_eq!(assignments[1].slot_id, "s-nuit");
}

#[test]
fn inverted_range_is_a_validation_error() {
    let trame = weekday_trame();
    assert!(expand(&trame, date(2025, 11, 10), date(2025, 11, 3)).is_err());
}

#[test]
fn validation_rejects_malformed_trames() {
    let mut no_period = weekday_trame();
    no_period.periods.clear();
    assert!(no_period.validate().is_err());

    let mut bad_day = weekday_trame();
    bad_day.periods[0].days = vec![8];
    assert!(bad_day.validate().is_err());

    let mut bad_post = weekday_trame();
    bad_post.periods[0].slots[0].posts[0].min_count = 3;
    bad_post.periods[0].slots[0].posts[0].max_count = 1;
    assert!(bad_post.validate().is_err());

    let mut inverted_effect = weekday_trame();
    inverted_effect.effective_end = Some(date(2024, 1, 1));
    assert!(inverted_effect.validate().is_err());
}
