use crate::model::{Assignment, AssignmentCategory, Roster, Staff};
use crate::rule::{RuleContext, RuleField};
use chrono::Datelike;
use std::collections::HashSet;

/// Construit le contexte d'évaluation des règles pour un candidat et une
/// affectation, à partir de l'historique glissant (passé fourni plus
/// affectations déjà retenues pendant la passe de remplissage).
///
/// Un champ non calculable reste absent du contexte : la condition
/// correspondante échoue fermée côté évaluateur.
pub fn build_rule_context(
    staff: &Staff,
    assignment: &Assignment,
    prior: &[Assignment],
    roster: &Roster,
) -> RuleContext {
    let mut ctx = RuleContext::new();
    ctx.insert(RuleField::StaffRole, staff.role.as_str());
    ctx.insert(RuleField::ShiftType, assignment.category.as_str());
    ctx.insert(
        RuleField::DayOfWeek,
        i64::from(assignment.date.weekday().number_from_monday()),
    );

    // gardes des jours immédiatement antérieurs, sans interruption
    let mut consecutive = 0i64;
    let mut day = assignment.date.pred_opt();
    while let Some(d) = day {
        let worked = prior.iter().any(|a| {
            a.date == d
                && a.category == AssignmentCategory::Garde
                && a.assigned.contains(&staff.id)
        });
        if !worked {
            break;
        }
        consecutive += 1;
        day = d.pred_opt();
    }
    ctx.insert(RuleField::ConsecutiveGuards, consecutive);

    // repos écoulé depuis la fin de la dernière affectation
    let last_end = prior
        .iter()
        .filter(|a| a.assigned.contains(&staff.id) && a.end <= assignment.start)
        .map(|a| a.end)
        .max();
    if let Some(end) = last_end {
        ctx.insert(RuleField::RestHours, (assignment.start - end).num_hours());
    }

    // heures déjà retenues dans la semaine ISO de la date
    let week = assignment.date.iso_week();
    let weekly_minutes: i64 = prior
        .iter()
        .filter(|a| a.assigned.contains(&staff.id) && a.date.iso_week() == week)
        .map(Assignment::duration_minutes)
        .sum();
    ctx.insert(RuleField::WeeklyHours, weekly_minutes / 60);

    // personnel expérimenté déjà retenu sur le même créneau
    let experienced: HashSet<_> = prior
        .iter()
        .filter(|a| a.date == assignment.date && a.slot_id == assignment.slot_id)
        .flat_map(|a| a.assigned.iter())
        .filter(|id| roster.find_by_id(id).is_some_and(|s| s.experienced))
        .collect();
    ctx.insert(RuleField::ExperiencedStaffCount, experienced.len() as i64);

    ctx
}
