use super::{util, CheckOptions, Conflict, ConflictKind, ConflictSeverity};
use crate::model::{Assignment, AssignmentStatus, Roster, StaffId};
use chrono::Duration;
use std::collections::HashMap;

/// Détecte les conflits sur un ensemble d'affectations développées.
///
/// Couvre : double affectation en chevauchement, repos insuffisant, séries
/// de jours consécutifs au-delà du maximum, rôle incompatible, effectif
/// requis non atteint, et créneaux marqués en conflit dès l'expansion.
///
/// Restitution triée par (date, personne, type) : les assertions de test
/// comme les rapports restent reproductibles. Fonction pure.
pub(super) fn detect_conflicts(
    assignments: &[Assignment],
    roster: &Roster,
    opts: CheckOptions,
) -> Vec<Conflict> {
    let mut out = Vec::new();

    // conflits de trame relevés à l'expansion
    for a in assignments {
        if a.status == AssignmentStatus::Conflicted {
            out.push(Conflict {
                kind: ConflictKind::SchedulingConflict,
                severity: ConflictSeverity::Error,
                description: format!(
                    "créneau {} en chevauchement non autorisé dans la période {}",
                    a.slot_id, a.period_id
                ),
                date: a.date,
                staff: None,
                assignments: vec![a.id.clone()],
            });
        }
    }

    // effectif requis non atteint
    for a in assignments {
        if a.status == AssignmentStatus::Conflicted {
            continue;
        }
        if a.post.required && !a.fully_staffed() {
            out.push(Conflict {
                kind: ConflictKind::CoverageGap,
                severity: ConflictSeverity::Error,
                description: format!(
                    "poste {} non pourvu ({}/{} le {})",
                    a.post.role.as_str(),
                    a.assigned.len(),
                    a.post.min_count,
                    a.date
                ),
                date: a.date,
                staff: None,
                assignments: vec![a.id.clone()],
            });
        }
    }

    // rôle incompatible avec le poste
    for a in assignments {
        for staff_id in &a.assigned {
            let Some(staff) = roster.find_by_id(staff_id) else {
                continue;
            };
            if staff.role != a.post.role {
                out.push(Conflict {
                    kind: ConflictKind::SpecialtyMismatch,
                    severity: ConflictSeverity::Error,
                    description: format!(
                        "{} ({}) affecté à un poste {}",
                        staff.display_name,
                        staff.role.as_str(),
                        a.post.role.as_str()
                    ),
                    date: a.date,
                    staff: Some(staff_id.clone()),
                    assignments: vec![a.id.clone()],
                });
            }
        }
    }

    // par personne : chevauchements, repos, séries consécutives
    let mut by_staff: HashMap<&StaffId, Vec<&Assignment>> = HashMap::new();
    for a in assignments {
        for staff_id in &a.assigned {
            by_staff.entry(staff_id).or_default().push(a);
        }
    }

    for (staff_id, list) in by_staff {
        let mut list = list;
        list.sort_by_key(|a| (a.start, a.id.clone()));

        for (i, a) in list.iter().enumerate() {
            for b in list.iter().skip(i + 1) {
                if util::overlaps(a.start, a.end, b.start, b.end) {
                    out.push(Conflict {
                        kind: ConflictKind::SchedulingConflict,
                        severity: ConflictSeverity::Error,
                        description: format!(
                            "affecté à deux créneaux en chevauchement le {}",
                            b.date
                        ),
                        date: b.date,
                        staff: Some((*staff_id).clone()),
                        assignments: vec![a.id.clone(), b.id.clone()],
                    });
                    continue;
                }
                let rest = b.start - a.end;
                if rest >= Duration::zero() && rest < Duration::hours(i64::from(opts.min_rest_hours))
                {
                    out.push(Conflict {
                        kind: ConflictKind::RestViolation,
                        severity: ConflictSeverity::Error,
                        description: format!(
                            "repos de {} h avant le créneau du {}, minimum {} h",
                            rest.num_hours(),
                            b.date,
                            opts.min_rest_hours
                        ),
                        date: b.date,
                        staff: Some((*staff_id).clone()),
                        assignments: vec![a.id.clone(), b.id.clone()],
                    });
                }
            }
        }

        out.extend(consecutive_runs(staff_id, &list, opts));
    }

    out.sort_by(|a, b| (a.date, &a.staff, a.kind).cmp(&(b.date, &b.staff, b.kind)));
    out
}

/// Séries de jours d'affectation consécutifs au-delà du maximum : un conflit
/// par série, daté du premier jour de dépassement.
fn consecutive_runs(
    staff_id: &StaffId,
    sorted: &[&Assignment],
    opts: CheckOptions,
) -> Vec<Conflict> {
    let mut out = Vec::new();
    let mut dates: Vec<_> = sorted.iter().map(|a| a.date).collect();
    dates.dedup();

    let mut run_start = 0usize;
    for i in 1..=dates.len() {
        let run_broken = i == dates.len()
            || (dates[i] - dates[i - 1]).num_days() > 1;
        if !run_broken {
            continue;
        }
        let run_len = i - run_start;
        if run_len > opts.max_consecutive_shifts as usize {
            let exceed_date = dates[run_start + opts.max_consecutive_shifts as usize];
            let ids = sorted
                .iter()
                .filter(|a| a.date >= dates[run_start] && a.date <= dates[i - 1])
                .map(|a| a.id.clone())
                .collect();
            out.push(Conflict {
                kind: ConflictKind::ConsecutiveExceeded,
                severity: ConflictSeverity::Warning,
                description: format!(
                    "{} jours d'affectation consécutifs, maximum {}",
                    run_len, opts.max_consecutive_shifts
                ),
                date: exceed_date,
                staff: Some(staff_id.clone()),
                assignments: ids,
            });
        }
        run_start = i;
    }
    out
}
