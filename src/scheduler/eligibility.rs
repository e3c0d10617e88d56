use super::{util, CheckOptions, Eligibility, EligibilityScore};
use crate::model::{Assignment, Staff, StaffId};
use chrono::NaiveDate;

/// Vérifie l'aptitude d'une personne pour une affectation donnée.
///
/// Ordre des verdicts, le premier applicable l'emporte :
/// 1. inapte : congé recouvrant le créneau, rôle incompatible ou inactif ;
/// 2. déconseillé : affectation de même catégorie dans la fenêtre d'écart
///    minimal ;
/// 3. apte.
///
/// Le niveau `Recommended` est attribué par [`rank_candidates`], qui seul
/// connaît l'ensemble des candidats.
pub fn check_eligibility(
    staff: &Staff,
    assignment: &Assignment,
    history: &[Assignment],
    opts: CheckOptions,
) -> Eligibility {
    if !staff.active {
        return Eligibility {
            score: EligibilityScore::NotEligible,
            reasons: vec!["personnel inactif".to_string()],
        };
    }
    if staff.role != assignment.post.role {
        return Eligibility {
            score: EligibilityScore::NotEligible,
            reasons: vec![format!(
                "rôle {} incompatible avec le poste {}",
                staff.role.as_str(),
                assignment.post.role.as_str()
            )],
        };
    }
    // le congé prime sur toute logique de rotation
    if staff.on_leave(assignment.start, assignment.end) {
        return Eligibility {
            score: EligibilityScore::NotEligible,
            reasons: vec!["en congé sur la période".to_string()],
        };
    }

    if let Some(last) = util::last_same_category(&staff.id, assignment.category, assignment.date, history)
    {
        let gap = (assignment.date - last.date).num_days();
        if gap < i64::from(opts.min_gap_days) {
            return Eligibility {
                score: EligibilityScore::NotRecommended,
                reasons: vec![format!(
                    "dernière affectation {} il y a {} jours (minimum {})",
                    assignment.category.as_str(),
                    gap,
                    opts.min_gap_days
                )],
            };
        }
    }

    Eligibility {
        score: EligibilityScore::Eligible,
        reasons: Vec::new(),
    }
}

/// Classe tous les candidats d'une affectation.
///
/// Le candidat apte dont la dernière affectation de même catégorie est la
/// plus ancienne (jamais affecté compte comme le plus ancien) passe
/// `Recommended` (rotation équitable). Le classement retourné est trié par
/// niveau décroissant, puis ancienneté de dernière affectation, puis
/// identifiant, pour une restitution reproductible.
pub fn rank_candidates(
    roster: &[Staff],
    assignment: &Assignment,
    history: &[Assignment],
    opts: CheckOptions,
) -> Vec<(StaffId, Eligibility)> {
    let mut ranked: Vec<(StaffId, Eligibility, Option<NaiveDate>)> = roster
        .iter()
        .map(|staff| {
            let eligibility = check_eligibility(staff, assignment, history, opts);
            let last = util::last_same_category(
                &staff.id,
                assignment.category,
                assignment.date,
                history,
            )
            .map(|a| a.date);
            (staff.id.clone(), eligibility, last)
        })
        .collect();

    // Option<NaiveDate> s'ordonne avec None en premier : jamais affecté
    // passe avant la plus ancienne date
    let best = ranked
        .iter()
        .filter(|(_, e, _)| e.score == EligibilityScore::Eligible)
        .min_by(|(id_a, _, last_a), (id_b, _, last_b)| (last_a, id_a).cmp(&(last_b, id_b)))
        .map(|(id, _, _)| id.clone());

    if let Some(best_id) = best {
        for (id, eligibility, _) in ranked.iter_mut() {
            if *id == best_id {
                eligibility.score = EligibilityScore::Recommended;
                eligibility
                    .reasons
                    .push("rotation : repos le plus long parmi les candidats aptes".to_string());
            }
        }
    }

    ranked.sort_by(|(id_a, elig_a, last_a), (id_b, elig_b, last_b)| {
        (elig_a.score.rank(), last_a, id_a).cmp(&(elig_b.score.rank(), last_b, id_b))
    });

    ranked
        .into_iter()
        .map(|(id, eligibility, _)| (id, eligibility))
        .collect()
}
