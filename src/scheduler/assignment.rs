use super::context::build_rule_context;
use super::{eligibility, CheckOptions, EligibilityScore};
use crate::model::{Assignment, AssignmentStatus, Roster};
use crate::rule::{evaluate_rule_set, Rule};

/// Bilan de la passe d'affectation.
#[derive(Debug, Clone, Copy, Default)]
pub struct FillReport {
    /// Sélections effectuées
    pub picks: u32,
    /// Sélections faites au niveau recommandé
    pub recommended_picks: u32,
    /// Candidatures écartées par une règle bloquante
    pub blocked_by_rules: u32,
}

impl FillReport {
    /// Part des sélections faites au niveau recommandé, 0–100.
    pub fn satisfaction(&self) -> f64 {
        if self.picks == 0 {
            0.0
        } else {
            f64::from(self.recommended_picks) * 100.0 / f64::from(self.picks)
        }
    }
}

/// Remplit les affectations par rotation équitable.
///
/// Parcours chronologique ; pour chaque poste les candidats sont classés
/// (recommandé d'abord), les règles bloquantes écartent, et l'effectif est
/// complété jusqu'au minimum du poste. Un créneau marqué en conflit à
/// l'expansion n'est pas rempli ; un poste incomplet reste `Unresolved` et
/// ressortira en rupture de couverture à la détection de conflits.
pub fn fill_assignments(
    assignments: &mut [Assignment],
    roster: &Roster,
    history: &[Assignment],
    rules: &[Rule],
    opts: CheckOptions,
) -> FillReport {
    let mut report = FillReport::default();
    // historique glissant : passé fourni + affectations déjà retenues
    let mut rolling: Vec<Assignment> = history.to_vec();

    for index in 0..assignments.len() {
        if assignments[index].status == AssignmentStatus::Conflicted {
            continue;
        }
        let candidate = assignments[index].clone();
        let ranked = eligibility::rank_candidates(&roster.staff, &candidate, &rolling, opts);

        let needed = usize::from(candidate.post.min_count);
        let mut chosen = Vec::new();
        let mut recommended = 0u32;
        for (staff_id, elig) in ranked {
            if chosen.len() >= needed {
                break;
            }
            // classement par rang : plus aucun candidat apte ensuite
            if !elig.is_eligible() {
                break;
            }
            let Some(staff) = roster.find_by_id(&staff_id) else {
                continue;
            };
            let ctx = build_rule_context(staff, &candidate, &rolling, roster);
            let outcome = evaluate_rule_set(rules, &ctx);
            if outcome.blocks() {
                report.blocked_by_rules += 1;
                tracing::debug!(
                    staff = %staff_id.as_str(),
                    date = %candidate.date,
                    slot = %candidate.slot_id,
                    "candidat écarté par règle bloquante"
                );
                continue;
            }
            if elig.score == EligibilityScore::Recommended {
                recommended += 1;
            }
            chosen.push(staff_id);
        }

        report.picks += chosen.len() as u32;
        report.recommended_picks += recommended;
        assignments[index].assigned = chosen;
        assignments[index].status = if assignments[index].fully_staffed() {
            AssignmentStatus::Assigned
        } else {
            AssignmentStatus::Unresolved
        };
        rolling.push(assignments[index].clone());
    }

    report
}
