//! Vérification d'aptitude, remplissage par rotation et détection de
//! conflits sur les affectations développées.
//!
//! Tout est pur : fonctions des entrées (affectations, effectif, historique,
//! règles), aucun effet de bord, restitution déterministe.

mod assignment;
mod conflicts;
mod context;
mod eligibility;
mod types;
mod util;

pub use assignment::{fill_assignments, FillReport};
pub use context::build_rule_context;
pub use eligibility::{check_eligibility, rank_candidates};
pub use types::{
    CheckOptions, Conflict, ConflictKind, ConflictSeverity, Eligibility, EligibilityScore,
};

use crate::model::{Assignment, Roster};

/// Détecte les conflits d'un ensemble d'affectations développées.
///
/// Voir [`ConflictKind`] pour la typologie couverte. Les conflits sont
/// restitués triés par (date, personne, type).
pub fn detect_conflicts(
    assignments: &[Assignment],
    roster: &Roster,
    opts: CheckOptions,
) -> Vec<Conflict> {
    conflicts::detect_conflicts(assignments, roster, opts)
}
