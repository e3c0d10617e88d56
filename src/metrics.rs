//! Agrégation des indicateurs d'une simulation.

use crate::model::Assignment;
use crate::scheduler::Conflict;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Indicateurs agrégés d'une simulation.
///
/// Structure plate et sérialisable : contrat de sortie stable pour les
/// consommateurs aval (exports, tableaux de bord).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Metrics {
    /// Taux de couverture des postes requis, 0–100.
    pub coverage: f64,
    /// Part des postes pourvus par un candidat recommandé, 0–100.
    pub satisfaction: f64,
    /// Nombre de conflits détectés.
    pub conflicts: u32,
    /// Écart-type du nombre d'affectations par personne ; plus bas = plus
    /// équilibré. Indicatif, jamais bloquant.
    pub workload_balance: f64,
}

/// Agrège les indicateurs d'une exécution.
///
/// `satisfaction` relève de la passe d'affectation ([`crate::scheduler::FillReport`]) ;
/// l'orchestrateur la reporte après coup. Fonction pure et déterministe.
pub fn aggregate(assignments: &[Assignment], conflicts: &[Conflict]) -> Metrics {
    let required: Vec<&Assignment> = assignments.iter().filter(|a| a.post.required).collect();
    let total = required.len();
    let staffed = required.iter().filter(|a| a.fully_staffed()).count();

    // garde de division par zéro : couverture nulle sur un ensemble vide,
    // jamais NaN
    let coverage = if total == 0 {
        0.0
    } else {
        staffed as f64 * 100.0 / total as f64
    };

    Metrics {
        coverage,
        satisfaction: 0.0,
        conflicts: conflicts.len() as u32,
        workload_balance: workload_std_dev(assignments),
    }
}

/// Écart-type (population) du nombre d'affectations par personne.
fn workload_std_dev(assignments: &[Assignment]) -> f64 {
    let mut counts: HashMap<&crate::model::StaffId, u32> = HashMap::new();
    for a in assignments {
        for staff_id in &a.assigned {
            *counts.entry(staff_id).or_insert(0) += 1;
        }
    }
    if counts.is_empty() {
        return 0.0;
    }
    let n = counts.len() as f64;
    let mean = counts.values().map(|c| f64::from(*c)).sum::<f64>() / n;
    let variance = counts
        .values()
        .map(|c| {
            let d = f64::from(*c) - mean;
            d * d
        })
        .sum::<f64>()
        / n;
    variance.sqrt()
}

/// Fusion des indicateurs de lots (stratégie parallèle) : moyennes pondérées
/// par le poids du lot (nombre de postes requis), conflits sommés.
///
/// Réduction indépendante de l'ordre d'arrivée des lots. L'appelant qui
/// déduplique les conflits inter-lots écrase ensuite `conflicts` avec le
/// compte dédupliqué.
pub fn merge_weighted(parts: &[(Metrics, usize)]) -> Metrics {
    let total: usize = parts.iter().map(|(_, w)| *w).sum();
    if total == 0 {
        return Metrics {
            conflicts: parts.iter().map(|(m, _)| m.conflicts).sum(),
            ..Metrics::default()
        };
    }
    let weight = |w: usize| w as f64 / total as f64;
    Metrics {
        coverage: parts.iter().map(|(m, w)| m.coverage * weight(*w)).sum(),
        satisfaction: parts.iter().map(|(m, w)| m.satisfaction * weight(*w)).sum(),
        conflicts: parts.iter().map(|(m, _)| m.conflicts).sum(),
        workload_balance: parts
            .iter()
            .map(|(m, w)| m.workload_balance * weight(*w))
            .sum(),
    }
}
