use crate::model::{AssignmentId, StaffId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Options de vérification des contraintes d'affectation.
#[derive(Debug, Clone, Copy)]
pub struct CheckOptions {
    /// Repos minimal entre deux affectations (heures).
    pub min_rest_hours: u32,
    /// Nombre maximal de jours d'affectation consécutifs.
    pub max_consecutive_shifts: u32,
    /// Écart minimal entre deux affectations de même catégorie (jours).
    pub min_gap_days: u32,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            min_rest_hours: 11,
            max_consecutive_shifts: 3,
            min_gap_days: 7,
        }
    }
}

/// Nature d'un conflit détecté.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConflictKind {
    /// Même personne sur deux créneaux qui se chevauchent, ou créneaux de
    /// trame en chevauchement non autorisé
    SchedulingConflict,
    /// Repos entre deux affectations sous le minimum
    RestViolation,
    /// Série de jours consécutifs au-delà du maximum
    ConsecutiveExceeded,
    /// Personne affectée à un poste d'un autre rôle
    SpecialtyMismatch,
    /// Effectif requis non atteint
    CoverageGap,
}

impl ConflictKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictKind::SchedulingConflict => "SCHEDULING_CONFLICT",
            ConflictKind::RestViolation => "REST_VIOLATION",
            ConflictKind::ConsecutiveExceeded => "CONSECUTIVE_EXCEEDED",
            ConflictKind::SpecialtyMismatch => "SPECIALTY_MISMATCH",
            ConflictKind::CoverageGap => "COVERAGE_GAP",
        }
    }
}

/// Sévérité d'un conflit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictSeverity {
    Error,
    Warning,
}

/// Conflit détecté sur un ensemble d'affectations développées.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    pub kind: ConflictKind,
    pub severity: ConflictSeverity,
    pub description: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staff: Option<StaffId>,
    pub assignments: Vec<AssignmentId>,
}

/// Niveau d'aptitude d'un candidat pour une affectation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityScore {
    /// Apte et prioritaire pour la rotation (repos le plus long)
    Recommended,
    /// Apte
    Eligible,
    /// Apte mais déconseillé (affectation de même catégorie trop récente)
    NotRecommended,
    /// Inapte (congé, rôle incompatible, inactif)
    NotEligible,
}

impl EligibilityScore {
    /// Rang de tri, du plus favorable au moins favorable.
    pub(crate) fn rank(&self) -> u8 {
        match self {
            EligibilityScore::Recommended => 0,
            EligibilityScore::Eligible => 1,
            EligibilityScore::NotRecommended => 2,
            EligibilityScore::NotEligible => 3,
        }
    }
}

/// Résultat d'une vérification d'aptitude.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Eligibility {
    pub score: EligibilityScore,
    pub reasons: Vec<String>,
}

impl Eligibility {
    /// Vrai tant que la personne n'est pas écartée (un candidat déconseillé
    /// reste mobilisable en dernier recours).
    pub fn is_eligible(&self) -> bool {
        self.score != EligibilityScore::NotEligible
    }
}
