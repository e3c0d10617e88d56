use serde::{Deserialize, Serialize};

/// Stratégie d'exécution d'une simulation.
///
/// Toutes composent les mêmes étapes (expansion, vérification, agrégation)
/// et produisent des résultats équivalents à cache froid ; seule la
/// technique d'exécution change. Le même identifiant sert aux comparaisons
/// de brouillons et à la relance : les résultats restent reproductibles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Recalcul complet synchrone
    #[default]
    Standard,
    /// Recalcul restreint aux entrées modifiées depuis la dernière base
    Incremental,
    /// Réutilisation maximale du cache de résultats
    Cached,
    /// Découpage de la plage en lots traités en parallèle
    Parallel,
    /// Cache, base incrémentale puis parallèle, avec repli standard
    Hybrid,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Standard => "standard",
            Strategy::Incremental => "incremental",
            Strategy::Cached => "cached",
            Strategy::Parallel => "parallel",
            Strategy::Hybrid => "hybrid",
        }
    }

    /// Stratégie conseillée selon la taille de la plage simulée.
    pub fn recommended_for_days(days: i64) -> Self {
        if days <= 7 {
            Strategy::Standard
        } else if days <= 30 {
            Strategy::Cached
        } else if days <= 90 {
            Strategy::Parallel
        } else {
            Strategy::Hybrid
        }
    }
}

impl std::str::FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(Strategy::Standard),
            "incremental" | "incrémental" => Ok(Strategy::Incremental),
            "cached" | "cache" => Ok(Strategy::Cached),
            "parallel" | "parallèle" => Ok(Strategy::Parallel),
            "hybrid" | "hybride" => Ok(Strategy::Hybrid),
            other => Err(format!("unknown strategy: {other}")),
        }
    }
}
