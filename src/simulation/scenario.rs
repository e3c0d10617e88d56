use super::strategy::Strategy;
use crate::error::SimError;
use crate::metrics::Metrics;
use crate::model::StaffId;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Scénario de simulation : trames appliquées, jeu de règles et périmètre.
///
/// Rédigé en dehors du moteur, lu en lecture seule ici.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: String,
    pub name: String,
    pub trame_ids: Vec<String>,
    #[serde(default)]
    pub included_rule_ids: Vec<String>,
    #[serde(default)]
    pub excluded_rule_ids: Vec<String>,
    #[serde(default)]
    pub excluded_user_ids: Vec<StaffId>,
    #[serde(default)]
    pub site_id: Option<String>,
}

/// Options d'exécution d'une simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationOptions {
    #[serde(default)]
    pub strategy: Strategy,
    #[serde(default = "default_true")]
    pub use_cache: bool,
    /// Taille des lots (jours) pour les stratégies parallèle et hybride.
    #[serde(default = "default_batch_size")]
    pub batch_size: u32,
    #[serde(default = "default_true")]
    pub notify_progress: bool,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            strategy: Strategy::Standard,
            use_cache: true,
            batch_size: default_batch_size(),
            notify_progress: true,
        }
    }
}

fn default_true() -> bool {
    true
}

// une semaine par lot
fn default_batch_size() -> u32 {
    7
}

/// Paramètres d'une exécution de simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParams {
    pub scenario_id: String,
    #[serde(default)]
    pub site_id: Option<String>,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Sous-ensemble de règles à appliquer ; vide = jeu du scénario.
    #[serde(default)]
    pub included_rule_ids: Vec<String>,
    #[serde(default)]
    pub excluded_user_ids: Vec<StaffId>,
    /// Personne à notifier de la progression.
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub options: SimulationOptions,
}

impl SimulationParams {
    pub fn new<S: Into<String>>(scenario_id: S, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            scenario_id: scenario_id.into(),
            site_id: None,
            start,
            end,
            included_rule_ids: Vec::new(),
            excluded_user_ids: Vec::new(),
            user_id: None,
            options: SimulationOptions::default(),
        }
    }

    pub(super) fn validate(&self) -> Result<(), SimError> {
        if self.end < self.start {
            return Err(SimError::validation(
                "simulation end date must not precede start date",
            ));
        }
        Ok(())
    }

    /// Nombre de jours couverts, bornes incluses.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// Statut d'une exécution.
///
/// PENDING → RUNNING → {COMPLETED | FAILED} ; les états terminaux sont
/// définitifs, relancer crée un nouveau résultat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SimulationStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

impl SimulationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SimulationStatus::Pending => "PENDING",
            SimulationStatus::Running => "RUNNING",
            SimulationStatus::Completed => "COMPLETED",
            SimulationStatus::Failed => "FAILED",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, SimulationStatus::Completed | SimulationStatus::Failed)
    }
}

/// Résultat persisté d'une exécution.
///
/// Immuable une fois COMPLETED ; un résultat FAILED conserve le diagnostic
/// partiel dans `details` et `error`. Structure plate et sérialisable,
/// contrat stable pour les exports aval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub id: String,
    pub scenario_id: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub status: SimulationStatus,
    #[serde(default)]
    pub metrics: Metrics,
    #[serde(default)]
    pub details: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl SimulationResult {
    pub fn completed(params: &SimulationParams, metrics: Metrics, details: Value) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            scenario_id: params.scenario_id.clone(),
            start: params.start,
            end: params.end,
            status: SimulationStatus::Completed,
            metrics,
            details,
            error: None,
            created_at: Utc::now(),
        }
    }

    pub fn failed(params: &SimulationParams, error: String, details: Value) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            scenario_id: params.scenario_id.clone(),
            start: params.start,
            end: params.end,
            status: SimulationStatus::Failed,
            metrics: Metrics::default(),
            details,
            error: Some(error),
            created_at: Utc::now(),
        }
    }
}
