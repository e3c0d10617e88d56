use super::scenario::{Scenario, SimulationResult, SimulationStatus};
use crate::error::SimError;
use crate::model::{Assignment, LeavePeriod, Roster, Staff, StaffId};
use crate::rule::Rule;
use crate::template::Trame;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Interface de persistance consommée par l'orchestrateur.
///
/// Toutes les opérations peuvent suspendre et échouer ; le moteur ne
/// réessaie jamais (affaire de la couche de persistance). Les résultats
/// sont en ajout seul : aucune exécution ne modifie le résultat d'une autre.
#[async_trait]
pub trait PlanningStore: Send + Sync {
    async fn get_scenario(&self, id: &str) -> Result<Scenario, SimError>;
    async fn get_trame(&self, id: &str) -> Result<Trame, SimError>;
    async fn get_rules(&self, ids: &[String]) -> Result<Vec<Rule>, SimError>;
    async fn get_staff_roster(&self, site_id: Option<&str>) -> Result<Roster, SimError>;
    /// Congés déclarés recouvrant la plage donnée.
    async fn get_leaves(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<(StaffId, LeavePeriod)>, SimError>;
    /// Affectations passées sur la plage (historique de rotation et de repos).
    async fn get_history(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Assignment>, SimError>;
    /// Dernier résultat COMPLETED du scénario, s'il existe.
    async fn latest_completed_result(
        &self,
        scenario_id: &str,
    ) -> Result<Option<SimulationResult>, SimError>;
    /// Enregistre un résultat (ajout seul) et le restitue tel que stocké.
    async fn create_result(&self, result: SimulationResult) -> Result<SimulationResult, SimError>;
}

#[derive(Default)]
struct MemoryInner {
    scenarios: HashMap<String, Scenario>,
    trames: HashMap<String, Trame>,
    rules: HashMap<String, Rule>,
    roster: Roster,
    leaves: Vec<(StaffId, LeavePeriod)>,
    history: Vec<Assignment>,
    results: Vec<SimulationResult>,
}

/// Dépôt mémoire : implémentation de référence pour les tests et la CLI.
///
/// Un seul site : le filtre de site de `get_staff_roster` est laissé aux
/// dépôts adossés à une base.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<MemoryInner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_scenario(&self, scenario: Scenario) {
        self.inner
            .write()
            .await
            .scenarios
            .insert(scenario.id.clone(), scenario);
    }

    pub async fn insert_trame(&self, trame: Trame) {
        self.inner.write().await.trames.insert(trame.id.clone(), trame);
    }

    pub async fn insert_rule(&self, rule: Rule) {
        self.inner.write().await.rules.insert(rule.id.clone(), rule);
    }

    pub async fn set_roster(&self, roster: Roster) {
        self.inner.write().await.roster = roster;
    }

    pub async fn add_staff(&self, staff: Staff) {
        self.inner.write().await.roster.staff.push(staff);
    }

    pub async fn add_leave(&self, staff_id: StaffId, leave: LeavePeriod) {
        self.inner.write().await.leaves.push((staff_id, leave));
    }

    pub async fn add_history(&self, assignment: Assignment) {
        self.inner.write().await.history.push(assignment);
    }

    /// Résultats enregistrés, dans l'ordre d'arrivée (inspection, tests).
    pub async fn results(&self) -> Vec<SimulationResult> {
        self.inner.read().await.results.clone()
    }
}

#[async_trait]
impl PlanningStore for MemoryStore {
    async fn get_scenario(&self, id: &str) -> Result<Scenario, SimError> {
        self.inner
            .read()
            .await
            .scenarios
            .get(id)
            .cloned()
            .ok_or_else(|| SimError::not_found(format!("scenario {id}")))
    }

    async fn get_trame(&self, id: &str) -> Result<Trame, SimError> {
        self.inner
            .read()
            .await
            .trames
            .get(id)
            .cloned()
            .ok_or_else(|| SimError::not_found(format!("trame {id}")))
    }

    async fn get_rules(&self, ids: &[String]) -> Result<Vec<Rule>, SimError> {
        let inner = self.inner.read().await;
        ids.iter()
            .map(|id| {
                inner
                    .rules
                    .get(id)
                    .cloned()
                    .ok_or_else(|| SimError::not_found(format!("rule {id}")))
            })
            .collect()
    }

    async fn get_staff_roster(&self, _site_id: Option<&str>) -> Result<Roster, SimError> {
        Ok(self.inner.read().await.roster.clone())
    }

    async fn get_leaves(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<(StaffId, LeavePeriod)>, SimError> {
        Ok(self
            .inner
            .read()
            .await
            .leaves
            .iter()
            .filter(|(_, leave)| {
                leave.start.date_naive() <= end && leave.end.date_naive() >= start
            })
            .cloned()
            .collect())
    }

    async fn get_history(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Assignment>, SimError> {
        Ok(self
            .inner
            .read()
            .await
            .history
            .iter()
            .filter(|a| a.date >= start && a.date <= end)
            .cloned()
            .collect())
    }

    async fn latest_completed_result(
        &self,
        scenario_id: &str,
    ) -> Result<Option<SimulationResult>, SimError> {
        Ok(self
            .inner
            .read()
            .await
            .results
            .iter()
            .rev()
            .find(|r| r.scenario_id == scenario_id && r.status == SimulationStatus::Completed)
            .cloned())
    }

    async fn create_result(&self, result: SimulationResult) -> Result<SimulationResult, SimError> {
        self.inner.write().await.results.push(result.clone());
        Ok(result)
    }
}
