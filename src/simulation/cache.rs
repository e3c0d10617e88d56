use super::scenario::SimulationResult;
use crate::model::StaffId;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Abstraction de cache de résultats de simulation.
///
/// Injectée dans l'orchestrateur, jamais d'état global de module : isolable
/// en test, remplaçable par un cache distribué.
#[async_trait]
pub trait SimulationCache: Send + Sync {
    async fn get(&self, key: &str) -> Option<SimulationResult>;
    async fn set(&self, key: String, result: SimulationResult);
    async fn has(&self, key: &str) -> bool;
    async fn clear(&self);
}

/// Cache mémoire à l'échelle du processus.
#[derive(Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, SimulationResult>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SimulationCache for MemoryCache {
    async fn get(&self, key: &str) -> Option<SimulationResult> {
        self.entries.read().await.get(key).cloned()
    }

    async fn set(&self, key: String, result: SimulationResult) {
        self.entries.write().await.insert(key, result);
    }

    async fn has(&self, key: &str) -> bool {
        self.entries.read().await.contains_key(key)
    }

    async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

/// Clé structurelle d'une exécution.
///
/// Sérialisation stable (listes triées) des entrées qui déterminent la
/// sortie, puis SHA-256 : deux entrées de formes différentes ne partagent
/// jamais de clé, et tout changement de périmètre (règle incluse, personne
/// exclue, plage) invalide la clé.
pub fn cache_key(
    scenario_id: &str,
    start: NaiveDate,
    end: NaiveDate,
    included_rule_ids: &[String],
    excluded_user_ids: &[StaffId],
) -> String {
    #[derive(Serialize)]
    struct KeyInput<'a> {
        scenario_id: &'a str,
        start: NaiveDate,
        end: NaiveDate,
        included_rule_ids: Vec<&'a str>,
        excluded_user_ids: Vec<&'a str>,
    }

    let mut rule_ids: Vec<&str> = included_rule_ids.iter().map(String::as_str).collect();
    rule_ids.sort_unstable();
    let mut user_ids: Vec<&str> = excluded_user_ids.iter().map(StaffId::as_str).collect();
    user_ids.sort_unstable();

    let input = KeyInput {
        scenario_id,
        start,
        end,
        included_rule_ids: rule_ids,
        excluded_user_ids: user_ids,
    };
    // structure plate sans map : la sérialisation ne peut pas échouer
    let payload = serde_json::to_vec(&input).expect("cache key serialization");
    format!("sim_{:x}", Sha256::digest(payload))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, day).unwrap()
    }

    #[test]
    fn key_ignores_rule_id_order() {
        let a = cache_key(
            "sc1",
            date(3),
            date(9),
            &["r2".to_string(), "r1".to_string()],
            &[],
        );
        let b = cache_key(
            "sc1",
            date(3),
            date(9),
            &["r1".to_string(), "r2".to_string()],
            &[],
        );
        assert_eq!(a, b);
    }

    #[test]
    fn key_changes_with_rule_set() {
        let a = cache_key("sc1", date(3), date(9), &["r1".to_string()], &[]);
        let b = cache_key(
            "sc1",
            date(3),
            date(9),
            &["r1".to_string(), "r2".to_string()],
            &[],
        );
        assert_ne!(a, b);
    }
}
