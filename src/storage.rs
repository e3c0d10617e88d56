use crate::model::{Assignment, Roster, Staff};
use crate::rule::Rule;
use crate::simulation::{MemoryStore, Scenario};
use crate::template::Trame;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Lot de données de simulation persisté en JSON (sans base de données) :
/// scénarios, trames, règles, effectif et historique d'affectations.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ScenarioBundle {
    #[serde(default)]
    pub scenarios: Vec<Scenario>,
    #[serde(default)]
    pub trames: Vec<Trame>,
    #[serde(default)]
    pub rules: Vec<Rule>,
    #[serde(default)]
    pub staff: Vec<Staff>,
    #[serde(default)]
    pub history: Vec<Assignment>,
}

impl ScenarioBundle {
    /// Monte le lot en dépôt mémoire prêt pour l'orchestrateur.
    pub async fn into_store(self) -> MemoryStore {
        let store = MemoryStore::new();
        for scenario in self.scenarios {
            store.insert_scenario(scenario).await;
        }
        for trame in self.trames {
            store.insert_trame(trame).await;
        }
        for rule in self.rules {
            store.insert_rule(rule).await;
        }
        store.set_roster(Roster { staff: self.staff }).await;
        for assignment in self.history {
            store.add_history(assignment).await;
        }
        store
    }
}

pub trait Storage {
    /// Charge un lot depuis un support.
    fn load(&self) -> anyhow::Result<ScenarioBundle>;
    /// Sauvegarde de manière atomique.
    fn save(&self, bundle: &ScenarioBundle) -> anyhow::Result<()>;
}

pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        Ok(Self {
            path: path.as_ref().to_path_buf(),
        })
    }
}

impl Storage for JsonStorage {
    fn load(&self) -> anyhow::Result<ScenarioBundle> {
        let data =
            fs::read(&self.path).with_context(|| format!("reading {}", self.path.display()))?;
        let bundle: ScenarioBundle =
            serde_json::from_slice(&data).with_context(|| "parsing bundle.json")?;
        Ok(bundle)
    }

    fn save(&self, bundle: &ScenarioBundle) -> anyhow::Result<()> {
        let json = serde_json::to_vec_pretty(bundle)?;
        let mut tmp = NamedTempFile::new_in(self.path.parent().unwrap_or_else(|| Path::new(".")))
            .with_context(|| "creating temp file")?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).with_context(|| "atomic rename")?;
        Ok(())
    }
}
