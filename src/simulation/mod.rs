//! Orchestration des simulations : stratégies d'exécution, cache,
//! progression et persistance.
//!
//! L'orchestrateur est le seul point qui attrape, classe, enregistre et
//! relance les erreurs des composants. Les phases d'une exécution suivent
//! l'ordre fixe chargement → expansion → vérification → agrégation →
//! persistance.

mod cache;
mod persistence;
mod progress;
mod scenario;
mod strategy;

pub use cache::{cache_key, MemoryCache, SimulationCache};
pub use persistence::{MemoryStore, PlanningStore};
pub use progress::{
    ChannelProgress, NoOpProgress, ProgressEvent, ProgressKind, ProgressPublisher,
};
pub use scenario::{
    Scenario, SimulationOptions, SimulationParams, SimulationResult, SimulationStatus,
};
pub use strategy::Strategy;

use crate::error::SimError;
use crate::metrics::{self, Metrics};
use crate::model::{Assignment, Roster, StaffId};
use crate::rule::Rule;
use crate::scheduler::{self, CheckOptions, Conflict};
use crate::template::{self, Trame};
use chrono::{Duration, NaiveDate};
use progress::ProgressReporter;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Profondeur d'historique chargée avant la plage (rotation, repos).
const HISTORY_LOOKBACK_DAYS: i64 = 30;
/// Au-delà de cette plage, la stratégie hybride passe en parallèle.
const HYBRID_PARALLEL_THRESHOLD_DAYS: i64 = 30;

/// Entrées résolues d'une exécution.
struct SimulationInput {
    trames: Vec<Trame>,
    rules: Vec<Rule>,
    roster: Roster,
    history: Vec<Assignment>,
}

/// Sortie du cœur de calcul synchrone.
struct ComputeOutput {
    assignments: Vec<Assignment>,
    conflicts: Vec<Conflict>,
    metrics: Metrics,
}

/// Sortie d'un lot de la stratégie parallèle.
struct BatchOutput {
    metrics: Metrics,
    conflicts: Vec<Conflict>,
    /// Nombre de postes requis de la fenêtre propre (poids de fusion).
    weight: usize,
}

/// Orchestrateur de simulations.
///
/// Machine à états par exécution : PENDING → RUNNING → {COMPLETED | FAILED},
/// états terminaux définitifs ; relancer crée un nouveau résultat. Le cache
/// et le canal de progression sont injectés, jamais globaux.
pub struct Simulator {
    store: Arc<dyn PlanningStore>,
    cache: Arc<dyn SimulationCache>,
    progress: Arc<dyn ProgressPublisher>,
    check_opts: CheckOptions,
    /// Verrous par clé : au plus un calcul simultané par clé de cache, le
    /// second appelant attend le premier au lieu de recalculer.
    inflight: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl Simulator {
    pub fn new(store: Arc<dyn PlanningStore>) -> Self {
        Self {
            store,
            cache: Arc::new(MemoryCache::new()),
            progress: Arc::new(NoOpProgress),
            check_opts: CheckOptions::default(),
            inflight: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_cache(mut self, cache: Arc<dyn SimulationCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressPublisher>) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_check_options(mut self, opts: CheckOptions) -> Self {
        self.check_opts = opts;
        self
    }

    /// Lance une simulation selon la stratégie des options.
    ///
    /// Validation et références absentes : l'exécution ne démarre pas, aucun
    /// résultat n'est créé. Échec de calcul : un résultat FAILED est persisté
    /// avec le diagnostic partiel, l'événement d'échec est émis, puis
    /// l'erreur est relancée, jamais avalée.
    pub async fn run(&self, params: SimulationParams) -> Result<SimulationResult, SimError> {
        params.validate()?;
        let strategy = params.options.strategy;
        let reporter = ProgressReporter::new(
            self.progress.clone(),
            params.user_id.clone(),
            params.options.notify_progress,
        );
        reporter.emit(
            ProgressKind::Start,
            "Démarrage de la simulation",
            0,
            json!({ "scenario_id": params.scenario_id, "strategy": strategy.as_str() }),
        );
        tracing::info!(
            scenario_id = %params.scenario_id,
            strategy = strategy.as_str(),
            start = %params.start,
            end = %params.end,
            "exécution démarrée"
        );

        let outcome = match strategy {
            Strategy::Standard => self.run_standard(&params, &reporter).await,
            Strategy::Incremental => self.run_incremental(&params, &reporter).await,
            Strategy::Cached => self.run_cached(&params, &reporter).await,
            Strategy::Parallel => self.run_parallel(&params, &reporter).await,
            Strategy::Hybrid => self.run_hybrid(&params, &reporter).await,
        };

        match outcome {
            Ok(result) => {
                tracing::info!(result_id = %result.id, coverage = result.metrics.coverage, "exécution terminée");
                reporter.emit(
                    ProgressKind::Complete,
                    "Simulation terminée avec succès",
                    100,
                    json!({ "scenario_id": params.scenario_id, "result_id": result.id.as_str() }),
                );
                Ok(result)
            }
            Err(err) => {
                tracing::warn!(error = %err, "exécution en échec");
                self.record_failure(&params, strategy, &err).await;
                reporter.emit(
                    ProgressKind::Error,
                    &format!("Erreur : {err}"),
                    0,
                    json!({ "scenario_id": params.scenario_id, "strategy": strategy.as_str() }),
                );
                Err(err)
            }
        }
    }

    /// Persiste un résultat FAILED pour les échecs de calcul.
    ///
    /// Validation et références absentes n'ont jamais démarré l'exécution :
    /// pas de résultat. Un dépôt en panne n'a rien à recevoir.
    async fn record_failure(&self, params: &SimulationParams, strategy: Strategy, err: &SimError) {
        if matches!(
            err,
            SimError::Validation { .. } | SimError::NotFound { .. } | SimError::Persistence { .. }
        ) {
            return;
        }
        let details = json!({ "strategy": strategy.as_str(), "phase": "computation" });
        let failed = SimulationResult::failed(params, err.to_string(), details);
        if let Err(persist_err) = self.store.create_result(failed).await {
            // l'échec de persistance ne masque pas l'erreur d'origine
            tracing::warn!(error = %persist_err, "résultat FAILED non enregistré");
        }
    }

    /// Clé structurelle des entrées de l'exécution ; sert de clé de cache et
    /// d'empreinte de base incrémentale.
    fn fingerprint(&self, params: &SimulationParams) -> String {
        cache_key(
            &params.scenario_id,
            params.start,
            params.end,
            &params.included_rule_ids,
            &params.excluded_user_ids,
        )
    }

    async fn key_guard(&self, key: &str) -> Arc<Mutex<()>> {
        let mut map = self.inflight.lock().await;
        map.entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Phase de chargement : scénario, trames, règles, effectif, congés,
    /// historique. Toute incohérence arrête l'exécution avant calcul.
    async fn load_inputs(
        &self,
        params: &SimulationParams,
        reporter: &ProgressReporter,
    ) -> Result<SimulationInput, SimError> {
        reporter.emit(
            ProgressKind::Progress,
            "Chargement des données...",
            20,
            json!({ "scenario_id": params.scenario_id, "phase": "loading" }),
        );
        let scenario = self.store.get_scenario(&params.scenario_id).await?;

        if let (Some(site), Some(scenario_site)) =
            (params.site_id.as_deref(), scenario.site_id.as_deref())
        {
            if site != scenario_site {
                return Err(SimError::validation(format!(
                    "scenario {} is scoped to site {scenario_site}, run requested for site {site}",
                    scenario.id
                )));
            }
        }
        let site_id = params.site_id.as_deref().or(scenario.site_id.as_deref());

        if scenario.trame_ids.is_empty() {
            return Err(SimError::validation(format!(
                "scenario {}: no trame referenced",
                scenario.id
            )));
        }
        let mut trames = Vec::with_capacity(scenario.trame_ids.len());
        for trame_id in &scenario.trame_ids {
            let trame = self.store.get_trame(trame_id).await?;
            trame.validate()?;
            if let (Some(trame_site), Some(site)) = (trame.site_id.as_deref(), site_id) {
                if trame_site != site {
                    return Err(SimError::validation(format!(
                        "trame {} is scoped to site {trame_site}, run requested for site {site}",
                        trame.id
                    )));
                }
            }
            trames.push(trame);
        }

        let rule_ids = effective_rule_ids(&scenario, params);
        let rules = self.store.get_rules(&rule_ids).await?;
        for rule in &rules {
            rule.validate()?;
        }

        let mut roster = self.store.get_staff_roster(site_id).await?;
        let excluded: HashSet<&StaffId> = params
            .excluded_user_ids
            .iter()
            .chain(scenario.excluded_user_ids.iter())
            .collect();
        roster.staff.retain(|s| !excluded.contains(&s.id));

        // congés recouvrant la plage, repliés sur l'effectif
        for (staff_id, leave) in self.store.get_leaves(params.start, params.end).await? {
            if let Some(staff) = roster.find_mut_by_id(&staff_id) {
                if !staff.leaves.contains(&leave) {
                    staff.leaves.push(leave);
                }
            }
        }

        let history_start = params.start - Duration::days(HISTORY_LOOKBACK_DAYS);
        let history = self
            .store
            .get_history(history_start, params.start - Duration::days(1))
            .await?;

        Ok(SimulationInput {
            trames,
            rules,
            roster,
            history,
        })
    }

    async fn run_standard(
        &self,
        params: &SimulationParams,
        reporter: &ProgressReporter,
    ) -> Result<SimulationResult, SimError> {
        self.run_full(params, reporter, Strategy::Standard, json!({ "strategy": "standard" }))
            .await
    }

    /// Recalcul complet : chargement, calcul synchrone, persistance.
    async fn run_full(
        &self,
        params: &SimulationParams,
        reporter: &ProgressReporter,
        strategy: Strategy,
        mut details: Value,
    ) -> Result<SimulationResult, SimError> {
        let input = self.load_inputs(params, reporter).await?;
        reporter.emit(
            ProgressKind::Progress,
            "Calcul des gardes/vacations...",
            40,
            json!({ "scenario_id": params.scenario_id, "phase": "processing", "strategy": strategy.as_str() }),
        );
        let output = compute(&input, params.start, params.end, self.check_opts)?;
        reporter.emit(
            ProgressKind::Progress,
            "Finalisation des résultats...",
            80,
            json!({ "scenario_id": params.scenario_id, "phase": "finalizing", "strategy": strategy.as_str() }),
        );
        if let Value::Object(map) = &mut details {
            map.insert("input_fingerprint".into(), json!(self.fingerprint(params)));
            map.insert("assignments".into(), json!(output.assignments.len()));
            map.insert("conflicts".into(), json!(output.conflicts.len()));
        }
        let result = SimulationResult::completed(params, output.metrics, details);
        self.store.create_result(result).await
    }

    /// Stratégie cache : restitue le résultat antérieur tel quel sur une clé
    /// connue, sinon recalcul complet puis mise en cache.
    async fn run_cached(
        &self,
        params: &SimulationParams,
        reporter: &ProgressReporter,
    ) -> Result<SimulationResult, SimError> {
        let key = self.fingerprint(params);
        let guard = self.key_guard(&key).await;
        let _locked = guard.lock().await;

        if params.options.use_cache {
            if let Some(hit) = self.cache.get(&key).await {
                tracing::debug!(cache_key = %key, "résultat servi depuis le cache");
                reporter.emit(
                    ProgressKind::Progress,
                    "Résultat récupéré depuis le cache",
                    100,
                    json!({ "scenario_id": params.scenario_id, "phase": "cache-hit", "strategy": "cached" }),
                );
                return Ok(hit);
            }
        }

        let details = json!({ "strategy": "cached", "cache_key": key });
        let result = self
            .run_full(params, reporter, Strategy::Cached, details)
            .await?;
        if params.options.use_cache {
            self.cache.set(key, result.clone()).await;
        }
        Ok(result)
    }

    /// Stratégie incrémentale : si la dernière base COMPLETED du scénario a
    /// la même empreinte d'entrées, ses métriques sont restituées dans un
    /// nouveau résultat ; sinon recalcul complet, équivalent au standard.
    async fn run_incremental(
        &self,
        params: &SimulationParams,
        reporter: &ProgressReporter,
    ) -> Result<SimulationResult, SimError> {
        let baseline = self
            .store
            .latest_completed_result(&params.scenario_id)
            .await?;
        let Some(baseline) = baseline else {
            // aucune base : repli en recalcul complet
            return self
                .run_full(
                    params,
                    reporter,
                    Strategy::Incremental,
                    json!({ "strategy": "incremental", "baseline_id": Value::Null, "reused": false }),
                )
                .await;
        };

        reporter.emit(
            ProgressKind::Progress,
            "Analyse des différences...",
            30,
            json!({ "scenario_id": params.scenario_id, "phase": "diff-analysis", "strategy": "incremental" }),
        );
        let fingerprint = self.fingerprint(params);
        let unchanged = baseline_matches(&baseline, &fingerprint, params);

        if unchanged {
            // entrées inchangées : les métriques de la base restent valables,
            // restituées dans un nouveau résultat (la base n'est jamais modifiée)
            reporter.emit(
                ProgressKind::Progress,
                "Finalisation des résultats...",
                90,
                json!({ "scenario_id": params.scenario_id, "phase": "finalizing", "strategy": "incremental" }),
            );
            let details = json!({
                "strategy": "incremental",
                "baseline_id": baseline.id,
                "reused": true,
                "input_fingerprint": fingerprint,
            });
            let result = SimulationResult::completed(params, baseline.metrics.clone(), details);
            return self.store.create_result(result).await;
        }

        reporter.emit(
            ProgressKind::Progress,
            "Recalcul des données modifiées...",
            60,
            json!({ "scenario_id": params.scenario_id, "phase": "partial-recalculation", "strategy": "incremental" }),
        );
        self.run_full(
            params,
            reporter,
            Strategy::Incremental,
            json!({ "strategy": "incremental", "baseline_id": baseline.id, "reused": false }),
        )
        .await
    }

    async fn run_parallel(
        &self,
        params: &SimulationParams,
        reporter: &ProgressReporter,
    ) -> Result<SimulationResult, SimError> {
        let (metrics, batches) = self
            .parallel_metrics(params, reporter, Strategy::Parallel)
            .await?;
        reporter.emit(
            ProgressKind::Progress,
            "Finalisation des résultats...",
            90,
            json!({ "scenario_id": params.scenario_id, "phase": "finalizing", "strategy": "parallel" }),
        );
        let details = json!({
            "strategy": "parallel",
            "batches": batches,
            "batch_size": params.options.batch_size.max(1),
            "input_fingerprint": self.fingerprint(params),
        });
        let result = SimulationResult::completed(params, metrics, details);
        self.store.create_result(result).await
    }

    /// Stratégie hybride : cache, puis base incrémentale, puis parallèle sur
    /// les longues plages, avec repli en recalcul complet.
    async fn run_hybrid(
        &self,
        params: &SimulationParams,
        reporter: &ProgressReporter,
    ) -> Result<SimulationResult, SimError> {
        let key = self.fingerprint(params);
        let guard = self.key_guard(&key).await;
        let _locked = guard.lock().await;

        if params.options.use_cache {
            if let Some(hit) = self.cache.get(&key).await {
                reporter.emit(
                    ProgressKind::Progress,
                    "Résultat récupéré depuis le cache",
                    100,
                    json!({ "scenario_id": params.scenario_id, "phase": "cache-hit", "strategy": "hybrid" }),
                );
                return Ok(hit);
            }
        }

        reporter.emit(
            ProgressKind::Progress,
            "Analyse des données historiques...",
            10,
            json!({ "scenario_id": params.scenario_id, "phase": "analysis", "strategy": "hybrid" }),
        );
        let baseline = self
            .store
            .latest_completed_result(&params.scenario_id)
            .await?
            .filter(|b| baseline_matches(b, &key, params));
        let use_incremental = baseline.is_some();
        let use_parallel = !use_incremental && params.days() > HYBRID_PARALLEL_THRESHOLD_DAYS;
        reporter.emit(
            ProgressKind::Progress,
            "Optimisation de la stratégie...",
            20,
            json!({
                "scenario_id": params.scenario_id,
                "phase": "strategy-selection",
                "strategy": "hybrid",
                "use_incremental": use_incremental,
                "use_parallel": use_parallel,
            }),
        );

        let result = if let Some(baseline) = baseline {
            let details = json!({
                "strategy": "hybrid",
                "used_incremental": true,
                "used_parallel": false,
                "baseline_id": baseline.id,
                "input_fingerprint": key,
            });
            let result = SimulationResult::completed(params, baseline.metrics.clone(), details);
            self.store.create_result(result).await?
        } else if use_parallel {
            let (metrics, batches) = self
                .parallel_metrics(params, reporter, Strategy::Hybrid)
                .await?;
            let details = json!({
                "strategy": "hybrid",
                "used_incremental": false,
                "used_parallel": true,
                "batches": batches,
                "input_fingerprint": key,
            });
            let result = SimulationResult::completed(params, metrics, details);
            self.store.create_result(result).await?
        } else {
            self.run_full(
                params,
                reporter,
                Strategy::Hybrid,
                json!({ "strategy": "hybrid", "used_incremental": false, "used_parallel": false }),
            )
            .await?
        };

        if params.options.use_cache {
            self.cache.set(key, result.clone()).await;
        }
        Ok(result)
    }

    /// Découpe la plage en lots, calcule chaque lot sur un worker sans état
    /// partagé, puis fusionne : couverture en moyenne pondérée, conflits
    /// dédupliqués puis sommés. La fusion est une réduction indépendante de
    /// l'ordre d'achèvement des lots.
    async fn parallel_metrics(
        &self,
        params: &SimulationParams,
        reporter: &ProgressReporter,
        strategy: Strategy,
    ) -> Result<(Metrics, usize), SimError> {
        let input = Arc::new(self.load_inputs(params, reporter).await?);
        let batch_size = params.options.batch_size.max(1);
        let windows = batch_windows(params.start, params.end, batch_size);
        let total_batches = windows.len();
        reporter.emit(
            ProgressKind::Progress,
            "Préparation des lots de traitement...",
            20,
            json!({
                "scenario_id": params.scenario_id,
                "phase": "batching",
                "strategy": strategy.as_str(),
                "batches": total_batches,
            }),
        );

        let mut handles = Vec::with_capacity(total_batches);
        for (window_start, window_end) in windows {
            let input = Arc::clone(&input);
            let opts = self.check_opts;
            let range_start = params.start;
            handles.push(tokio::spawn(async move {
                // reprise d'une journée en amont : les violations de repos au
                // bord du lot restent visibles ; doublons dédupliqués à la fusion
                let lookback_start = (window_start - Duration::days(1)).max(range_start);
                compute_batch(&input, lookback_start, window_start, window_end, opts)
            }));
        }

        let mut parts = Vec::with_capacity(total_batches);
        let mut merged_conflicts: Vec<Conflict> = Vec::new();
        let mut seen = HashSet::new();
        for (index, handle) in handles.into_iter().enumerate() {
            let batch = handle
                .await
                .map_err(|e| SimError::computation(format!("batch {index} aborted: {e}")))??;
            let progress = 20 + (((index + 1) * 60) / total_batches) as u8;
            reporter.emit(
                ProgressKind::Progress,
                &format!("Traitement du lot {}/{}...", index + 1, total_batches),
                progress,
                json!({
                    "scenario_id": params.scenario_id,
                    "phase": "processing",
                    "strategy": strategy.as_str(),
                    "current_batch": index + 1,
                    "total_batches": total_batches,
                }),
            );
            for conflict in batch.conflicts {
                if seen.insert(conflict_key(&conflict)) {
                    merged_conflicts.push(conflict);
                }
            }
            parts.push((batch.metrics, batch.weight));
        }

        reporter.emit(
            ProgressKind::Progress,
            "Fusion des résultats des lots...",
            85,
            json!({ "scenario_id": params.scenario_id, "phase": "merging", "strategy": strategy.as_str() }),
        );
        let mut metrics = metrics::merge_weighted(&parts);
        metrics.conflicts = merged_conflicts.len() as u32;
        Ok((metrics, total_batches))
    }
}

/// Jeu de règles effectif : le sous-ensemble des paramètres prime sur celui
/// du scénario, les exclusions du scénario s'appliquent toujours.
fn effective_rule_ids(scenario: &Scenario, params: &SimulationParams) -> Vec<String> {
    let base = if params.included_rule_ids.is_empty() {
        scenario.included_rule_ids.clone()
    } else {
        params.included_rule_ids.clone()
    };
    base.into_iter()
        .filter(|id| !scenario.excluded_rule_ids.contains(id))
        .collect()
}

fn baseline_matches(baseline: &SimulationResult, fingerprint: &str, params: &SimulationParams) -> bool {
    baseline.start == params.start
        && baseline.end == params.end
        && baseline
            .details
            .get("input_fingerprint")
            .and_then(Value::as_str)
            == Some(fingerprint)
}

/// Cœur synchrone d'une exécution : expansion → remplissage → conflits →
/// agrégation. Pur : mêmes entrées, même sortie, dans le même ordre.
fn compute(
    input: &SimulationInput,
    start: NaiveDate,
    end: NaiveDate,
    opts: CheckOptions,
) -> Result<ComputeOutput, SimError> {
    let mut assignments = Vec::new();
    for trame in &input.trames {
        assignments.extend(template::expand(trame, start, end)?);
    }
    // fusion multi-trames : tri stable, l'ordre interne de chaque trame est
    // conservé au sein d'une même date
    assignments.sort_by_key(|a| a.date);

    let report = scheduler::fill_assignments(
        &mut assignments,
        &input.roster,
        &input.history,
        &input.rules,
        opts,
    );
    let conflicts = scheduler::detect_conflicts(&assignments, &input.roster, opts);
    let mut metrics = metrics::aggregate(&assignments, &conflicts);
    metrics.satisfaction = report.satisfaction();
    Ok(ComputeOutput {
        assignments,
        conflicts,
        metrics,
    })
}

/// Calcule un lot sur [lookback_start, window_end] ; métriques et conflits
/// sont restitués sur la seule fenêtre propre [window_start, window_end].
fn compute_batch(
    input: &SimulationInput,
    lookback_start: NaiveDate,
    window_start: NaiveDate,
    window_end: NaiveDate,
    opts: CheckOptions,
) -> Result<BatchOutput, SimError> {
    let output = compute(input, lookback_start, window_end, opts)?;
    let own: Vec<Assignment> = output
        .assignments
        .into_iter()
        .filter(|a| a.date >= window_start)
        .collect();
    let conflicts: Vec<Conflict> = output
        .conflicts
        .into_iter()
        .filter(|c| c.date >= window_start)
        .collect();
    let weight = own.iter().filter(|a| a.post.required).count();
    let mut metrics = metrics::aggregate(&own, &conflicts);
    metrics.satisfaction = output.metrics.satisfaction;
    Ok(BatchOutput {
        metrics,
        conflicts,
        weight,
    })
}

/// Fenêtres contiguës de `batch_size` jours couvrant [start, end].
fn batch_windows(start: NaiveDate, end: NaiveDate, batch_size: u32) -> Vec<(NaiveDate, NaiveDate)> {
    let mut windows = Vec::new();
    let step = Duration::days(i64::from(batch_size));
    let mut cursor = start;
    while cursor <= end {
        let window_end = (cursor + step - Duration::days(1)).min(end);
        windows.push((cursor, window_end));
        cursor = window_end + Duration::days(1);
    }
    windows
}

/// Clé de déduplication d'un conflit entre lots voisins.
fn conflict_key(conflict: &Conflict) -> String {
    let ids: Vec<&str> = conflict.assignments.iter().map(|id| id.as_str()).collect();
    format!(
        "{}|{}|{}|{}",
        conflict.kind.as_str(),
        conflict.date,
        conflict
            .staff
            .as_ref()
            .map(StaffId::as_str)
            .unwrap_or_default(),
        ids.join(",")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, day).unwrap()
    }

    #[test]
    fn batch_windows_cover_range_without_overlap() {
        let windows = batch_windows(date(3), date(16), 7);
        assert_eq!(windows, vec![(date(3), date(9)), (date(10), date(16))]);

        let uneven = batch_windows(date(3), date(12), 7);
        assert_eq!(uneven, vec![(date(3), date(9)), (date(10), date(12))]);
    }

    #[test]
    fn batch_windows_single_day_range() {
        let windows = batch_windows(date(3), date(3), 7);
        assert_eq!(windows, vec![(date(3), date(3))]);
    }
}
