#![forbid(unsafe_code)]
//! Simulateur — moteur de simulation de planning hospitalier (sans BD ni web).
//!
//! - Trames récurrentes (semaines paires/impaires, alternance mensuelle)
//!   développées en affectations datées.
//! - Règles dynamiques (contraintes et recommandations) évaluées par
//!   affectation candidate.
//! - Aptitude, rotation équitable et détection de conflits (repos,
//!   chevauchements, couverture).
//! - Stratégies d'exécution : standard, incrémentale, cache, parallèle,
//!   hybride ; mêmes résultats, techniques différentes.
//! - Tout en UTC ; les dates calendaires sont des `NaiveDate`.

pub mod error;
pub mod logging;
pub mod metrics;
pub mod model;
pub mod rule;
pub mod scheduler;
pub mod simulation;
pub mod storage;
pub mod template;

pub use error::SimError;
pub use metrics::{aggregate, Metrics};
pub use model::{
    Assignment, AssignmentCategory, AssignmentId, AssignmentStatus, LeavePeriod, Post, Roster,
    Staff, StaffId, StaffRole,
};
pub use rule::{
    evaluate, evaluate_rule_set, CondLogic, FieldValue, Rule, RuleAction, RuleCategory,
    RuleCondition, RuleContext, RuleField, RuleKind, RuleOperator, RuleSetOutcome, RuleSeverity,
};
pub use scheduler::{
    check_eligibility, detect_conflicts, fill_assignments, rank_candidates, CheckOptions,
    Conflict, ConflictKind, ConflictSeverity, Eligibility, EligibilityScore, FillReport,
};
pub use simulation::{
    cache_key, ChannelProgress, MemoryCache, MemoryStore, NoOpProgress, PlanningStore,
    ProgressEvent, ProgressKind, ProgressPublisher, Scenario, SimulationCache, SimulationOptions,
    SimulationParams, SimulationResult, SimulationStatus, Simulator, Strategy,
};
pub use storage::{JsonStorage, ScenarioBundle, Storage};
pub use template::{expand, MonthType, Period, RecurrenceType, Slot, Trame, WeekType};
