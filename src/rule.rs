//! Modèle de règles dynamiques et évaluateur.
//!
//! Une règle porte une chaîne plate de conditions combinées ET/OU de gauche
//! à droite (pas de parenthésage). Les champs et opérateurs forment des
//! ensembles fermés ; les combinaisons incompatibles sont rejetées à la
//! validation, jamais coercées à l'évaluation.

use crate::error::SimError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Catégorie métier d'une règle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCategory {
    Scheduling,
    Safety,
    Workload,
    Custom,
}

/// Nature d'une règle : contrainte opposable ou simple recommandation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    Constraint,
    Recommendation,
}

/// Sévérité d'une règle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleSeverity {
    Error,
    Warning,
    Info,
}

/// Action déclenchée lorsqu'une règle est satisfaite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleAction {
    BlockAssignment,
    Notify,
    RequireValidation,
    SuggestAlternative,
}

/// Champ de contexte évaluable (ensemble fermé).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleField {
    ConsecutiveGuards,
    WeeklyHours,
    RestHours,
    ExperiencedStaffCount,
    StaffRole,
    RoomType,
    DayOfWeek,
    ShiftType,
}

/// Nature de la valeur portée par un champ de contexte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Number,
    Text,
    List,
}

impl RuleField {
    pub fn kind(&self) -> FieldKind {
        match self {
            RuleField::ConsecutiveGuards
            | RuleField::WeeklyHours
            | RuleField::RestHours
            | RuleField::ExperiencedStaffCount
            | RuleField::DayOfWeek => FieldKind::Number,
            RuleField::StaffRole | RuleField::RoomType | RuleField::ShiftType => FieldKind::Text,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleField::ConsecutiveGuards => "consecutive_guards",
            RuleField::WeeklyHours => "weekly_hours",
            RuleField::RestHours => "rest_hours",
            RuleField::ExperiencedStaffCount => "experienced_staff_count",
            RuleField::StaffRole => "staff_role",
            RuleField::RoomType => "room_type",
            RuleField::DayOfWeek => "day_of_week",
            RuleField::ShiftType => "shift_type",
        }
    }
}

/// Opérateur de comparaison (ensemble fermé).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleOperator {
    Equals,
    NotEquals,
    GreaterThan,
    LessThan,
    Contains,
    In,
}

impl RuleOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleOperator::Equals => "equals",
            RuleOperator::NotEquals => "not_equals",
            RuleOperator::GreaterThan => "greater_than",
            RuleOperator::LessThan => "less_than",
            RuleOperator::Contains => "contains",
            RuleOperator::In => "in",
        }
    }
}

/// Table de compatibilité (nature du champ, opérateur), consultée à la
/// validation : une combinaison refusée ici ne parvient jamais à l'évaluateur.
fn operator_compatible(kind: FieldKind, operator: RuleOperator) -> bool {
    match operator {
        RuleOperator::Equals | RuleOperator::NotEquals | RuleOperator::In => true,
        RuleOperator::GreaterThan | RuleOperator::LessThan => kind == FieldKind::Number,
        RuleOperator::Contains => matches!(kind, FieldKind::Text | FieldKind::List),
    }
}

/// Valeur typée d'une condition ou d'un champ de contexte.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    /// Valeur numérique, sans coercition : un texte "3" n'est pas un nombre.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Number(n as f64)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        FieldValue::List(items)
    }
}

/// Combinateur logique vers la condition précédente.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CondLogic {
    And,
    Or,
}

/// Condition élémentaire d'une règle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleCondition {
    pub field: RuleField,
    pub operator: RuleOperator,
    pub value: FieldValue,
    /// Liaison avec la condition précédente ; absente sur la première.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logic: Option<CondLogic>,
}

/// Règle de planification.
///
/// Éditée par un administrateur en dehors du moteur ; chargée en lecture
/// seule pour chaque simulation, jamais modifiée ici.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category: RuleCategory,
    pub kind: RuleKind,
    pub severity: RuleSeverity,
    #[serde(default = "default_true")]
    pub active: bool,
    pub action: RuleAction,
    pub conditions: Vec<RuleCondition>,
}

fn default_true() -> bool {
    true
}

impl Rule {
    pub fn validate(&self) -> Result<(), SimError> {
        if self.name.trim().is_empty() {
            return Err(SimError::validation(format!(
                "rule {}: name cannot be empty",
                self.id
            )));
        }
        if self.conditions.is_empty() {
            return Err(SimError::validation(format!(
                "rule {}: at least one condition required",
                self.id
            )));
        }
        for (index, cond) in self.conditions.iter().enumerate() {
            if index == 0 && cond.logic.is_some() {
                return Err(SimError::validation(format!(
                    "rule {}: first condition must not carry a logic operator",
                    self.id
                )));
            }
            if index > 0 && cond.logic.is_none() {
                return Err(SimError::validation(format!(
                    "rule {}: condition {} missing its logic operator",
                    self.id, index
                )));
            }
            if !operator_compatible(cond.field.kind(), cond.operator) {
                return Err(SimError::validation(format!(
                    "rule {}: operator {} not applicable to field {}",
                    self.id,
                    cond.operator.as_str(),
                    cond.field.as_str()
                )));
            }
        }
        Ok(())
    }
}

/// Contexte d'évaluation : valeurs observées pour une affectation candidate.
#[derive(Debug, Clone, Default)]
pub struct RuleContext {
    values: HashMap<RuleField, FieldValue>,
}

impl RuleContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set<V: Into<FieldValue>>(mut self, field: RuleField, value: V) -> Self {
        self.values.insert(field, value.into());
        self
    }

    pub fn insert<V: Into<FieldValue>>(&mut self, field: RuleField, value: V) {
        self.values.insert(field, value.into());
    }

    pub fn get(&self, field: RuleField) -> Option<&FieldValue> {
        self.values.get(&field)
    }
}

/// Évalue la chaîne de conditions d'une règle, de gauche à droite.
///
/// Pas de parenthésage : `a OU b ET c` se lit `(a OU b) ET c`. Un champ
/// absent du contexte rend la condition fausse (échec fermé).
pub fn evaluate(rule: &Rule, ctx: &RuleContext) -> bool {
    let mut conditions = rule.conditions.iter();
    let Some(first) = conditions.next() else {
        return false;
    };
    let mut acc = condition_matches(first, ctx);
    for cond in conditions {
        let current = condition_matches(cond, ctx);
        acc = match cond.logic.unwrap_or(CondLogic::And) {
            CondLogic::And => acc && current,
            CondLogic::Or => acc || current,
        };
    }
    acc
}

fn condition_matches(cond: &RuleCondition, ctx: &RuleContext) -> bool {
    let Some(observed) = ctx.get(cond.field) else {
        return false;
    };
    match cond.operator {
        RuleOperator::Equals => values_equal(observed, &cond.value),
        RuleOperator::NotEquals => !values_equal(observed, &cond.value),
        // comparaison strictement numérique : échec fermé sur tout opérande
        // non numérique plutôt qu'un faux positif silencieux
        RuleOperator::GreaterThan => match (observed.as_number(), cond.value.as_number()) {
            (Some(a), Some(b)) => a > b,
            _ => false,
        },
        RuleOperator::LessThan => match (observed.as_number(), cond.value.as_number()) {
            (Some(a), Some(b)) => a < b,
            _ => false,
        },
        RuleOperator::Contains => match (observed, &cond.value) {
            (FieldValue::Text(haystack), FieldValue::Text(needle)) => haystack.contains(needle),
            (FieldValue::List(items), FieldValue::Text(needle)) => items.contains(needle),
            _ => false,
        },
        // la valeur observée est traitée comme une liste : un scalaire vaut
        // liste à un élément
        RuleOperator::In => match observed {
            FieldValue::List(items) => match &cond.value {
                FieldValue::Text(needle) => items.contains(needle),
                _ => false,
            },
            scalar => values_equal(scalar, &cond.value),
        },
    }
}

fn values_equal(a: &FieldValue, b: &FieldValue) -> bool {
    match (a, b) {
        (FieldValue::Number(x), FieldValue::Number(y)) => x == y,
        (FieldValue::Text(x), FieldValue::Text(y)) => x == y,
        (FieldValue::List(x), FieldValue::List(y)) => x == y,
        _ => false,
    }
}

/// Partition des contraintes satisfaites, par sévérité.
#[derive(Debug, Clone, Default)]
pub struct RuleSetOutcome {
    /// Contraintes bloquantes (action `block_assignment`, sévérité `error`)
    pub blocked: Vec<Rule>,
    pub warnings: Vec<Rule>,
    pub infos: Vec<Rule>,
}

impl RuleSetOutcome {
    pub fn blocks(&self) -> bool {
        !self.blocked.is_empty()
    }
}

/// Évalue un jeu de règles et partitionne les contraintes satisfaites.
///
/// Seule la combinaison action=`block_assignment` et sévérité=`error`
/// bloque ; `notify` ne bloque jamais. Une règle `block_assignment` de
/// sévérité moindre est une anomalie de configuration : la sévérité prime,
/// la règle est rétrogradée et signalée dans le journal.
pub fn evaluate_rule_set(rules: &[Rule], ctx: &RuleContext) -> RuleSetOutcome {
    let mut outcome = RuleSetOutcome::default();
    for rule in rules {
        if !rule.active || rule.kind != RuleKind::Constraint {
            continue;
        }
        if !evaluate(rule, ctx) {
            continue;
        }
        if rule.action == RuleAction::BlockAssignment && rule.severity != RuleSeverity::Error {
            tracing::warn!(
                rule_id = %rule.id,
                severity = ?rule.severity,
                "règle block_assignment de sévérité non bloquante, la sévérité prime"
            );
        }
        match (rule.severity, rule.action) {
            (RuleSeverity::Error, RuleAction::BlockAssignment) => outcome.blocked.push(rule.clone()),
            (RuleSeverity::Error, _) | (RuleSeverity::Warning, _) => {
                outcome.warnings.push(rule.clone())
            }
            (RuleSeverity::Info, _) => outcome.infos.push(rule.clone()),
        }
    }
    outcome
}
