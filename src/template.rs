//! Trames : modèles récurrents de planning et leur expansion en
//! affectations datées.

use crate::error::SimError;
use crate::model::{Assignment, AssignmentCategory, AssignmentId, AssignmentStatus, Post};
use chrono::{
    DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Type de semaine sur lequel une trame s'applique (parité ISO).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WeekType {
    #[default]
    Toutes,
    Paires,
    Impaires,
}

/// Type de mois (variante d'alternance mensuelle).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MonthType {
    #[default]
    Tous,
    Pairs,
    Impairs,
}

/// Type de récurrence d'une trame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecurrenceType {
    /// Application répétée chaque semaine éligible
    #[default]
    Hebdomadaire,
    /// Application unique à la date de début de la plage
    Aucune,
}

/// Trame : modèle récurrent de périodes, créneaux et postes.
///
/// Rédigée en dehors du moteur ; lue en lecture seule ici. L'expansion
/// produit des affectations éphémères, jamais réinjectées dans la trame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trame {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub recurrence: RecurrenceType,
    #[serde(default)]
    pub week_type: WeekType,
    #[serde(default)]
    pub month_type: MonthType,
    pub effective_start: NaiveDate,
    /// Absente : trame sans date de fin d'effet (ouverte).
    #[serde(default)]
    pub effective_end: Option<NaiveDate>,
    #[serde(default)]
    pub site_id: Option<String>,
    #[serde(default)]
    pub periods: Vec<Period>,
}

/// Période d'une trame : fenêtre horaire et jours ISO actifs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Period {
    pub id: String,
    pub name: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[serde(default = "default_true")]
    pub active: bool,
    /// Jours ISO actifs (lundi = 1 .. dimanche = 7).
    pub days: Vec<u8>,
    #[serde(default)]
    pub slots: Vec<Slot>,
}

/// Créneau d'une période : catégorie, horaire, postes requis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub id: String,
    pub category: AssignmentCategory,
    pub start_time: NaiveTime,
    pub duration_minutes: u32,
    /// Autorise le chevauchement avec d'autres créneaux de la même période.
    #[serde(default)]
    pub concurrent_allowed: bool,
    #[serde(default)]
    pub posts: Vec<Post>,
}

fn default_true() -> bool {
    true
}

impl Trame {
    /// Validation stricte, utilisée avant toute simulation.
    ///
    /// Le chevauchement de créneaux non concurrents est ici une erreur dure ;
    /// `expand` applique la variante souple (marquage `Conflicted`).
    pub fn validate(&self) -> Result<(), SimError> {
        if self.id.trim().is_empty() {
            return Err(SimError::validation("trame id cannot be empty"));
        }
        if self.name.trim().is_empty() {
            return Err(SimError::validation("trame name cannot be empty"));
        }
        if let Some(end) = self.effective_end {
            if end < self.effective_start {
                return Err(SimError::validation(format!(
                    "trame {}: effective_end precedes effective_start",
                    self.id
                )));
            }
        }
        if self.periods.is_empty() {
            return Err(SimError::validation(format!(
                "trame {}: at least one period required",
                self.id
            )));
        }
        for period in &self.periods {
            period.validate(&self.id)?;
        }
        Ok(())
    }
}

impl Period {
    fn validate(&self, trame_id: &str) -> Result<(), SimError> {
        if self.id.trim().is_empty() {
            return Err(SimError::validation(format!(
                "trame {}: period id cannot be empty",
                trame_id
            )));
        }
        if self.days.is_empty() {
            return Err(SimError::validation(format!(
                "period {}: at least one active day required",
                self.id
            )));
        }
        if self.days.iter().any(|d| !(1..=7).contains(d)) {
            return Err(SimError::validation(format!(
                "period {}: days must be ISO weekday numbers 1..=7",
                self.id
            )));
        }
        if self.start_time == self.end_time {
            return Err(SimError::validation(format!(
                "period {}: start_time and end_time cannot be equal",
                self.id
            )));
        }
        if self.slots.is_empty() {
            return Err(SimError::validation(format!(
                "period {}: at least one slot required",
                self.id
            )));
        }
        for slot in &self.slots {
            slot.validate(&self.id)?;
        }
        if let Some((a, b)) = first_overlapping_pair(&self.slots) {
            return Err(SimError::validation(format!(
                "period {}: slots {} and {} overlap without concurrent_allowed",
                self.id, a, b
            )));
        }
        Ok(())
    }
}

impl Slot {
    fn validate(&self, period_id: &str) -> Result<(), SimError> {
        if self.id.trim().is_empty() {
            return Err(SimError::validation(format!(
                "period {}: slot id cannot be empty",
                period_id
            )));
        }
        if self.duration_minutes == 0 {
            return Err(SimError::validation(format!(
                "slot {}: duration must be positive",
                self.id
            )));
        }
        if self.posts.is_empty() {
            return Err(SimError::validation(format!(
                "slot {}: at least one post required",
                self.id
            )));
        }
        for post in &self.posts {
            if post.min_count == 0 || post.max_count < post.min_count {
                return Err(SimError::validation(format!(
                    "slot {}: post {} headcount bounds invalid",
                    self.id,
                    post.role.as_str()
                )));
            }
        }
        Ok(())
    }
}

/// Développe la trame en affectations datées sur [range_start, range_end].
///
/// Pur et idempotent : deux appels identiques produisent la même liste dans
/// le même ordre (date, puis ordre des périodes, des créneaux, des postes).
/// Les dates hors fenêtre d'effet sont ignorées sans erreur ; les jours
/// fériés ne sont jamais exclus ici (affaire de règles, pas d'expansion).
pub fn expand(
    trame: &Trame,
    range_start: NaiveDate,
    range_end: NaiveDate,
) -> Result<Vec<Assignment>, SimError> {
    if range_end < range_start {
        return Err(SimError::validation("range end must not precede range start"));
    }

    let mut out = Vec::new();
    match trame.recurrence {
        RecurrenceType::Aucune => {
            if within_effect(trame, range_start) {
                emit_day(trame, range_start, &mut out);
            }
        }
        RecurrenceType::Hebdomadaire => {
            let mut current = range_start;
            while current <= range_end {
                if within_effect(trame, current)
                    && week_matches(trame.week_type, current)
                    && month_matches(trame.month_type, current)
                {
                    emit_day(trame, current, &mut out);
                }
                current = current
                    .succ_opt()
                    .ok_or_else(|| SimError::computation("date overflow during expansion"))?;
            }
        }
    }
    Ok(out)
}

fn within_effect(trame: &Trame, date: NaiveDate) -> bool {
    date >= trame.effective_start && trame.effective_end.map_or(true, |end| date <= end)
}

fn week_matches(week_type: WeekType, date: NaiveDate) -> bool {
    match week_type {
        WeekType::Toutes => true,
        WeekType::Paires => date.iso_week().week() % 2 == 0,
        WeekType::Impaires => date.iso_week().week() % 2 == 1,
    }
}

fn month_matches(month_type: MonthType, date: NaiveDate) -> bool {
    match month_type {
        MonthType::Tous => true,
        MonthType::Pairs => date.month() % 2 == 0,
        MonthType::Impairs => date.month() % 2 == 1,
    }
}

fn emit_day(trame: &Trame, date: NaiveDate, out: &mut Vec<Assignment>) {
    let weekday = date.weekday().number_from_monday() as u8;
    for period in &trame.periods {
        if !period.active || !period.days.contains(&weekday) {
            continue;
        }
        let conflicted = conflicted_slot_ids(&period.slots);
        for slot in &period.slots {
            let (start, end) = slot_datetimes(date, slot);
            let status = if conflicted.contains(slot.id.as_str()) {
                AssignmentStatus::Conflicted
            } else {
                AssignmentStatus::Unresolved
            };
            for (post_index, post) in slot.posts.iter().enumerate() {
                out.push(Assignment {
                    id: instance_id(&trame.id, date, &period.id, &slot.id, post_index),
                    date,
                    period_id: period.id.clone(),
                    slot_id: slot.id.clone(),
                    category: slot.category,
                    start,
                    end,
                    post: post.clone(),
                    assigned: Vec::new(),
                    status,
                });
            }
        }
    }
}

/// Identifiant stable et reproductible d'une affectation développée.
fn instance_id(
    trame_id: &str,
    date: NaiveDate,
    period_id: &str,
    slot_id: &str,
    post_index: usize,
) -> AssignmentId {
    AssignmentId::new(format!(
        "{trame_id}:{date}:{period_id}:{slot_id}:{post_index}"
    ))
}

fn slot_datetimes(date: NaiveDate, slot: &Slot) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = Utc.from_utc_datetime(&NaiveDateTime::new(date, slot.start_time));
    let end = start + Duration::minutes(i64::from(slot.duration_minutes));
    (start, end)
}

/// Créneaux d'une période en chevauchement sans `concurrent_allowed`.
fn conflicted_slot_ids(slots: &[Slot]) -> HashSet<&str> {
    let mut out = HashSet::new();
    for (i, a) in slots.iter().enumerate() {
        for b in slots.iter().skip(i + 1) {
            if a.concurrent_allowed || b.concurrent_allowed {
                continue;
            }
            if slots_overlap(a, b) {
                out.insert(a.id.as_str());
                out.insert(b.id.as_str());
            }
        }
    }
    out
}

fn slots_overlap(a: &Slot, b: &Slot) -> bool {
    let (a_start, a_end) = slot_bounds_seconds(a);
    let (b_start, b_end) = slot_bounds_seconds(b);
    !(a_end <= b_start || b_end <= a_start)
}

fn slot_bounds_seconds(slot: &Slot) -> (i64, i64) {
    let start = i64::from(slot.start_time.num_seconds_from_midnight());
    let end = start + i64::from(slot.duration_minutes) * 60;
    (start, end)
}

fn first_overlapping_pair(slots: &[Slot]) -> Option<(&str, &str)> {
    for (i, a) in slots.iter().enumerate() {
        for b in slots.iter().skip(i + 1) {
            if a.concurrent_allowed || b.concurrent_allowed {
                continue;
            }
            if slots_overlap(a, b) {
                return Some((a.id.as_str(), b.id.as_str()));
            }
        }
    }
    None
}
