use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifiant fort pour Staff
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StaffId(String);

impl StaffId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifiant fort pour Assignment (affectation développée)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssignmentId(String);

impl AssignmentId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Rôle professionnel du personnel du bloc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StaffRole {
    /// Médecin anesthésiste-réanimateur
    Mar,
    /// Chirurgien
    Surgeon,
    /// Infirmier anesthésiste
    Iade,
    /// Infirmier de bloc opératoire
    Ibode,
}

impl StaffRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            StaffRole::Mar => "MAR",
            StaffRole::Surgeon => "SURGEON",
            StaffRole::Iade => "IADE",
            StaffRole::Ibode => "IBODE",
        }
    }
}

/// Catégorie d'affectation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssignmentCategory {
    /// Garde de 24 h sur place
    Garde,
    /// Astreinte (disponibilité, non présentiel)
    Astreinte,
    /// Vacation de bloc opératoire
    Bloc,
    /// Consultation
    Consultation,
}

impl AssignmentCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentCategory::Garde => "GARDE",
            AssignmentCategory::Astreinte => "ASTREINTE",
            AssignmentCategory::Bloc => "BLOC",
            AssignmentCategory::Consultation => "CONSULTATION",
        }
    }
}

/// Période de congé d'une personne (intervalle UTC [start, end)).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeavePeriod {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl LeavePeriod {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, String> {
        if end <= start {
            return Err("leave end must be after start".to_string());
        }
        Ok(Self { start, end })
    }

    /// Vrai si le congé recouvre l'intervalle [start, end).
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start < end && start < self.end
    }
}

/// Besoin en personnel pour un créneau.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub role: StaffRole,
    #[serde(default = "default_true")]
    pub required: bool,
    pub min_count: u8,
    pub max_count: u8,
}

impl Post {
    pub fn new(role: StaffRole, min_count: u8, max_count: u8) -> Self {
        Self {
            role,
            required: true,
            min_count,
            max_count,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Personne (membre du personnel)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Staff {
    pub id: StaffId,
    pub handle: String,
    pub display_name: String,
    pub role: StaffRole,
    #[serde(default)]
    pub experienced: bool,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub leaves: Vec<LeavePeriod>,
}

impl Staff {
    pub fn new<H: Into<String>, D: Into<String>>(
        handle: H,
        display_name: D,
        role: StaffRole,
    ) -> Self {
        Self {
            id: StaffId::random(),
            handle: handle.into(),
            display_name: display_name.into(),
            role,
            experienced: false,
            active: true,
            leaves: Vec::new(),
        }
    }

    /// Vrai si un congé déclaré recouvre l'intervalle donné.
    pub fn on_leave(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.leaves.iter().any(|l| l.overlaps(start, end))
    }
}

/// Statut d'une affectation développée.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    /// Poste non pourvu (aucun candidat retenu, ou effectif sous le minimum)
    Unresolved,
    /// Poste pourvu
    Assigned,
    /// Créneau en conflit dès l'expansion (chevauchement dans la trame)
    Conflicted,
}

/// Affectation concrète datée, produite par l'expansion d'une trame.
///
/// Éphémère : une par combinaison (date, période, créneau, poste) ; le
/// personnel retenu reste vide tant que la passe d'affectation n'a pas tourné.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: AssignmentId,
    pub date: NaiveDate,
    pub period_id: String,
    pub slot_id: String,
    pub category: AssignmentCategory,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub post: Post,
    #[serde(default)]
    pub assigned: Vec<StaffId>,
    pub status: AssignmentStatus,
}

impl Assignment {
    /// Durée en minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Vrai si l'effectif retenu atteint le minimum du poste.
    pub fn fully_staffed(&self) -> bool {
        self.assigned.len() >= usize::from(self.post.min_count)
    }
}

/// Effectif disponible pour une simulation.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Roster {
    pub staff: Vec<Staff>,
}

impl Roster {
    pub fn find_by_handle<'a>(&'a self, handle: &str) -> Option<&'a Staff> {
        self.staff.iter().find(|s| s.handle == handle)
    }
    pub fn find_by_id<'a>(&'a self, id: &StaffId) -> Option<&'a Staff> {
        self.staff.iter().find(|s| &s.id == id)
    }
    pub fn find_mut_by_id(&mut self, id: &StaffId) -> Option<&mut Staff> {
        self.staff.iter_mut().find(|s| &s.id == id)
    }
}
