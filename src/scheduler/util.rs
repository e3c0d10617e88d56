use crate::model::{Assignment, AssignmentCategory, StaffId};
use chrono::{DateTime, NaiveDate, Utc};

pub(super) fn overlaps(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// Dernière affectation de même catégorie d'une personne, strictement avant
/// `before`.
pub(super) fn last_same_category<'a>(
    staff: &StaffId,
    category: AssignmentCategory,
    before: NaiveDate,
    history: &'a [Assignment],
) -> Option<&'a Assignment> {
    history
        .iter()
        .filter(|a| a.category == category && a.date < before && a.assigned.contains(staff))
        .max_by_key(|a| (a.date, a.id.clone()))
}
