//! Allocation (allotment outcome) model.

use serde::{Deserialize, Serialize};

use super::OrderKey;

/// The outcome of one student's turn.
///
/// Exactly one `Allocation` exists per input student. `college_id` is
/// `None` iff no preference produced an admission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    /// Position of the student in the normalized student table.
    pub student_index: usize,
    /// Student id (denormalized for joins and display).
    pub student_id: Option<i64>,
    /// Admitted college, if any.
    pub college_id: Option<i64>,
    /// Admitted institution name, or the unallocated label.
    pub institution: String,
    /// Preference number that produced the admission.
    pub pref_number: Option<OrderKey>,
    /// Category admitted under, or the student's raw category.
    pub category_used: String,
}

impl Allocation {
    /// Creates a successful allocation.
    pub fn allotted(
        student_index: usize,
        student_id: Option<i64>,
        college_id: i64,
        institution: impl Into<String>,
        pref_number: OrderKey,
        category_used: impl Into<String>,
    ) -> Self {
        Self {
            student_index,
            student_id,
            college_id: Some(college_id),
            institution: institution.into(),
            pref_number: Some(pref_number),
            category_used: category_used.into(),
        }
    }

    /// Creates an allocation for a student who got no seat.
    pub fn unallocated(
        student_index: usize,
        student_id: Option<i64>,
        label: impl Into<String>,
        raw_category: impl Into<String>,
    ) -> Self {
        Self {
            student_index,
            student_id,
            college_id: None,
            institution: label.into(),
            pref_number: None,
            category_used: raw_category.into(),
        }
    }

    /// Whether a seat was committed.
    #[inline]
    pub fn is_allocated(&self) -> bool {
        self.college_id.is_some()
    }
}
