//! Preference (option entry) model.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::OrderKey;

/// One entry of a student's ranked college list.
///
/// Only fully parsed rows become `Preference`s; rows with a missing
/// student, college or preference number are dropped by the normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Preference {
    /// Owning student.
    pub student_id: i64,
    /// Preferred college.
    pub college_id: i64,
    /// Preference position (lower = more preferred).
    pub pref_number: OrderKey,
}

impl Preference {
    /// Creates a preference entry.
    pub fn new(student_id: i64, college_id: i64, pref_number: i64) -> Self {
        Self {
            student_id,
            college_id,
            pref_number: OrderKey::from(pref_number),
        }
    }

    /// Scan order within one student's list: `(pref_number, college_id)`.
    #[inline]
    pub fn scan_cmp(&self, other: &Self) -> Ordering {
        self.pref_number
            .cmp(&other.pref_number)
            .then(self.college_id.cmp(&other.college_id))
    }
}
