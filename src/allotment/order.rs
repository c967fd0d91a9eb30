//! Processing order.
//!
//! Who is served first decides who wins a contested seat, so the order is
//! computed here, once, and nowhere else.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::models::{Preference, Student};

/// Compares two optional keys, placing missing values last.
fn missing_last<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Student priority: rank ascending, then id ascending, missing keys last.
pub fn priority_cmp(a: &Student, b: &Student) -> Ordering {
    missing_last(a.rank, b.rank).then_with(|| missing_last(a.id, b.id))
}

/// Indices of `students` in the order they are served.
///
/// The sort is stable: students with identical keys keep input order.
pub fn processing_order(students: &[Student]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..students.len()).collect();
    indices.sort_by(|&a, &b| priority_cmp(&students[a], &students[b]));
    indices
}

/// Preference lists grouped by student, each in scan order.
#[derive(Debug, Clone, Default)]
pub struct PreferenceBook {
    lists: HashMap<i64, Vec<Preference>>,
}

impl PreferenceBook {
    /// Groups and orders preference rows by `(pref_number, college_id)`.
    pub fn new(preferences: &[Preference]) -> Self {
        let mut lists: HashMap<i64, Vec<Preference>> = HashMap::new();
        for p in preferences {
            lists.entry(p.student_id).or_default().push(*p);
        }
        for list in lists.values_mut() {
            list.sort_by(Preference::scan_cmp);
        }
        Self { lists }
    }

    /// Ordered list of a student. Empty for unknown or missing ids.
    pub fn for_student(&self, student_id: Option<i64>) -> &[Preference] {
        student_id
            .and_then(|id| self.lists.get(&id))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of students with at least one preference.
    pub fn student_count(&self) -> usize {
        self.lists.len()
    }
}
