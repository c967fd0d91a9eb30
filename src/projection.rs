//! Result projection.
//!
//! Joins allocations back to the students they were made for and emits
//! the published relation, one row per allocation, in allocation order.

use std::collections::HashMap;

use crate::models::{Allocation, ResultRow, Student};

/// Projects allocations onto result rows.
///
/// Each allocation is matched to its originating student by table
/// position, falling back to the first student with the same id. An
/// allocation with no matching student still yields a row, with the
/// display fields left empty.
///
/// Blank display text is published as `None`, the same value an empty
/// cell reads back as, so a written result re-reads unchanged.
pub fn project(students: &[Student], allocations: &[Allocation]) -> Vec<ResultRow> {
    let mut by_id: HashMap<i64, &Student> = HashMap::new();
    for s in students {
        if let Some(id) = s.id {
            by_id.entry(id).or_insert(s);
        }
    }

    allocations
        .iter()
        .map(|a| {
            let student = students
                .get(a.student_index)
                .filter(|s| s.id == a.student_id)
                .or_else(|| a.student_id.and_then(|id| by_id.get(&id).copied()));
            row(a, student)
        })
        .collect()
}

fn row(allocation: &Allocation, student: Option<&Student>) -> ResultRow {
    ResultRow {
        unique_id: allocation.student_id,
        name: student.and_then(|s| display(&s.name)),
        gender: student.and_then(|s| display(&s.gender)),
        caste: student.and_then(|s| display(&s.category)),
        rank: student.and_then(|s| s.rank),
        college_id: allocation.college_id,
        institution: allocation.institution.clone(),
        pref_number: allocation.pref_number,
    }
}

fn display(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OrderKey;

    fn students() -> Vec<Student> {
        vec![
            Student::new(1, 2).with_name("Anu").with_gender("F").with_category("SC"),
            Student::new(2, 1).with_name("Babu").with_gender("M").with_category("GEN"),
        ]
    }

    #[test]
    fn test_project_joins_display_fields() {
        let allocations = vec![
            Allocation::unallocated(1, Some(2), "No College Available", "GEN"),
            Allocation::allotted(0, Some(1), 10, "Alpha", OrderKey::from(1), "SC"),
        ];
        let rows = project(&students(), &allocations);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].unique_id, Some(2));
        assert_eq!(rows[0].name.as_deref(), Some("Babu"));
        assert_eq!(rows[0].caste.as_deref(), Some("GEN"));
        assert_eq!(rows[0].rank, Some(OrderKey::from(1)));
        assert_eq!(rows[0].college_id, None);
        assert_eq!(rows[0].pref_number, None);

        assert_eq!(rows[1].name.as_deref(), Some("Anu"));
        assert_eq!(rows[1].college_id, Some(10));
        assert_eq!(rows[1].institution, "Alpha");
        assert_eq!(rows[1].pref_number, Some(OrderKey::from(1)));
    }

    #[test]
    fn test_unmatched_student_propagates_nulls() {
        let allocations = vec![Allocation::allotted(7, Some(99), 10, "Alpha", OrderKey::from(1), "SC")];
        let rows = project(&students(), &allocations);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].unique_id, Some(99));
        assert_eq!(rows[0].name, None);
        assert_eq!(rows[0].gender, None);
        assert_eq!(rows[0].caste, None);
        assert_eq!(rows[0].rank, None);
        assert_eq!(rows[0].college_id, Some(10));
    }

    #[test]
    fn test_blank_display_fields_are_none() {
        let students = vec![Student::new(3, 1).with_name("Devi")];
        let allocations = vec![Allocation::unallocated(0, Some(3), "none", "")];
        let rows = project(&students, &allocations);

        assert_eq!(rows[0].name.as_deref(), Some("Devi"));
        assert_eq!(rows[0].gender, None);
        assert_eq!(rows[0].caste, None);
    }

    #[test]
    fn test_falls_back_to_id_when_index_mismatches() {
        let allocations = vec![Allocation::unallocated(0, Some(2), "none", "GEN")];
        let rows = project(&students(), &allocations);
        assert_eq!(rows[0].name.as_deref(), Some("Babu"));
    }

    #[test]
    fn test_duplicate_ids_keep_their_own_fields() {
        let students = vec![
            Student::new(5, 1).with_name("first"),
            Student::new(5, 2).with_name("second"),
        ];
        let allocations = vec![
            Allocation::unallocated(0, Some(5), "none", ""),
            Allocation::unallocated(1, Some(5), "none", ""),
        ];
        let rows = project(&students, &allocations);
        assert_eq!(rows[0].name.as_deref(), Some("first"));
        assert_eq!(rows[1].name.as_deref(), Some("second"));
    }
}
