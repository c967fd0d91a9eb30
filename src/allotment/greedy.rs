//! Rank-priority greedy seat allocator.
//!
//! # Algorithm
//!
//! 1. Order students by (rank, id), missing keys last.
//! 2. For each student, resolve their category against the quota set.
//! 3. Walk their preferences by (pref number, college id).
//! 4. Commit the first college whose bucket for that category admits them.
//! 5. Otherwise record the student as unallocated.
//!
//! # Complexity
//! O(s log s + p log p) where s=students, p=preference rows.

use tracing::{debug, info, warn};

use crate::ledger::SeatLedger;
use crate::models::{Allocation, CategorySet, College, Preference, Student};
use crate::normalize::NormalizedInput;

use super::order::{processing_order, PreferenceBook};

/// Institution text recorded for students who got no seat.
pub const UNALLOCATED_LABEL: &str = "No College Available";

/// Result of one allotment run.
#[derive(Debug, Clone, Default)]
pub struct AllotmentOutcome {
    /// One allocation per student, in processing order.
    pub allocations: Vec<Allocation>,
    /// Final ledger state, in college-id order.
    pub colleges: Vec<College>,
}

impl AllotmentOutcome {
    /// Number of students who received a seat.
    pub fn allocated_count(&self) -> usize {
        self.allocations.iter().filter(|a| a.is_allocated()).count()
    }

    /// Number of students who received no seat.
    pub fn unallocated_count(&self) -> usize {
        self.allocations.len() - self.allocated_count()
    }

    /// Allocations committed against a college.
    pub fn allocations_for_college(&self, college_id: i64) -> Vec<&Allocation> {
        self.allocations
            .iter()
            .filter(|a| a.college_id == Some(college_id))
            .collect()
    }

    /// First allocation recorded for a student id.
    pub fn allocation_for_student(&self, student_id: i64) -> Option<&Allocation> {
        self.allocations
            .iter()
            .find(|a| a.student_id == Some(student_id))
    }

    /// Final state of a college.
    pub fn college(&self, college_id: i64) -> Option<&College> {
        self.colleges.iter().find(|c| c.college_id == college_id)
    }
}

impl Default for SeatAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// Rank-priority, preference-respecting, quota-constrained allocator.
///
/// # Example
///
/// ```
/// use u_allot::allotment::SeatAllocator;
/// use u_allot::models::{College, Preference, Student};
///
/// let students = vec![
///     Student::new(1, 1).with_category("SC"),
///     Student::new(2, 2).with_category("SC"),
/// ];
/// let colleges = vec![College::new(10).with_institution("Alpha").with_quota("SC", 1)];
/// let preferences = vec![Preference::new(1, 10, 1), Preference::new(2, 10, 1)];
///
/// let outcome = SeatAllocator::new().allocate(&students, &colleges, &preferences);
/// assert_eq!(outcome.allocations[0].college_id, Some(10));
/// assert_eq!(outcome.allocations[1].college_id, None);
/// ```
#[derive(Debug, Clone)]
pub struct SeatAllocator {
    categories: CategorySet,
    unallocated_label: String,
}

impl SeatAllocator {
    /// Creates an allocator with the default quota set.
    pub fn new() -> Self {
        Self {
            categories: CategorySet::default(),
            unallocated_label: UNALLOCATED_LABEL.to_string(),
        }
    }

    /// Sets the quota set.
    pub fn with_categories(mut self, categories: CategorySet) -> Self {
        self.categories = categories;
        self
    }

    /// Sets the institution text for unallocated students.
    pub fn with_unallocated_label(mut self, label: impl Into<String>) -> Self {
        self.unallocated_label = label.into();
        self
    }

    /// The quota set students are admitted under.
    pub fn categories(&self) -> &CategorySet {
        &self.categories
    }

    /// The institution text for unallocated students.
    pub fn unallocated_label(&self) -> &str {
        &self.unallocated_label
    }

    /// Runs one allotment pass.
    ///
    /// The ledger is built from `colleges`, owned by this call, and
    /// returned as the final snapshot in the outcome.
    pub fn allocate(
        &self,
        students: &[Student],
        colleges: &[College],
        preferences: &[Preference],
    ) -> AllotmentOutcome {
        let mut ledger = SeatLedger::new(colleges.iter().cloned());
        let book = PreferenceBook::new(preferences);
        if ledger.is_empty() && !students.is_empty() {
            warn!("seat ledger is empty, no student can be admitted");
        }
        debug!(
            colleges = ledger.len(),
            students_with_preferences = book.student_count(),
            "allotment pass starting"
        );

        let allocations: Vec<Allocation> = processing_order(students)
            .into_iter()
            .map(|idx| self.serve(idx, &students[idx], &book, &mut ledger))
            .collect();

        let outcome = AllotmentOutcome {
            allocations,
            colleges: ledger.into_colleges(),
        };
        info!(
            students = students.len(),
            allocated = outcome.allocated_count(),
            unallocated = outcome.unallocated_count(),
            "allotment complete"
        );
        outcome
    }

    /// Runs one allotment pass over normalized input.
    pub fn allocate_input(&self, input: &NormalizedInput) -> AllotmentOutcome {
        self.allocate(&input.students, &input.colleges, &input.preferences)
    }

    /// Serves one student: first admitting preference wins.
    fn serve(
        &self,
        index: usize,
        student: &Student,
        book: &PreferenceBook,
        ledger: &mut SeatLedger,
    ) -> Allocation {
        // Unrecognized categories never reach the ledger.
        if let Some(category) = self.categories.recognize(&student.category) {
            for pref in book.for_student(student.id) {
                if !ledger.try_admit(pref.college_id, category) {
                    continue;
                }
                let institution = ledger.institution(pref.college_id).unwrap_or_default();
                debug!(
                    student_id = ?student.id,
                    college_id = pref.college_id,
                    pref_number = %pref.pref_number,
                    category = %category,
                    "seat committed"
                );
                return Allocation::allotted(
                    index,
                    student.id,
                    pref.college_id,
                    institution,
                    pref.pref_number,
                    category.as_str(),
                );
            }
        }

        debug!(student_id = ?student.id, category = %student.category, "no seat available");
        Allocation::unallocated(
            index,
            student.id,
            self.unallocated_label.as_str(),
            student.category.as_str(),
        )
    }
}
