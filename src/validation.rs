//! Input diagnostics for allotment runs.
//!
//! Checks normalized input for anomalies that the allocator tolerates but
//! an operator probably wants to hear about:
//! - Duplicate or missing student IDs
//! - Missing ranks
//! - Categories outside the quota set
//! - Preferences naming unknown students or colleges
//! - Repeated (student, college) preferences
//!
//! None of these block a run; see [`crate::normalize`] for what is fatal.

use std::collections::HashSet;

use crate::models::CategorySet;
use crate::normalize::NormalizedInput;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation finding.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Finding category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation findings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two students share the same ID.
    DuplicateStudentId,
    /// A student's ID could not be parsed.
    MissingStudentId,
    /// A student's rank could not be parsed; they will be served last.
    MissingRank,
    /// A student's category is outside the quota set; they cannot be admitted.
    UnrecognizedCategory,
    /// A preference names a student that doesn't exist.
    UnknownStudentReference,
    /// A preference names a college that doesn't exist.
    UnknownCollegeReference,
    /// A student lists the same college more than once.
    DuplicatePreference,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates normalized allotment input.
///
/// Checks:
/// 1. No duplicate student IDs
/// 2. Every student has an ID and a rank
/// 3. Every student's category is in the quota set
/// 4. Every preference references an existing student and college
/// 5. No student lists a college twice
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all findings.
pub fn validate_input(input: &NormalizedInput, categories: &CategorySet) -> ValidationResult {
    let mut errors = Vec::new();

    let mut student_ids = HashSet::new();
    for (row, s) in input.students.iter().enumerate() {
        match s.id {
            Some(id) => {
                if !student_ids.insert(id) {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::DuplicateStudentId,
                        format!("Duplicate student ID: {id}"),
                    ));
                }
            }
            None => errors.push(ValidationError::new(
                ValidationErrorKind::MissingStudentId,
                format!("Student at row {row} has no usable ID"),
            )),
        }

        let label = s.id.map_or_else(|| format!("row {row}"), |id| id.to_string());
        if s.rank.is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingRank,
                format!("Student {label} has no usable rank and will be served last"),
            ));
        }
        if !categories.contains(&s.category) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnrecognizedCategory,
                format!(
                    "Student {label} has category '{}' outside the quota set",
                    s.category
                ),
            ));
        }
    }

    let college_ids: HashSet<i64> = input.colleges.iter().map(|c| c.college_id).collect();
    let mut seen_pairs = HashSet::new();
    for p in &input.preferences {
        if !student_ids.contains(&p.student_id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownStudentReference,
                format!(
                    "Preference {} references unknown student {}",
                    p.pref_number, p.student_id
                ),
            ));
        }
        if !college_ids.contains(&p.college_id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownCollegeReference,
                format!(
                    "Student {} references unknown college {}",
                    p.student_id, p.college_id
                ),
            ));
        }
        if !seen_pairs.insert((p.student_id, p.college_id)) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicatePreference,
                format!(
                    "Student {} lists college {} more than once",
                    p.student_id, p.college_id
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
