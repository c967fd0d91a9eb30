//! Input normalization.
//!
//! Turns the three raw relations (students, seats, preferences) into the
//! canonical typed records of [`crate::models`].
//!
//! # Policy
//!
//! - Headers are resolved through the alias tables in [`aliases`] before
//!   any cell is typed.
//! - A cell that fails numeric coercion becomes a missing value. Students
//!   keep their row (and sort last); preference rows lose theirs.
//! - Quota columns absent from the seat input read as 0 for every college.
//! - Only a missing key column is fatal.

pub mod aliases;
pub mod coerce;

use std::collections::HashMap;
use tracing::{debug, warn};

use crate::error::AllotResult;
use crate::models::{CategorySet, College, OrderKey, Preference, Student};
use crate::table::{RawTable, Relation};

use aliases::{canonical, ColumnMap};
use coerce::{coerce_count, coerce_int, coerce_key};

/// Counters describing what normalization absorbed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeSummary {
    /// Non-blank cells that failed numeric coercion.
    pub coercion_failures: usize,
    /// Preference rows dropped for a missing key.
    pub dropped_preferences: usize,
    /// Seat rows skipped for a missing college id.
    pub skipped_seats: usize,
    /// Seat rows that replaced an earlier row with the same college id.
    pub replaced_seats: usize,
}

impl NormalizeSummary {
    /// Whether any row was altered, dropped or replaced.
    pub fn has_anomalies(&self) -> bool {
        self.coercion_failures > 0
            || self.dropped_preferences > 0
            || self.skipped_seats > 0
            || self.replaced_seats > 0
    }
}

/// Canonical input of one allotment run.
#[derive(Debug, Clone, Default)]
pub struct NormalizedInput {
    /// Students in input order.
    pub students: Vec<Student>,
    /// Colleges in order of first appearance, one per college id.
    pub colleges: Vec<College>,
    /// Fully keyed preference rows in input order.
    pub preferences: Vec<Preference>,
    /// What was absorbed along the way.
    pub summary: NormalizeSummary,
}

impl NormalizedInput {
    /// Assembles input from already typed records.
    pub fn new(students: Vec<Student>, colleges: Vec<College>, preferences: Vec<Preference>) -> Self {
        Self {
            students,
            colleges,
            preferences,
            summary: NormalizeSummary::default(),
        }
    }
}

/// Converts raw relations into canonical records.
#[derive(Debug, Clone, Default)]
pub struct InputNormalizer {
    categories: CategorySet,
}

impl InputNormalizer {
    /// Creates a normalizer for the given quota set.
    pub fn new(categories: CategorySet) -> Self {
        Self { categories }
    }

    /// The quota set seat columns are read for.
    pub fn categories(&self) -> &CategorySet {
        &self.categories
    }

    /// Normalizes all three relations.
    pub fn normalize(
        &self,
        students: &RawTable,
        seats: &RawTable,
        preferences: &RawTable,
    ) -> AllotResult<NormalizedInput> {
        let mut summary = NormalizeSummary::default();
        let students = self.normalize_students(students, &mut summary)?;
        let colleges = self.normalize_seats(seats, &mut summary)?;
        let preferences = self.normalize_preferences(preferences, &mut summary)?;

        if summary.has_anomalies() {
            warn!(
                coercion_failures = summary.coercion_failures,
                dropped_preferences = summary.dropped_preferences,
                skipped_seats = summary.skipped_seats,
                replaced_seats = summary.replaced_seats,
                "input contained unparseable or conflicting rows"
            );
        }
        debug!(
            students = students.len(),
            colleges = colleges.len(),
            preferences = preferences.len(),
            "normalized input"
        );

        Ok(NormalizedInput {
            students,
            colleges,
            preferences,
            summary,
        })
    }

    /// Normalizes the student relation.
    ///
    /// Requires `UniqueID` and `Rank`. `Name`, `Gender` and the category
    /// (`Category`, or `Caste` as alias) default to empty.
    pub fn normalize_students(
        &self,
        table: &RawTable,
        summary: &mut NormalizeSummary,
    ) -> AllotResult<Vec<Student>> {
        let cols = ColumnMap::resolve(Relation::Students, &table.headers);
        let id_col = cols.require(canonical::UNIQUE_ID, "UniqueID")?;
        let rank_col = cols.require(canonical::RANK, "Rank")?;
        let name_col = cols.get(canonical::NAME);
        let gender_col = cols.get(canonical::GENDER);
        let category_col = cols.get(canonical::CATEGORY);

        let text = |row: usize, col: Option<usize>| -> String {
            col.map(|c| table.cell(row, c).trim().to_string())
                .unwrap_or_default()
        };

        let mut students = Vec::with_capacity(table.len());
        for row in 0..table.len() {
            let student = Student {
                id: numeric(table.cell(row, id_col), summary),
                name: text(row, name_col),
                gender: text(row, gender_col),
                category: text(row, category_col),
                rank: ordinal(table.cell(row, rank_col), summary),
            };
            if !student.is_fully_keyed() {
                debug!(row, "student row has a missing id or rank");
            }
            students.push(student);
        }
        Ok(students)
    }

    /// Normalizes the seat relation into ledger entries.
    ///
    /// Requires `CollegeID`. Each quota bucket of the run's category set
    /// is read from the column of the same name, defaulting to 0.
    pub fn normalize_seats(
        &self,
        table: &RawTable,
        summary: &mut NormalizeSummary,
    ) -> AllotResult<Vec<College>> {
        let cols = ColumnMap::resolve(Relation::Seats, &table.headers);
        let id_col = cols.require(canonical::COLLEGE_ID, "CollegeID")?;
        let institution_col = cols.get(canonical::INSTITUTION);
        let quota_cols: Vec<_> = self
            .categories
            .iter()
            .map(|cat| (cat.clone(), cols.get(cat.as_str())))
            .collect();
        let total_seats_col = cols.get(canonical::TOTAL_SEATS);
        let total_admitted_col = cols.get(canonical::TOTAL_ADMITTED);
        let orphan_col = cols.get(canonical::ORPHAN_QUOTA);
        let phc_col = cols.get(canonical::PHC_QUOTA);

        let mut colleges: Vec<College> = Vec::with_capacity(table.len());
        let mut position: HashMap<i64, usize> = HashMap::new();

        for row in 0..table.len() {
            let Some(college_id) = numeric(table.cell(row, id_col), summary) else {
                warn!(row, "skipping seat row without a college id");
                summary.skipped_seats += 1;
                continue;
            };

            let mut count = |col: Option<usize>| -> u32 {
                col.map(|c| count_cell(table.cell(row, c), summary))
                    .unwrap_or(0)
            };

            let mut college = College::new(college_id);
            college.institution = institution_col
                .map(|c| table.cell(row, c).trim().to_string())
                .unwrap_or_default();
            for (cat, col) in &quota_cols {
                college.remaining.insert(cat.clone(), count(*col));
            }
            college.total_seats = count(total_seats_col);
            college.total_admitted = count(total_admitted_col);
            college.orphan_quota = count(orphan_col);
            college.phc_quota = count(phc_col);

            match position.get(&college_id) {
                Some(&at) => {
                    warn!(college_id, row, "duplicate college id, later row replaces earlier");
                    summary.replaced_seats += 1;
                    colleges[at] = college;
                }
                None => {
                    position.insert(college_id, colleges.len());
                    colleges.push(college);
                }
            }
        }
        Ok(colleges)
    }

    /// Normalizes the preference relation.
    ///
    /// Rows whose student id, college id or preference number is missing
    /// are dropped.
    pub fn normalize_preferences(
        &self,
        table: &RawTable,
        summary: &mut NormalizeSummary,
    ) -> AllotResult<Vec<Preference>> {
        let cols = ColumnMap::resolve(Relation::Preferences, &table.headers);
        let student_col = cols.require(canonical::UNIQUE_ID, "UniqueID")?;
        let college_col = cols.require(canonical::COLLEGE_ID, "CollegeID")?;
        let pref_col = cols.require(canonical::PREF_NUMBER, "PrefNumber")?;

        let mut preferences = Vec::with_capacity(table.len());
        for row in 0..table.len() {
            let student = numeric(table.cell(row, student_col), summary);
            let college = numeric(table.cell(row, college_col), summary);
            let pref = ordinal(table.cell(row, pref_col), summary);
            match (student, college, pref) {
                (Some(student_id), Some(college_id), Some(pref_number)) => {
                    preferences.push(Preference {
                        student_id,
                        college_id,
                        pref_number,
                    })
                }
                _ => {
                    debug!(row, "dropping preference row with a missing key");
                    summary.dropped_preferences += 1;
                }
            }
        }
        Ok(preferences)
    }
}

/// Coerces an integer cell, counting non-blank failures.
fn numeric(raw: &str, summary: &mut NormalizeSummary) -> Option<i64> {
    let value = coerce_int(raw);
    if value.is_none() && !raw.trim().is_empty() {
        summary.coercion_failures += 1;
    }
    value
}

/// Coerces a rank or preference-number cell, counting non-blank failures.
fn ordinal(raw: &str, summary: &mut NormalizeSummary) -> Option<OrderKey> {
    let value = coerce_key(raw);
    if value.is_none() && !raw.trim().is_empty() {
        summary.coercion_failures += 1;
    }
    value
}

/// Coerces a count cell, reading failures and negatives as 0.
fn count_cell(raw: &str, summary: &mut NormalizeSummary) -> u32 {
    match coerce_count(raw) {
        Some(n) => n,
        None => {
            if !raw.trim().is_empty() {
                summary.coercion_failures += 1;
            }
            0
        }
    }
}
