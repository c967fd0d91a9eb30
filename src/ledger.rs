//! Seat ledger.
//!
//! The only mutable state of an allotment run. Seats are consumed through
//! [`SeatLedger::try_admit`], which checks and decrements a quota bucket in
//! one step; nothing else can change a counter.

use std::collections::BTreeMap;

use crate::models::{College, QuotaCategory};

/// Per-college remaining quotas and admitted counts.
#[derive(Debug, Clone, Default)]
pub struct SeatLedger {
    colleges: BTreeMap<i64, College>,
}

impl SeatLedger {
    /// Builds a ledger from normalized colleges.
    ///
    /// A later entry with the same id replaces an earlier one.
    pub fn new(colleges: impl IntoIterator<Item = College>) -> Self {
        Self {
            colleges: colleges.into_iter().map(|c| (c.college_id, c)).collect(),
        }
    }

    /// Admits one student under `category` at `college_id`.
    ///
    /// Succeeds only if the college exists and the bucket has a seat left,
    /// in which case the bucket is decremented and the admitted count
    /// incremented together. On failure nothing changes.
    pub fn try_admit(&mut self, college_id: i64, category: &QuotaCategory) -> bool {
        self.colleges
            .get_mut(&college_id)
            .is_some_and(|college| college.take_seat(category))
    }

    /// Looks up a college.
    pub fn college(&self, college_id: i64) -> Option<&College> {
        self.colleges.get(&college_id)
    }

    /// Institution name of a college.
    pub fn institution(&self, college_id: i64) -> Option<&str> {
        self.college(college_id).map(|c| c.institution.as_str())
    }

    /// Remaining seats of a bucket. `None` for unknown colleges.
    pub fn remaining(&self, college_id: i64, category: &QuotaCategory) -> Option<u32> {
        self.college(college_id).map(|c| c.remaining_for(category))
    }

    /// Iterates colleges in id order.
    pub fn colleges(&self) -> impl Iterator<Item = &College> {
        self.colleges.values()
    }

    /// Number of colleges.
    pub fn len(&self) -> usize {
        self.colleges.len()
    }

    /// Whether the ledger has no colleges.
    pub fn is_empty(&self) -> bool {
        self.colleges.is_empty()
    }

    /// Consumes the ledger, returning colleges in id order.
    pub fn into_colleges(self) -> Vec<College> {
        self.colleges.into_values().collect()
    }
}
