//! College (seat matrix) model.
//!
//! A college holds one seat counter per quota bucket plus the running
//! admitted count. Counters are unsigned so "remaining ≥ 0" holds by
//! construction; the only way to consume a seat is through the ledger.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::QuotaCategory;

/// A college entry of the seat ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct College {
    /// Unique college identifier (`CollegeID`).
    pub college_id: i64,
    /// Institution display name.
    pub institution: String,
    /// Remaining seats per quota bucket. Buckets without a declared
    /// quota are present with 0.
    pub remaining: BTreeMap<QuotaCategory, u32>,
    /// Students admitted so far (starts from the seat file's value).
    pub total_admitted: u32,
    /// Declared total intake (informational).
    pub total_seats: u32,
    /// Seats already taken under the orphan quota (informational).
    pub orphan_quota: u32,
    /// Seats already taken under the PHC quota (informational).
    pub phc_quota: u32,
}

impl College {
    /// Creates a college with no seats.
    pub fn new(college_id: i64) -> Self {
        Self {
            college_id,
            institution: String::new(),
            remaining: BTreeMap::new(),
            total_admitted: 0,
            total_seats: 0,
            orphan_quota: 0,
            phc_quota: 0,
        }
    }

    /// Sets the institution name.
    pub fn with_institution(mut self, institution: impl Into<String>) -> Self {
        self.institution = institution.into();
        self
    }

    /// Sets the seat count of one quota bucket.
    pub fn with_quota(mut self, category: impl Into<String>, seats: u32) -> Self {
        self.remaining.insert(QuotaCategory::new(category), seats);
        self
    }

    /// Sets the initial admitted count.
    pub fn with_total_admitted(mut self, admitted: u32) -> Self {
        self.total_admitted = admitted;
        self
    }

    /// Sets the declared total intake.
    pub fn with_total_seats(mut self, seats: u32) -> Self {
        self.total_seats = seats;
        self
    }

    /// Remaining seats for a bucket (0 if undeclared).
    pub fn remaining_for(&self, category: &QuotaCategory) -> u32 {
        self.remaining.get(category).copied().unwrap_or(0)
    }

    /// Sum of remaining seats across all buckets.
    pub fn total_remaining(&self) -> u64 {
        self.remaining.values().map(|&n| u64::from(n)).sum()
    }

    /// Consumes one seat of `category` and counts the admission.
    ///
    /// Both counters move together or neither does.
    pub(crate) fn take_seat(&mut self, category: &QuotaCategory) -> bool {
        match self.remaining.get_mut(category) {
            Some(left) if *left > 0 => {
                *left -= 1;
                self.total_admitted = self.total_admitted.saturating_add(1);
                true
            }
            _ => false,
        }
    }
}
