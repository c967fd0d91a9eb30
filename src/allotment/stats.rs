//! Result statistics.
//!
//! Read-only aggregates over a published result relation.
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Allocated | Rows with a college id |
//! | Unallocated | Rows without one |
//! | Allocation rate | allocated / total |
//! | By category | Allocated rows per caste label |
//! | Top institutions | Allocated rows per institution, busiest first |

use std::collections::{BTreeMap, HashMap};

use crate::models::ResultRow;

/// Aggregate view of an allotment result.
#[derive(Debug, Clone, PartialEq)]
pub struct AllotmentStats {
    /// Number of result rows.
    pub total: usize,
    /// Rows with a seat.
    pub allocated: usize,
    /// Rows without a seat.
    pub unallocated: usize,
    /// Fraction of rows with a seat (0.0..1.0, 0.0 when empty).
    pub allocation_rate: f64,
    /// Allocated rows per category label. Missing labels count under "".
    pub by_category: BTreeMap<String, usize>,
    /// Allocated rows per institution, count descending then name
    /// ascending, truncated to the requested length.
    pub top_institutions: Vec<(String, usize)>,
}

impl AllotmentStats {
    /// Computes statistics over result rows.
    ///
    /// # Arguments
    /// * `rows` - The published result relation.
    /// * `top_n` - How many institutions to keep.
    pub fn calculate(rows: &[ResultRow], top_n: usize) -> Self {
        let mut by_category: BTreeMap<String, usize> = BTreeMap::new();
        let mut by_institution: HashMap<&str, usize> = HashMap::new();
        let mut allocated = 0;

        for row in rows.iter().filter(|r| r.is_allocated()) {
            allocated += 1;
            let category = row.caste.clone().unwrap_or_default();
            *by_category.entry(category).or_insert(0) += 1;
            *by_institution.entry(row.institution.as_str()).or_insert(0) += 1;
        }

        let mut top_institutions: Vec<(String, usize)> = by_institution
            .into_iter()
            .map(|(name, n)| (name.to_string(), n))
            .collect();
        top_institutions.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        top_institutions.truncate(top_n);

        let total = rows.len();
        let allocation_rate = if total == 0 {
            0.0
        } else {
            allocated as f64 / total as f64
        };

        Self {
            total,
            allocated,
            unallocated: total - allocated,
            allocation_rate,
            by_category,
            top_institutions,
        }
    }
}
