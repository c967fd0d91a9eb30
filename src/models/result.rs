//! Output relation row.

use serde::{Deserialize, Serialize};

use super::OrderKey;

/// One row of the published allotment result.
///
/// Field order is the output column order. Serialized headers are the
/// fixed lowercase names; `None` serializes as an empty cell. Display
/// fields are never `Some("")`: blank text and a missing student both
/// publish as `None`, since an empty cell cannot tell them apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRow {
    /// Student id.
    #[serde(rename = "uniqueid")]
    pub unique_id: Option<i64>,
    /// Student name (`None` if the student record was not found).
    pub name: Option<String>,
    /// Student gender.
    pub gender: Option<String>,
    /// Student category, published under the "caste" label.
    pub caste: Option<String>,
    /// Student rank.
    pub rank: Option<OrderKey>,
    /// Admitted college.
    #[serde(rename = "collegeid")]
    pub college_id: Option<i64>,
    /// Institution name or the unallocated label.
    pub institution: String,
    /// Preference number used.
    #[serde(rename = "prefnumber")]
    pub pref_number: Option<OrderKey>,
}

impl ResultRow {
    /// Fixed output header.
    pub const HEADER: [&'static str; 8] = [
        "uniqueid",
        "name",
        "gender",
        "caste",
        "rank",
        "collegeid",
        "institution",
        "prefnumber",
    ];

    /// Whether the row records an admission.
    #[inline]
    pub fn is_allocated(&self) -> bool {
        self.college_id.is_some()
    }
}
