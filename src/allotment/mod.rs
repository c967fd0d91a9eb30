//! Greedy allotment and result statistics.
//!
//! # Algorithm
//!
//! `SeatAllocator` serves students one at a time in rank order and gives
//! each the first seat on their preference list that their quota bucket
//! still has room for. It is not a stable matching; a student served
//! earlier never loses a seat to a later one.
//!
//! # Statistics
//!
//! `AllotmentStats` summarizes a published result: allocated vs.
//! unallocated, allocations per category, busiest institutions.

mod greedy;
mod order;
mod stats;

pub use greedy::{AllotmentOutcome, SeatAllocator, UNALLOCATED_LABEL};
pub use order::{priority_cmp, processing_order, PreferenceBook};
pub use stats::AllotmentStats;
