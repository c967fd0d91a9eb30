//! College seat allotment.
//!
//! Assigns students to college seats from three relations (students,
//! seats, preferences) with a deterministic, rank-priority, greedy pass
//! over per-category seat quotas.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Student`, `Preference`, `College`,
//!   `QuotaCategory`, `CategorySet`, `Allocation`, `ResultRow`
//! - **`normalize`**: Header aliasing and lenient numeric coercion of raw tables
//! - **`ledger`**: The seat ledger and its single `try_admit` operation
//! - **`allotment`**: Processing order, greedy allocator, result statistics
//! - **`projection`**: Allocation → published result rows
//! - **`validation`**: Non-fatal input diagnostics
//! - **`lookup`**: Single-student lookup over published results
//! - **`io`** / **`table`**: CSV adapters and the raw table they produce
//! - **`config`** / **`pipeline`**: Run configuration and the batch driver
//!
//! # Data Flow
//!
//! ```text
//! RawTable ×3 ──normalize──▶ NormalizedInput ──allocate──▶ AllotmentOutcome
//!                                                              │
//!                                     Vec<ResultRow> ◀──project┘
//! ```
//!
//! The run is single-threaded. The order in which students are served
//! decides who wins a contested seat.

pub mod allotment;
pub mod config;
pub mod error;
pub mod io;
pub mod ledger;
pub mod lookup;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod projection;
pub mod table;
pub mod validation;

pub use error::{AllotError, AllotResult};
