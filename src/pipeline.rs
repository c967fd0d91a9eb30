//! End-to-end batch run.
//!
//! Normalizer → allocator → projector, with every input read and typed
//! before the first seat is handed out.

use tracing::{info, warn};

use crate::allotment::AllotmentOutcome;
use crate::config::AllotConfig;
use crate::error::AllotResult;
use crate::io;
use crate::models::{College, ResultRow};
use crate::normalize::NormalizeSummary;
use crate::projection::project;
use crate::table::{RawTable, Relation};
use crate::validation::{validate_input, ValidationError};

/// Everything a batch run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Published rows, in processing order.
    pub rows: Vec<ResultRow>,
    /// Allocations and final ledger state.
    pub outcome: AllotmentOutcome,
    /// What normalization absorbed.
    pub summary: NormalizeSummary,
    /// Non-fatal input findings.
    pub findings: Vec<ValidationError>,
}

/// Seat-matrix totals across all colleges of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeatMatrixTotals {
    /// Seats open across every quota bucket.
    pub quota_seats: u64,
    /// Declared intake (`Total Seats`).
    pub declared_seats: u64,
    /// Admissions recorded before this run.
    pub already_admitted: u64,
    /// Seats already taken under the orphan quota.
    pub orphan_quota: u64,
    /// Seats already taken under the PHC quota.
    pub phc_quota: u64,
}

impl SeatMatrixTotals {
    /// Sums the seat matrix.
    pub fn of(colleges: &[College]) -> Self {
        colleges.iter().fold(Self::default(), |acc, c| Self {
            quota_seats: acc.quota_seats + c.total_remaining(),
            declared_seats: acc.declared_seats + u64::from(c.total_seats),
            already_admitted: acc.already_admitted + u64::from(c.total_admitted),
            orphan_quota: acc.orphan_quota + u64::from(c.orphan_quota),
            phc_quota: acc.phc_quota + u64::from(c.phc_quota),
        })
    }
}

/// Runs allotment over raw tables.
pub fn run_tables(
    config: &AllotConfig,
    students: &RawTable,
    seats: &RawTable,
    preferences: &RawTable,
) -> AllotResult<RunReport> {
    let input = config.normalizer().normalize(students, seats, preferences)?;
    let matrix = SeatMatrixTotals::of(&input.colleges);
    info!(
        colleges = input.colleges.len(),
        quota_seats = matrix.quota_seats,
        declared_seats = matrix.declared_seats,
        already_admitted = matrix.already_admitted,
        orphan_quota = matrix.orphan_quota,
        phc_quota = matrix.phc_quota,
        "seat matrix loaded"
    );

    let categories = config.category_set();
    let findings = validate_input(&input, &categories).err().unwrap_or_default();
    for finding in &findings {
        warn!(kind = ?finding.kind, "{}", finding.message);
    }

    let outcome = config.allocator().allocate_input(&input);
    let rows = project(&input.students, &outcome.allocations);

    Ok(RunReport {
        rows,
        outcome,
        summary: input.summary,
        findings,
    })
}

/// Reads the configured inputs, runs allotment and writes the result file.
pub fn run_files(config: &AllotConfig) -> AllotResult<RunReport> {
    let students = io::read_table(Relation::Students, &config.inputs.students)?;
    let seats = io::read_table(Relation::Seats, &config.inputs.seats)?;
    let preferences = io::read_table(Relation::Preferences, &config.inputs.preferences)?;

    let report = run_tables(config, &students, &seats, &preferences)?;

    io::write_results(&config.output.path, &report.rows)?;
    info!(
        path = %config.output.path.display(),
        rows = report.rows.len(),
        "wrote allotment results"
    );
    Ok(report)
}
