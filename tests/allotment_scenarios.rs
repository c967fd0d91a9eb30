//! End-to-end allotment scenarios through raw tables and CSV files.

use std::fs;
use std::path::Path;

use u_allot::allotment::AllotmentStats;
use u_allot::config::AllotConfig;
use u_allot::io;
use u_allot::lookup::{find_by_id, LookupError};
use u_allot::models::{OrderKey, QuotaCategory};
use u_allot::pipeline::{run_files, run_tables};
use u_allot::table::RawTable;

fn students(rows: &[[&str; 5]]) -> RawTable {
    rows.iter().fold(
        RawTable::new(["UniqueID", "Name", "Gender", "Category", "Rank"]),
        |t, r| t.with_row(*r),
    )
}

fn preferences(rows: &[[&str; 3]]) -> RawTable {
    rows.iter().fold(
        RawTable::new(["UniqueID", "CollegeID", "PrefNumber"]),
        |t, r| t.with_row(*r),
    )
}

#[test]
fn contested_single_seat_goes_to_lower_rank() {
    let students = students(&[
        ["2", "Babu", "M", "SC", "2"],
        ["1", "Anu", "F", "SC", "1"],
    ]);
    let seats = RawTable::new(["CollegeID", "Institution", "SC"]).with_row(["10", "Alpha", "1"]);
    let prefs = preferences(&[["1", "10", "1"], ["2", "10", "1"]]);

    let report = run_tables(&AllotConfig::default(), &students, &seats, &prefs).unwrap();

    let first = find_by_id(&report.rows, "1").unwrap();
    assert_eq!(first.college_id, Some(10));
    assert_eq!(first.pref_number, Some(OrderKey::from(1)));
    assert_eq!(first.institution, "Alpha");

    let second = find_by_id(&report.rows, "2").unwrap();
    assert_eq!(second.college_id, None);
    assert_eq!(second.pref_number, None);
    assert_eq!(second.institution, "No College Available");

    let a = report.outcome.allocation_for_student(1).unwrap();
    assert_eq!(a.category_used, "SC");
}

#[test]
fn category_without_quota_stays_unallocated() {
    let students = students(&[["1", "Anu", "F", "OC", "1"]]);
    let seats = RawTable::new(["CollegeID", "Institution", "SC", "BC", "OC"])
        .with_row(["10", "Alpha", "5", "5", "0"])
        .with_row(["20", "Beta", "5", "5", "0"]);
    let prefs = preferences(&[["1", "10", "1"], ["1", "20", "2"]]);

    let report = run_tables(&AllotConfig::default(), &students, &seats, &prefs).unwrap();
    assert_eq!(report.rows.len(), 1);
    assert!(!report.rows[0].is_allocated());
}

#[test]
fn empty_preference_list_is_unallocated() {
    let students = students(&[["1", "Anu", "F", "SC", "1"]]);
    let seats = RawTable::new(["CollegeID", "SC"]).with_row(["10", "3"]);
    let prefs = preferences(&[]);

    let report = run_tables(&AllotConfig::default(), &students, &seats, &prefs).unwrap();
    assert_eq!(report.rows[0].pref_number, None);
    assert_eq!(report.rows[0].institution, "No College Available");
}

#[test]
fn malformed_rank_sorts_last_but_is_processed() {
    let students = students(&[
        ["1", "Anu", "F", "SC", "abc"],
        ["2", "Babu", "M", "SC", "7"],
        ["3", "Chitra", "F", "SC", "3"],
    ]);
    let seats = RawTable::new(["CollegeID", "Institution", "SC"])
        .with_row(["10", "Alpha", "1"])
        .with_row(["20", "Beta", "5"]);
    let prefs = preferences(&[
        ["1", "10", "1"],
        ["2", "10", "1"],
        ["3", "20", "1"],
        ["1", "20", "2"],
    ]);

    let report = run_tables(&AllotConfig::default(), &students, &seats, &prefs).unwrap();

    let order: Vec<Option<i64>> = report.rows.iter().map(|r| r.unique_id).collect();
    assert_eq!(order, vec![Some(3), Some(2), Some(1)]);
    assert_eq!(report.rows[2].rank, None);
    assert_eq!(report.rows[2].college_id, Some(20));
    assert_eq!(report.rows[1].college_id, Some(10));
    assert_eq!(report.summary.coercion_failures, 1);
}

#[test]
fn fractional_rank_competes_in_numeric_order() {
    let students = students(&[
        ["1", "Anu", "F", "SC", "2.5"],
        ["2", "Babu", "M", "SC", "3"],
    ]);
    let seats = RawTable::new(["CollegeID", "SC"]).with_row(["10", "1"]);
    let prefs = preferences(&[["1", "10", "1"], ["2", "10", "1"]]);

    let report = run_tables(&AllotConfig::default(), &students, &seats, &prefs).unwrap();
    let first = find_by_id(&report.rows, "1").unwrap();
    assert_eq!(first.college_id, Some(10));
    assert_eq!(first.rank.map(|r| r.to_string()).as_deref(), Some("2.5"));
    assert_eq!(find_by_id(&report.rows, "2").unwrap().college_id, None);
}

#[test]
fn fractional_quota_cell_keeps_whole_seats() {
    let students = students(&[["1", "Anu", "F", "SC", "1"], ["2", "Babu", "M", "SC", "2"]]);
    let seats = RawTable::new(["CollegeID", "SC"]).with_row(["10", "1.9"]);
    let prefs = preferences(&[["1", "10", "1"], ["2", "10", "1"]]);

    let report = run_tables(&AllotConfig::default(), &students, &seats, &prefs).unwrap();
    assert_eq!(report.rows[0].college_id, Some(10));
    assert_eq!(report.rows[1].college_id, None);
    assert_eq!(report.summary.coercion_failures, 0);
}

#[test]
fn unknown_category_never_admitted() {
    let students = students(&[["1", "Anu", "F", "General", "1"]]);
    let seats = RawTable::new(["CollegeID", "SC", "SC-CC", "ST", "BC", "Minority", "OC"])
        .with_row(["10", "9", "9", "9", "9", "9", "9"]);
    let prefs = preferences(&[["1", "10", "1"]]);

    let report = run_tables(&AllotConfig::default(), &students, &seats, &prefs).unwrap();
    assert!(!report.rows[0].is_allocated());
    assert_eq!(report.rows[0].caste.as_deref(), Some("General"));
}

#[test]
fn preference_order_not_input_order() {
    let students = students(&[["1", "Anu", "F", "BC", "1"]]);
    let seats = RawTable::new(["CollegeID", "BC"])
        .with_row(["10", "1"])
        .with_row(["20", "1"]);
    let prefs = preferences(&[["1", "10", "2"], ["1", "20", "1"]]);

    let report = run_tables(&AllotConfig::default(), &students, &seats, &prefs).unwrap();
    assert_eq!(report.rows[0].college_id, Some(20));
    assert_eq!(report.rows[0].pref_number, Some(OrderKey::from(1)));
}

#[test]
fn quota_conservation_over_run() {
    let students = students(&[
        ["1", "A", "F", "SC", "1"],
        ["2", "B", "M", "SC", "2"],
        ["3", "C", "F", "ST", "3"],
        ["4", "D", "M", "SC", "4"],
    ]);
    let seats = RawTable::new(["CollegeID", "SC", "ST", "Total Admitted"])
        .with_row(["10", "2", "0", "4"])
        .with_row(["20", "1", "1", "0"]);
    let prefs = preferences(&[
        ["1", "10", "1"],
        ["2", "10", "1"],
        ["3", "10", "1"],
        ["3", "20", "2"],
        ["4", "10", "1"],
        ["4", "20", "2"],
    ]);

    let report = run_tables(&AllotConfig::default(), &students, &seats, &prefs).unwrap();
    let sc = QuotaCategory::new("SC");
    let st = QuotaCategory::new("ST");

    let alpha = report.outcome.college(10).unwrap();
    assert_eq!(alpha.remaining_for(&sc), 0);
    assert_eq!(alpha.total_admitted, 6);

    let beta = report.outcome.college(20).unwrap();
    assert_eq!(beta.remaining_for(&sc), 0);
    assert_eq!(beta.remaining_for(&st), 0);
    assert_eq!(beta.total_admitted, 2);

    assert_eq!(report.outcome.allocated_count(), 4);
}

#[test]
fn missing_required_column_is_fatal() {
    let students = RawTable::new(["UniqueID", "Name"]).with_row(["1", "Anu"]);
    let seats = RawTable::new(["CollegeID"]);
    let prefs = preferences(&[]);

    let err = run_tables(&AllotConfig::default(), &students, &seats, &prefs).unwrap_err();
    assert!(err.is_input_shape());
}

fn write(path: &Path, content: &str) {
    fs::write(path, content).unwrap();
}

#[test]
fn csv_files_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(
        &root.join("students.csv"),
        "UniqueID,Name,Gender,Caste,Rank\n\
         1,Anu,F,SC,1\n\
         2,Babu,M,BC,2\n\
         3,Chitra,F,OC,3\n",
    );
    write(
        &root.join("seat.csv"),
        "CollegeID,Institution,SC,ST,BC,OC,TOTAL No. of seats\n\
         10,\"Alpha College, North\",1,0,0,0,30\n\
         20,Beta College,0,0,1,0,20\n",
    );
    write(
        &root.join("preference.csv"),
        "UniqueID,CollegeID,PrefNumber\n\
         1,10,1\n\
         2,10,1\n\
         2,20,2\n\
         3,20,1\n",
    );

    let mut config = AllotConfig::default();
    config.inputs.students = root.join("students.csv");
    config.inputs.seats = root.join("seat.csv");
    config.inputs.preferences = root.join("preference.csv");
    config.output.path = root.join("results.csv");

    let report = run_files(&config).unwrap();
    assert_eq!(report.rows.len(), 3);

    let text = fs::read_to_string(&config.output.path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "uniqueid,name,gender,caste,rank,collegeid,institution,prefnumber",
            "1,Anu,F,SC,1,10,\"Alpha College, North\",1",
            "2,Babu,M,BC,2,20,Beta College,2",
            "3,Chitra,F,OC,3,,No College Available,",
        ]
    );

    let rows = io::read_results(&config.output.path).unwrap();
    assert_eq!(rows, report.rows);

    let stats = AllotmentStats::calculate(&rows, 5);
    assert_eq!(stats.allocated, 2);
    assert_eq!(stats.unallocated, 1);
    assert_eq!(stats.by_category["SC"], 1);
    assert_eq!(stats.by_category["BC"], 1);

    assert_eq!(
        find_by_id(&rows, "x1").unwrap_err(),
        LookupError::NotNumeric("x1".into())
    );
    assert_eq!(find_by_id(&rows, "99").unwrap_err(), LookupError::NotFound(99));
}

#[test]
fn repeated_runs_write_identical_files() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(
        &root.join("students.csv"),
        "UniqueID,Name,Gender,Category,Rank\n5,E,F,SC,2\n4,D,M,SC,2\n3,C,F,SC,1\n",
    );
    write(&root.join("seat.csv"), "CollegeID,Institution,SC\n1,One,1\n2,Two,1\n");
    write(
        &root.join("preference.csv"),
        "UniqueID,CollegeID,PrefNumber\n5,1,1\n4,1,1\n3,1,1\n4,2,2\n5,2,2\n",
    );

    let mut config = AllotConfig::default();
    config.inputs.students = root.join("students.csv");
    config.inputs.seats = root.join("seat.csv");
    config.inputs.preferences = root.join("preference.csv");

    config.output.path = root.join("a.csv");
    run_files(&config).unwrap();
    config.output.path = root.join("b.csv");
    run_files(&config).unwrap();

    let a = fs::read(root.join("a.csv")).unwrap();
    let b = fs::read(root.join("b.csv")).unwrap();
    assert_eq!(a, b);

    let text = String::from_utf8(a).unwrap();
    let ids: Vec<&str> = text
        .lines()
        .skip(1)
        .map(|l| l.split(',').next().unwrap())
        .collect();
    assert_eq!(ids, vec!["3", "4", "5"]);
    assert!(text.contains("4,D,M,SC,2,2,Two,2"));
    assert!(text.contains("5,E,F,SC,2,,No College Available,"));
}
