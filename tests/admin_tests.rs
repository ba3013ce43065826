mod common;
use common::{init_db, rck, sample_db, setup_test_db};
use predicates::str::contains;
use std::env;
use std::fs;

#[test]
fn test_init_creates_rawdata_table() {
    let db_path = setup_test_db("init_creates_table");

    rck()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    rck()
        .args(["--db", &db_path, "db", "--check"])
        .assert()
        .success()
        .stdout(contains("Integrity check passed"))
        .stdout(contains("rawdata layout OK"));
}

#[test]
fn test_db_info_reports_totals() {
    let db_path = sample_db("db_info_totals");

    rck()
        .args(["--db", &db_path, "db", "--info"])
        .assert()
        .success()
        .stdout(contains("Total events:"))
        .stdout(contains("Members seen:"))
        .stdout(contains("2020-03-14"));
}

#[test]
fn test_init_twice_keeps_rows() {
    let db_path = sample_db("init_twice");
    init_db(&db_path);

    rck()
        .args(["--db", &db_path, "present", "--date", "2020-03-14"])
        .assert()
        .success()
        .stdout(contains("2 present"));
}

#[test]
fn test_csv_source_with_bad_row_fails() {
    let mut path = env::temp_dir();
    path.push("csv_source_bad_row.csv");
    fs::write(
        &path,
        "recNum,dateEventLocal,eventName,coreID,deviceFunction,logEvent,clientID,firstName,logData\n\
         1,not a date,checkin,desk,Check In,Checked In,7,Ada,\n",
    )
    .expect("write dump");

    rck()
        .args(["--csv", &path.to_string_lossy(), "recent"])
        .assert()
        .failure()
        .stderr(contains("Event log unavailable"));
}

#[test]
fn test_config_print_shows_keys() {
    rck()
        .args(["config", "--print"])
        .assert()
        .success()
        .stdout(contains("trailing_window_days"))
        .stdout(contains("equipment"));
}
