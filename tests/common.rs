#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use rusqlite::{Connection, params};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rck() -> Command {
    cargo_bin_cmd!("rcheckin")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rcheckin.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// One `rawdata` row: (timestamp, device, logEvent, clientID, firstName)
pub type Row<'a> = (&'a str, &'a str, &'a str, i64, &'a str);

/// Initialize the DB through the CLI (creates the empty rawdata table)
pub fn init_db(db_path: &str) {
    rck()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Append rows the way the logging webhook does; recNum follows slice order
pub fn seed(db_path: &str, rows: &[Row]) {
    let conn = Connection::open(db_path).expect("open db");
    rcheckin::db::migrate::ensure_schema(&conn).expect("schema");
    for (ts, device, log_event, client, name) in rows {
        conn.execute(
            "INSERT INTO rawdata (dateEventLocal, eventName, coreID, deviceFunction, logEvent, clientID, firstName, logData)
             VALUES (?1, 'checkin', ?2, 'Check In', ?3, ?4, ?5, '')",
            params![ts, device, log_event, client, name],
        )
        .expect("insert row");
    }
}

/// March and April 2020 at the front desk and the woodshop
pub const SAMPLE: &[Row] = &[
    ("2020-03-14 08:55:00", "desk", "checkin allowed", 0, ""),
    ("2020-03-14 09:00:00", "desk", "Checked In", 7, "Ada"),
    ("2020-03-14 09:01:00", "woodshop", "Woodshop allowed", 7, "Ada"),
    ("2020-03-14 09:30:00", "desk", "Checked In", 8, "Bob"),
    ("2020-03-14 11:00:00", "desk", "Checked Out", 8, "Bob"),
    ("2020-03-14 12:00:00", "desk", "Checked In", 9, "Cy"),
    ("2020-03-20 10:00:00", "desk", "Checked In", 7, "Ada"),
    ("2020-04-02 10:00:00", "desk", "Checked In", 7, "Ada"),
    ("2020-04-02 10:05:00", "desk", "Checked In", 8, "Bob"),
];

/// Fresh DB seeded with `SAMPLE`
pub fn sample_db(name: &str) -> String {
    let db_path = setup_test_db(name);
    init_db(&db_path);
    seed(&db_path, SAMPLE);
    db_path
}
