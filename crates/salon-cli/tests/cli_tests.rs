//! Integration tests for the `salon` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to run the subcommands through
//! the actual binary against a JSON data fixture. Booking tests work on a copy
//! of the fixture in a temporary directory.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper: path to the salon-data.json fixture.
fn data_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/salon-data.json")
}

/// Helper: a `salon` command with a clean environment and a fixed today.
fn salon(data: &Path) -> Command {
    let mut cmd = Command::cargo_bin("salon").unwrap();
    cmd.env_remove("SALON_DATA")
        .env_remove("SALON_OUTBOX")
        .env_remove("RUST_LOG")
        .arg("--data")
        .arg(data)
        .args(["--today", "2026-03-16"]);
    cmd
}

/// Helper: copy the fixture into a temp dir so bookings do not touch it.
fn scratch_copy() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("salon-data.json");
    std::fs::copy(data_path(), &path).unwrap();
    (dir, path)
}

fn book_args<'a>(time: &'a str) -> [&'a str; 13] {
    [
        "book",
        "glow",
        "--service",
        "cut",
        "--date",
        "2026-03-16",
        "--time",
        time,
        "--name",
        "Ona",
        "--phone",
        "+37060000002",
        "--email=ona@example.com",
    ]
}

// ─────────────────────────────────────────────────────────────────────────────
// Browsing
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn services_lists_every_service() {
    salon(Path::new(data_path()))
        .args(["services", "glow"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cut\tHaircut\t60 min\t45"))
        .stdout(predicate::str::contains("colour\tHair colouring\t120 min"))
        .stdout(predicate::str::contains("manicure\tManicure\t45 min"));
}

#[test]
fn data_path_is_read_from_dotenv() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(".env"),
        format!("SALON_DATA={}\n", data_path()),
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("salon").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("SALON_DATA")
        .env_remove("SALON_OUTBOX")
        .env_remove("RUST_LOG")
        .args(["--today", "2026-03-16", "services", "glow"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cut\tHaircut\t60 min\t45"));
}

#[test]
fn dates_lists_fourteen_days_from_today() {
    let output = salon(Path::new(data_path()))
        .args(["dates", "glow"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 14);
    assert_eq!(lines[0], "2026-03-16 Mon");
    assert_eq!(lines[13], "2026-03-29 Sun");
}

#[test]
fn slots_skip_booked_times() {
    let output = salon(Path::new(data_path()))
        .args(["slots", "glow", "--service", "cut", "--date", "2026-03-16"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let times: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        times,
        [
            "09:00", "11:00", "11:30", "12:00", "12:30", "13:00", "13:30", "15:30", "16:00",
            "16:30", "17:00"
        ]
    );
}

#[test]
fn slots_on_a_free_day_fill_the_grid() {
    let output = salon(Path::new(data_path()))
        .args(["slots", "glow", "--service", "cut", "--date", "2026-03-17"])
        .output()
        .unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 17);
}

#[test]
fn slots_for_too_long_a_service_report_none() {
    let (_dir, path) = scratch_copy();
    let mut data: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    data["services"][1]["duration"] = serde_json::json!(600);
    std::fs::write(&path, data.to_string()).unwrap();

    salon(&path)
        .args(["slots", "glow", "--service", "colour", "--date", "2026-03-17"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No free times on 2026-03-17"));
}

#[test]
fn slots_outside_the_window_fail() {
    salon(Path::new(data_path()))
        .args(["slots", "glow", "--service", "cut", "--date", "2026-04-30"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("outside the bookable window"));
}

#[test]
fn malformed_date_fails() {
    salon(Path::new(data_path()))
        .args(["slots", "glow", "--service", "cut", "--date", "16/03/2026"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Format error"));
}

#[test]
fn unknown_salon_fails() {
    salon(Path::new(data_path()))
        .args(["services", "nowhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Salon not found: nowhere"));
}

#[test]
fn unknown_service_fails() {
    salon(Path::new(data_path()))
        .args(["slots", "glow", "--service", "massage", "--date", "2026-03-16"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown service: massage"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Booking
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn book_writes_the_booking_and_queues_a_confirmation() {
    let (dir, path) = scratch_copy();
    let outbox = dir.path().join("outbox.jsonl");

    salon(&path)
        .arg("--outbox")
        .arg(&outbox)
        .args(book_args("11:00"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"start\": \"11:00\""))
        .stdout(predicate::str::contains("\"end\": \"12:00\""))
        .stdout(predicate::str::contains("Add to calendar: https://calendar.google.com/"))
        .stdout(predicate::str::contains("dates=20260316T110000/20260316T120000"));

    let data: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let bookings = data["bookings"].as_array().unwrap();
    assert_eq!(bookings.len(), 3);
    assert_eq!(bookings[2]["time"], "11:00");
    assert_eq!(bookings[2]["end_time"], "12:00");
    assert_eq!(bookings[2]["status"], "confirmed");

    let queued = std::fs::read_to_string(&outbox).unwrap();
    assert_eq!(queued.lines().count(), 1);
    assert!(queued.contains("\"to_email\":\"ona@example.com\""));
}

#[test]
fn booked_time_is_no_longer_offered() {
    let (_dir, path) = scratch_copy();

    salon(&path).args(book_args("12:00")).assert().success();

    salon(&path)
        .args(["slots", "glow", "--service", "cut", "--date", "2026-03-16"])
        .assert()
        .success()
        .stdout(predicate::str::contains("12:00").not())
        .stdout(predicate::str::contains("11:00"))
        .stdout(predicate::str::contains("13:00"));
}

#[test]
fn booking_a_taken_time_fails_without_writing() {
    let (_dir, path) = scratch_copy();
    let before = std::fs::read_to_string(&path).unwrap();

    salon(&path)
        .args(book_args("10:30"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("10:30 is not bookable on 2026-03-16"));

    assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn booking_without_outbox_still_succeeds() {
    let (_dir, path) = scratch_copy();
    salon(&path).args(book_args("16:00")).assert().success();
}

#[test]
fn booking_with_blank_name_fails() {
    let (_dir, path) = scratch_copy();
    let mut args = book_args("16:00");
    args[9] = "  ";

    salon(&path)
        .args(args)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing customer field: name"));
}

// ─────────────────────────────────────────────────────────────────────────────
// end-time
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn end_time_adds_duration() {
    Command::cargo_bin("salon")
        .unwrap()
        .args(["end-time", "09:30", "45"])
        .assert()
        .success()
        .stdout("10:15\n");
}

#[test]
fn end_time_runs_past_midnight_unclamped() {
    Command::cargo_bin("salon")
        .unwrap()
        .args(["end-time", "23:30", "60"])
        .assert()
        .success()
        .stdout("24:30\n");
}

#[test]
fn end_time_rejects_malformed_start() {
    Command::cargo_bin("salon")
        .unwrap()
        .args(["end-time", "9:30", "45"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected HH:MM time"));
}
