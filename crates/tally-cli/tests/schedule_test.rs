//! Schedule command tests.
//!
//! `tally schedule` walks the date axis day by day. Plain output skips
//! days with no placements and stars the anchor; JSON emits every column
//! so consumers can see the empty days too.

use tally_testing::fixtures::{date, standard_window};
use tally_testing::TestWorld;

#[test]
fn schedule_lists_days_that_have_episodes() {
    let world =
        TestWorld::new().with_snapshot("january", &standard_window(date(2025, 1, 15)));

    let result = world
        .run(&["schedule", "--snapshot", "january", "--anchor", "2025-01-15"])
        .expect("Failed to run schedule");
    assert!(result.success(), "schedule failed: {}", result.stderr);

    assert!(result
        .stdout
        .contains("Schedule for 22 days around 2025-01-15 (source: snapshot 'january')"));

    // The anchor day is starred, other days are not.
    assert!(result.stdout.contains("Wed 2025-01-15 *"));
    assert!(result.stdout.contains("Mon 2025-01-13\n"));
    assert!(result.stdout.contains("S02E01"));
    assert!(result.stdout.contains("Shogun"));

    // Nothing airs on the 9th, so the day never prints.
    assert!(!result.stdout.contains("2025-01-09"));
}

#[test]
fn schedule_json_emits_every_column() {
    let world = TestWorld::new()
        .with_format("json")
        .with_snapshot("january", &standard_window(date(2025, 1, 15)));

    let result = world
        .run(&["schedule", "--snapshot", "january", "--anchor", "2025-01-15"])
        .expect("Failed to run schedule");
    assert!(result.success(), "schedule failed: {}", result.stderr);

    let json = result.json().expect("schedule --format json must emit JSON");
    assert_eq!(json["anchor"], "2025-01-15");

    let days = json["days"].as_array().expect("days array");
    assert_eq!(days.len(), 22, "One entry per axis column, empty or not");
    assert_eq!(days[0]["date"], "2025-01-08");
    assert_eq!(days[0]["ordinal"], 0);

    let anchor_day = days
        .iter()
        .find(|d| d["is_anchor"] == true)
        .expect("Exactly one day carries the anchor");
    assert_eq!(anchor_day["date"], "2025-01-15");
    assert_eq!(anchor_day["ordinal"], 7);

    let entries = anchor_day["entries"].as_array().expect("entries array");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["show"], "Shogun");
    assert_eq!(entries[0]["code"], "S02E01");
    assert_eq!(entries[0]["provider"], "Hulu");
    assert_eq!(entries[0]["watched"], false);
}

#[test]
fn an_empty_window_says_so() {
    let world = TestWorld::new();

    // Every seeded show premieres years after this anchor.
    let result = world
        .run(&["schedule", "--sample", "--anchor", "2020-01-01"])
        .expect("Failed to run schedule");
    assert!(result.success(), "schedule failed: {}", result.stderr);

    assert!(result.stdout.contains("No episodes in this window."));
}
