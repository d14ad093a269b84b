//! Export command tests.
//!
//! `tally export` flattens the placed grid into rows ordered by date then
//! track. Plain format is CSV on stdout (or a file via --output); JSON is
//! an array of the same rows.

use tally_testing::fixtures::{date, standard_window};
use tally_testing::TestWorld;

#[test]
fn export_writes_csv_rows_sorted_by_date() {
    let world =
        TestWorld::new().with_snapshot("january", &standard_window(date(2025, 1, 15)));

    let result = world
        .run(&["export", "--snapshot", "january", "--anchor", "2025-01-15"])
        .expect("Failed to run export");
    assert!(result.success(), "export failed: {}", result.stderr);

    let lines: Vec<&str> = result.stdout.lines().collect();
    assert_eq!(lines.len(), 6, "Header plus one row per placed episode");
    assert_eq!(
        lines[0],
        "date,provider,show,season,episode,code,title,episode_id,watched"
    );
    assert_eq!(
        lines[1],
        "2025-01-08,Max,House of the Dragon,3,2,S03E02,Episode 2,2012,false"
    );
    assert_eq!(
        lines[3],
        "2025-01-15,Hulu,Shogun,2,1,S02E01,Episode 1,1021,false"
    );
    assert_eq!(
        lines[5],
        "2025-01-29,Max,House of the Dragon,3,3,S03E03,Episode 3,2013,false"
    );
}

#[test]
fn export_json_emits_one_row_per_placed_episode() {
    let world = TestWorld::new()
        .with_format("json")
        .with_snapshot("january", &standard_window(date(2025, 1, 15)));

    let result = world
        .run(&["export", "--snapshot", "january", "--anchor", "2025-01-15"])
        .expect("Failed to run export");
    assert!(result.success(), "export failed: {}", result.stderr);

    let json = result.json().expect("export --format json must emit JSON");
    let rows = json.as_array().expect("export emits a JSON array");
    assert_eq!(rows.len(), 5);

    assert_eq!(rows[0]["date"], "2025-01-08");
    assert_eq!(rows[0]["provider"], "Max");
    assert_eq!(rows[0]["code"], "S03E02");
    assert_eq!(rows[0]["episode_id"], 2012);
    assert_eq!(rows[4]["date"], "2025-01-29");
    assert_eq!(rows[4]["watched"], false);
}

#[test]
fn export_to_a_file_reports_the_row_count() {
    let world =
        TestWorld::new().with_snapshot("january", &standard_window(date(2025, 1, 15)));

    let result = world
        .run(&[
            "export",
            "--snapshot",
            "january",
            "--anchor",
            "2025-01-15",
            "--output",
            "guide.csv",
        ])
        .expect("Failed to run export");
    assert!(result.success(), "export failed: {}", result.stderr);

    let path = world.temp_dir().join("guide.csv");
    assert!(path.exists(), "Export file should land in the working dir");

    let contents = std::fs::read_to_string(&path).expect("Failed to read export file");
    assert_eq!(contents.lines().count(), 6);
    assert!(contents.starts_with("date,provider,show"));

    assert!(
        result.stderr.contains("exported 5 rows to guide.csv"),
        "stderr should report the row count, got: {}",
        result.stderr
    );
    assert!(
        result.stdout.is_empty(),
        "File export should leave stdout empty"
    );
}
