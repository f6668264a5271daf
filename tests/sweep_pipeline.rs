//! End-to-end tests for the mass-pair sweep
//!
//! These tests run a sweep into a file and read the records back.

use std::collections::HashSet;
use std::fs;

use mrsgate::scan::{normalized_on_time, MassPair, PairScan};
use mrsgate::sweep::{Sweep, SweepConfig, SweepManifest};
use tempfile::tempdir;

fn config() -> SweepConfig {
    SweepConfig {
        lower_bound: 30,
        upper_bound: 34,
        window: 3,
        cycles: 4.0,
        proportion: 0.4,
        adjacency_break: 10,
        workers: 3,
        channel_capacity: 2,
        ..SweepConfig::default()
    }
}

fn parse_rows(text: &str) -> Vec<Vec<i64>> {
    text.lines()
        .skip(1)
        .map(|line| line.split_whitespace().map(|f| f.parse().unwrap()).collect())
        .collect()
}

/// Test a full sweep into a file with its manifest
#[test]
fn test_sweep_to_file_with_manifest() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("scores.txt");
    let manifest_path = dir.path().join("scores.json");

    let sweep = Sweep::new(config()).unwrap();
    let expected_pairs = sweep.pairs().len();
    let stats = sweep.run_to_file(&output).unwrap();

    // 5 masses, differences up to 3: 5 + 4 + 3 + 2
    assert_eq!(expected_pairs, 14);
    assert_eq!(stats.pairs_submitted, 14);
    assert_eq!(stats.rows_written, 14);
    assert_eq!(stats.pairs_skipped, 0);

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.starts_with("M1 M2 Mi Br Ma OT Sw Mc Ss %C\n"));
    assert!(text.ends_with('\n'));

    let rows = parse_rows(&text);
    assert_eq!(rows.len(), 14);

    // Every pair appears exactly once, completion order aside
    let pairs: HashSet<(i64, i64)> = rows.iter().map(|r| (r[0], r[1])).collect();
    assert_eq!(pairs.len(), 14);
    assert!(pairs.iter().all(|&(i, j)| i <= j && j - i <= 3));

    // A row agrees with the same pair scanned on its own
    let row = rows.iter().find(|r| r[0] == 30 && r[1] == 33).unwrap();
    let direct = PairScan::suggested(MassPair::new(30.0, 33.0), 4.0, 0.4, config().calibration)
        .statistics(10)
        .unwrap();
    assert_eq!(row[2], direct.indeterminate_peaks);
    assert_eq!(row[3], direct.peaks);
    assert_eq!(row[4], direct.inclusive_peaks);
    assert_eq!(row[5], direct.on_time);
    assert_eq!(row[6], direct.switches);
    assert_eq!(row[9], direct.normalized_on_time);

    SweepManifest::new(sweep.config().clone(), stats.clone())
        .write_to_file(&manifest_path)
        .unwrap();
    let manifest: SweepManifest =
        serde_json::from_str(&fs::read_to_string(&manifest_path).unwrap()).unwrap();
    assert_eq!(manifest.config, config());
    assert_eq!(manifest.stats.rows_written, 14);
}

/// Test that a normalized-only sweep matches the normalized query
#[test]
fn test_normalized_only_sweep_to_file() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("normalized.txt");

    let sweep_config = SweepConfig {
        normalized_only: true,
        adjacency_break: 5,
        ..config()
    };
    Sweep::new(sweep_config).unwrap().run_to_file(&output).unwrap();

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.starts_with("M1 M2 %C\n"));

    for row in parse_rows(&text) {
        assert_eq!(row.len(), 3);
        let expected =
            normalized_on_time(row[0] as f64, row[1] as f64, 4.0, 0.4, config().calibration).unwrap();
        assert_eq!(row[2], expected);
    }
}

/// Test that a sweep into a missing directory fails before any work
#[test]
fn test_sweep_into_missing_directory() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("missing").join("scores.txt");

    let sweep = Sweep::new(config()).unwrap();
    assert!(sweep.run_to_file(&output).is_err());
}
