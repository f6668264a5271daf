use std::io::{self, Write};

use super::*;
use crate::scan::{MassPair, PairScan};

fn small_config() -> SweepConfig {
    SweepConfig {
        lower_bound: 20,
        upper_bound: 23,
        window: 2,
        cycles: 5.0,
        proportion: 0.4,
        adjacency_break: 10,
        workers: 2,
        channel_capacity: 4,
        ..SweepConfig::default()
    }
}

struct FailingSink;

impl Write for FailingSink {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::Other, "disk full"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_mass_pairs_trapezoid() {
    let pairs = mass_pairs(20, 23, 2);
    let ints: Vec<(f64, f64)> = pairs.iter().map(|p| (p.first, p.second)).collect();
    assert_eq!(
        ints,
        vec![
            (20.0, 20.0),
            (20.0, 21.0),
            (20.0, 22.0),
            (21.0, 21.0),
            (21.0, 22.0),
            (21.0, 23.0),
            (22.0, 22.0),
            (22.0, 23.0),
            (23.0, 23.0),
        ]
    );
    assert_eq!(mass_pairs(5, 5, 10).len(), 1);
    // Full triangle once the window reaches the span
    assert_eq!(mass_pairs(1, 10, 9).len(), 55);
}

#[test]
fn test_config_validation() {
    assert!(small_config().validate().is_ok());

    let invalid = [
        SweepConfig { lower_bound: 0, ..small_config() },
        SweepConfig { upper_bound: 19, ..small_config() },
        SweepConfig { adjacency_break: 0, ..small_config() },
        SweepConfig { cycles: 0.0, ..small_config() },
        SweepConfig { cycles: 900.0, ..small_config() },
        SweepConfig { proportion: -0.1, ..small_config() },
        SweepConfig { calibration: 0.0, ..small_config() },
        SweepConfig { workers: 0, ..small_config() },
    ];
    for config in invalid {
        assert!(matches!(
            Sweep::new(config),
            Err(SweepError::InvalidConfig(_))
        ));
    }
}

#[test]
fn test_sweep_writes_every_pair() -> Result<(), SweepError> {
    let sweep = Sweep::new(small_config())?;
    let (stats, sink) = sweep.run(Vec::new())?;

    assert_eq!(stats.pairs_submitted, 9);
    assert_eq!(stats.rows_written, 9);
    assert_eq!(stats.pairs_skipped, 0);

    let text = String::from_utf8(sink).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("M1 M2 Mi Br Ma OT Sw Mc Ss %C"));
    let rows: Vec<&str> = lines.collect();
    assert_eq!(rows.len(), 9);
    for row in &rows {
        assert_eq!(row.split_whitespace().count(), 10);
    }

    // Rows match a direct scan, whatever order they arrived in
    let expected = PairScan::suggested(MassPair::new(21.0, 23.0), 5.0, 0.4, small_config().calibration)
        .statistics(10)?;
    let row = rows.iter().find(|r| r.starts_with("21 23 ")).unwrap();
    let fields: Vec<i64> = row.split_whitespace().map(|f| f.parse().unwrap()).collect();
    assert_eq!(fields[3], expected.peaks);
    assert_eq!(fields[5], expected.on_time);
    assert_eq!(fields[9], expected.normalized_on_time);
    Ok(())
}

#[test]
fn test_normalized_only_sweep() -> Result<(), SweepError> {
    let config = SweepConfig {
        normalized_only: true,
        ..small_config()
    };
    let (_, sink) = Sweep::new(config)?.run(Vec::new())?;
    let text = String::from_utf8(sink).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("M1 M2 %C"));
    assert!(lines.all(|l| l.split_whitespace().count() == 3));
    Ok(())
}

#[test]
fn test_sink_failure_aborts_sweep() {
    let sweep = Sweep::new(small_config()).unwrap();
    assert!(matches!(
        sweep.run(FailingSink),
        Err(SweepError::IoError(_))
    ));
}

#[test]
fn test_stats_display() {
    let stats = SweepStats {
        pairs_submitted: 10,
        rows_written: 9,
        pairs_skipped: 1,
        elapsed_seconds: 1.5,
    };
    assert_eq!(stats.to_string(), "Wrote 9 of 10 pairs (1 skipped) in 1.50s");
}

#[test]
fn test_manifest_roundtrips_through_json() -> Result<(), SweepError> {
    let manifest = SweepManifest::new(small_config(), SweepStats::default());
    let json = serde_json::to_string(&manifest)?;
    let back: SweepManifest = serde_json::from_str(&json)?;
    assert_eq!(back.config, small_config());
    assert_eq!(back.version, env!("CARGO_PKG_VERSION"));
    Ok(())
}
