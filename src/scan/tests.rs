use super::*;
use crate::timing::{self, CESIUM_CYCLE_NS};
use crate::waveform::{SampleWindow, WaveformError};

fn rb85_pair() -> PairScan {
    PairScan::suggested(MassPair::new(85.0, 85.0), 30.0, 0.4, CESIUM_CYCLE_NS)
}

#[test]
fn test_mass_pair_orders_heavy_and_light() {
    let pair = MassPair::new(66.0, 94.0);
    assert_eq!(pair.heavy(), 94.0);
    assert_eq!(pair.light(), 66.0);
    assert_eq!(pair.first, 66.0);
    assert_eq!(pair.to_string(), "66/94");

    let pair = MassPair::new(94.0, 66.0);
    assert_eq!(pair.heavy(), 94.0);
    assert_eq!(pair.light(), 66.0);
}

#[test]
fn test_suggested_window_uses_heavy_mass() {
    let scan = PairScan::suggested(MassPair::new(40.0, 85.0), 30.0, 0.4, CESIUM_CYCLE_NS);
    assert_eq!(scan.window.length_ns, 586_745);
    assert_eq!(scan.window.steps, 586_745);
    assert_eq!(
        scan.window.length_ns,
        timing::suggested_time_scale(85.0, 30.0, 0.4, CESIUM_CYCLE_NS)
    );
}

#[test]
fn test_identical_masses_normalize_to_full_on_time() -> Result<(), WaveformError> {
    let scan = rb85_pair();
    let stats = scan.statistics(NORMALIZED_ADJACENCY_BREAK)?;
    assert_eq!(stats.on_time, 326_340);
    assert_eq!(scan.expected_on_time(), 326_340);
    assert_eq!(stats.normalized_on_time, 100);
    assert_eq!(normalized_on_time(85.0, 85.0, 30.0, 0.4, CESIUM_CYCLE_NS)?, 100);
    Ok(())
}

#[test]
fn test_light_wave_shares_heavy_on_duration() -> Result<(), WaveformError> {
    let scan = PairScan::new(
        MassPair::new(94.0, 66.0),
        50.0,
        0.4,
        SampleWindow::new(1_040_000, 104_000),
    );
    let waves = scan.waveforms()?;
    assert_eq!(waves.heavy.len(), waves.light.len());
    assert_eq!(waves.combined.timings(), waves.heavy.timings());
    assert!(waves.combined.hi_count() <= waves.heavy.hi_count());
    assert!(waves.combined.hi_count() <= waves.light.hi_count());
    Ok(())
}

#[test]
fn test_pair_sample_table() -> Result<(), WaveformError> {
    let scan = PairScan::new(
        MassPair::new(85.0, 39.0),
        30.0,
        0.4,
        SampleWindow::new(600_000, 60_000),
    );
    let table = scan.sample_table()?;
    assert_eq!(table.labels(), &["Ti", "HM", "LM", "CM"]);
    assert_eq!(table.len(), 60_000);

    let waves = scan.waveforms()?;
    let (time, values) = table.row(3_000).unwrap_or_default();
    assert_eq!(time, 30_000.0);
    assert_eq!(
        values,
        vec![
            waves.heavy.values()[3_000],
            waves.light.values()[3_000],
            waves.combined.values()[3_000]
        ]
    );
    assert!(table.row(60_000).is_none());
    Ok(())
}

#[test]
fn test_run_lengths_and_peak_intervals_agree() -> Result<(), WaveformError> {
    let scan = rb85_pair();
    let lengths = scan.run_lengths()?;
    assert!(!lengths.is_empty());
    // Lo lead-in: samples 0..=28040
    assert_eq!(lengths[0], 28_041);

    let intervals = scan.peak_intervals(u32::MAX)?;
    assert_eq!(intervals.len(), lengths.len() - 1);
    assert!(scan.peak_intervals(1)?.is_empty());
    Ok(())
}

#[test]
fn test_values_of_interest_trim_lead_in_and_tail() -> Result<(), WaveformError> {
    let scan = rb85_pair();
    let waves = scan.waveforms()?;
    let values = scan.values_of_interest()?;

    // Samples 28_041..568_315: first Hi sample through the last Hi sample
    assert_eq!(values.len(), 568_315 - 28_041);
    assert_eq!(&values[..], &waves.heavy.values()[28_041..568_315]);
    assert_eq!(values.first(), Some(&1));
    assert_eq!(values.last(), Some(&1));
    assert_eq!(values.iter().filter(|&&v| v == 1).count(), 326_340);
    Ok(())
}

#[test]
fn test_values_of_interest_come_from_heavy_wave() -> Result<(), WaveformError> {
    let scan = PairScan::new(
        MassPair::new(39.0, 85.0),
        30.0,
        0.4,
        SampleWindow::new(600_000, 60_000),
    );
    let waves = scan.waveforms()?;
    let lengths = scan.run_lengths()?;
    let start = lengths.first().copied().unwrap_or(0);
    let end: usize = lengths.iter().sum();

    assert_eq!(scan.values_of_interest()?, waves.heavy.values()[start..end].to_vec());
    Ok(())
}

#[test]
fn test_ioi_identical_masses_leave_nothing() -> Result<(), WaveformError> {
    let ioi = IoiScan::new(rb85_pair(), 85.0);
    let waves = ioi.waveforms()?;
    assert_eq!(waves.combined.hi_count(), 326_340);
    assert_eq!(ioi.on_time()?, 0);
    assert_eq!(ioi.statistics(5)?.normalized_on_time, 0);
    assert!(ioi.run_lengths()?.is_empty());
    Ok(())
}

#[test]
fn test_ioi_start_cycle_aligns_all_waves() -> Result<(), WaveformError> {
    let scan = PairScan::new(
        MassPair::new(85.0, 60.0),
        30.0,
        0.4,
        SampleWindow::new(600_000, 60_000),
    );
    let ioi = IoiScan::new(scan, 70.0).starting_at(3.0);
    let waves = ioi.waveforms()?;

    let heavy = timing::DutyTiming::new(85.0, 0.4, CESIUM_CYCLE_NS);
    let start = heavy.delay + 3.0 * heavy.cycle;
    assert_eq!(waves.combined.start(), start);
    assert_eq!(waves.ion_of_interest.start(), start);
    assert_eq!(waves.excluded.len(), waves.combined.len());
    assert!(waves.excluded.hi_count() <= waves.combined.hi_count());
    Ok(())
}

#[test]
fn test_ioi_sample_table() -> Result<(), WaveformError> {
    let scan = PairScan::new(
        MassPair::new(85.0, 60.0),
        10.0,
        0.4,
        SampleWindow::new(300_000, 30_000),
    );
    let table = IoiScan::new(scan, 70.0).sample_table()?;
    assert_eq!(table.labels(), &["Ti", "CM", "IO", "XR"]);
    assert_eq!(table.rows().count(), 30_000);
    for (_, values) in table.rows() {
        // XR is Hi only where CM is Hi and IO is Lo
        assert_eq!(values[2], values[0] & (values[1] ^ 1));
    }
    Ok(())
}
