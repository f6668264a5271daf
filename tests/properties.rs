//! Property-based tests for wave generation, combination and run statistics.

use mrsgate::statistics::{run_lengths, RunStatistics};
use mrsgate::waveform::{combine, PhaseOffset, SampleWindow, Species, Waveform, WaveformEngine};
use proptest::prelude::*;

fn bits(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(0u8..=1, 2..max_len)
}

fn generate(mass: f64, cycles: f64, proportion: f64, window: SampleWindow, offset: PhaseOffset) -> Waveform {
    WaveformEngine::with_cycles(Species::new(mass, proportion), cycles, window, offset)
        .and_then(|engine| engine.generate())
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Test that generated timestamps advance by exactly the resolution
    #[test]
    fn test_uniform_resolution(
        mass in 20.0f64..200.0,
        cycles in 1.0f64..20.0,
        proportion in 0.05f64..0.95,
        length in 10_000u32..200_000,
        resolution in 1u32..20,
    ) {
        let window = SampleWindow::new(length, length / resolution);
        let wave = generate(mass, cycles, proportion, window, PhaseOffset::None);

        prop_assert_eq!(wave.resolution(), window.resolution());
        prop_assert_eq!(wave.len(), window.sample_count());
        for pair in wave.timings().windows(2) {
            prop_assert_eq!(pair[1] - pair[0], wave.resolution());
        }
    }

    /// Test that AND of a wave with itself is the wave
    #[test]
    fn test_and_is_idempotent(
        mass in 20.0f64..200.0,
        cycles in 1.0f64..20.0,
        proportion in 0.05f64..0.95,
    ) {
        let wave = generate(mass, cycles, proportion, SampleWindow::new(400_000, 40_000), PhaseOffset::None);
        prop_assert_eq!(combine::and(&wave, &wave).unwrap(), wave);
    }

    /// Test that a zero offset in either form reproduces the unshifted wave
    #[test]
    fn test_zero_offset_equivalence(
        mass in 20.0f64..200.0,
        cycles in 1.0f64..20.0,
        proportion in 0.05f64..0.95,
    ) {
        let window = SampleWindow::new(400_000, 40_000);
        let plain = generate(mass, cycles, proportion, window, PhaseOffset::None);
        prop_assert_eq!(&generate(mass, cycles, proportion, window, PhaseOffset::Cycles(0.0)), &plain);
        prop_assert_eq!(&generate(mass, cycles, proportion, window, PhaseOffset::Time(0.0)), &plain);
    }

    /// Test that excluding a wave from itself leaves nothing
    #[test]
    fn test_exclude_self_is_empty(values in bits(200)) {
        let wave = Waveform::from_digital(values, 5.0).unwrap();
        let excluded = combine::exclude(&wave, &wave).unwrap();
        prop_assert_eq!(excluded.hi_count(), 0);
    }

    /// Test the counting invariants of the run statistics
    #[test]
    fn test_statistics_invariants(values in bits(300), adjacency_break in 1u32..12) {
        let stats = RunStatistics::compute(&values, adjacency_break, 0);
        let transitions = values.windows(2).filter(|w| w[0] != w[1]).count() as i64;
        let trailing = i64::from(values[values.len() - 1] != values[values.len() - 2]);

        prop_assert_eq!(stats.on_time, values.iter().filter(|&&v| v == 1).count() as i64);
        prop_assert_eq!(stats.switches, transitions + trailing);
        prop_assert!(stats.peaks <= stats.switches);
        prop_assert!(stats.inclusive_peaks <= stats.peaks);
        prop_assert!(stats.indeterminate_peaks >= stats.peaks);
        prop_assert!(
            (stats.min_run == 0 && stats.second_min_run == 0) || stats.min_run < stats.second_min_run
        );
    }

    /// Test that closed runs cover every sample but the open trailing run
    #[test]
    fn test_run_lengths_partition_sequence(values in bits(300)) {
        let lengths = run_lengths(&values);
        let transitions = values.windows(2).filter(|w| w[0] != w[1]).count();
        let last = values[values.len() - 1];
        let trailing = values.iter().rev().take_while(|&&v| v == last).count();

        prop_assert_eq!(lengths.len(), transitions);
        prop_assert_eq!(lengths.iter().sum::<usize>() + trailing, values.len());
    }

    /// Test that the normalized on-time is the floored percentage
    #[test]
    fn test_normalized_on_time(values in bits(300), expected in 1i64..500) {
        let stats = RunStatistics::compute(&values, 5, expected);
        prop_assert_eq!(stats.normalized_on_time, stats.on_time * 100 / expected);
    }
}
