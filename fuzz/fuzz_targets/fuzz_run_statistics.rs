#![no_main]

use libfuzzer_sys::fuzz_target;
use mrsgate::statistics::{peak_intervals, run_lengths, RunStatistics};

fuzz_target!(|data: &[u8]| {
    // First byte picks the adjacency break, the rest become bits
    let Some((&adjacency_break, rest)) = data.split_first() else {
        return;
    };
    let bits: Vec<u8> = rest.iter().map(|b| b & 1).collect();

    // Must never panic, whatever the sequence
    let stats = RunStatistics::compute(&bits, u32::from(adjacency_break), bits.len() as i64);
    assert!(stats.peaks <= stats.switches);

    let lengths = run_lengths(&bits);
    assert!(lengths.iter().sum::<usize>() <= bits.len());

    let timings: Vec<f64> = (0..bits.len()).map(|i| i as f64 * 5.0).collect();
    let _ = peak_intervals(&bits, &timings, u32::from(adjacency_break));
});
