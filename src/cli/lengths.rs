use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use mrsgate::records::RecordWriter;
use mrsgate::scan::{IoiScan, PairScan};

use super::output_sink;

/// Write run lengths, the intervals between short runs, or the values of
/// interest of a combined gate
pub fn run(
    scan: PairScan,
    ion_of_interest: Option<f64>,
    intervals: Option<u32>,
    values_of_interest: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    let mut writer = RecordWriter::new(output_sink(output.as_deref())?);

    if values_of_interest {
        let values = scan.values_of_interest()?;
        info!("Pair {}: {} values of interest", scan.pair, values.len());
        writer
            .write_values(&values)
            .context("Failed to write values of interest")?;
        writer.flush()?;
        return Ok(());
    }

    match (ion_of_interest, intervals) {
        (_, Some(adjacency_break)) => {
            let intervals = scan.peak_intervals(adjacency_break)?;
            info!("Pair {}: {} peak intervals", scan.pair, intervals.len());
            writer
                .write_intervals(&intervals)
                .context("Failed to write peak intervals")?;
        }
        (Some(ioi), None) => {
            let lengths = IoiScan::new(scan, ioi).run_lengths()?;
            info!("Pair {} excluding {}: {} runs", scan.pair, ioi, lengths.len());
            writer
                .write_run_lengths(&lengths)
                .context("Failed to write run lengths")?;
        }
        (None, None) => {
            let lengths = scan.run_lengths()?;
            info!("Pair {}: {} runs", scan.pair, lengths.len());
            writer
                .write_run_lengths(&lengths)
                .context("Failed to write run lengths")?;
        }
    }

    writer.flush()?;
    Ok(())
}
