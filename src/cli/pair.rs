use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use mrsgate::records::RecordWriter;
use mrsgate::report::ScanReport;
use mrsgate::scan::PairScan;

use super::output_sink;

/// Simulate one mass pair and print its report
pub fn run(scan: PairScan, adjacency_break: u32, table: Option<PathBuf>) -> Result<()> {
    info!("mrsgate Pair Scan");
    info!("=================");
    info!("Pair: {}", scan.pair);
    info!(
        "Window: {} ns over {} steps",
        scan.window.length_ns, scan.window.steps
    );

    let stats = scan
        .statistics(adjacency_break)
        .with_context(|| format!("Failed to simulate pair {}", scan.pair))?;

    let report = ScanReport::new(format!("Pair {}", scan.pair), stats, adjacency_break)
        .parameter("Cycles", scan.cycles)
        .parameter("Proportion", scan.proportion)
        .parameter("Window", format!("{} ns / {} steps", scan.window.length_ns, scan.window.steps))
        .parameter("Expected on-time", scan.expected_on_time());

    #[cfg(feature = "colorized_output")]
    {
        println!("{}", report.format_colored());
    }

    #[cfg(not(feature = "colorized_output"))]
    {
        println!("{}", report);
    }

    if let Some(path) = table {
        let table = scan.sample_table()?;
        let mut writer = RecordWriter::new(output_sink(Some(&path))?);
        writer
            .write_sample_table(&table)
            .with_context(|| format!("Failed to write sample table: {}", path.display()))?;
        writer.flush()?;
        info!("Sample table ({} rows): {}", table.len(), path.display());
    }

    Ok(())
}
