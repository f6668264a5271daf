use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use mrsgate::records::RecordWriter;
use mrsgate::report::ScanReport;
use mrsgate::scan::{IoiScan, PairScan};

use super::output_sink;

/// Simulate a mass pair against an ion of interest
pub fn run(
    scan: PairScan,
    ion_of_interest: f64,
    start_cycle: f64,
    adjacency_break: u32,
    table: Option<PathBuf>,
) -> Result<()> {
    info!("mrsgate Ion-of-Interest Scan");
    info!("============================");
    info!("Pair: {}, ion of interest: {}", scan.pair, ion_of_interest);
    if start_cycle != 0.0 {
        info!("Window starts {} heavy cycles in", start_cycle);
    }

    let ioi_scan = IoiScan::new(scan, ion_of_interest).starting_at(start_cycle);
    let stats = ioi_scan
        .statistics(adjacency_break)
        .with_context(|| format!("Failed to simulate pair {} against {}", scan.pair, ion_of_interest))?;

    let report = ScanReport::new(
        format!("Pair {} excluding {}", scan.pair, ion_of_interest),
        stats,
        adjacency_break,
    )
    .parameter("Cycles", scan.cycles)
    .parameter("Proportion", scan.proportion)
    .parameter("Start cycle", start_cycle);

    #[cfg(feature = "colorized_output")]
    {
        println!("{}", report.format_colored());
    }

    #[cfg(not(feature = "colorized_output"))]
    {
        println!("{}", report);
    }

    if let Some(path) = table {
        let table = ioi_scan.sample_table()?;
        let mut writer = RecordWriter::new(output_sink(Some(&path))?);
        writer
            .write_sample_table(&table)
            .with_context(|| format!("Failed to write sample table: {}", path.display()))?;
        writer.flush()?;
        info!("Sample table ({} rows): {}", table.len(), path.display());
    }

    Ok(())
}
