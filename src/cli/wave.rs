use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use mrsgate::records::RecordWriter;
use mrsgate::scan::SampleTable;
use mrsgate::waveform::{PhaseOffset, SampleWindow, Species, WaveformEngine};

use super::output_sink;

/// Write one species' gate as a `Ti WV` sample table
pub fn run(
    mass: f64,
    cycles: f64,
    proportion: f64,
    calibration: f64,
    window: SampleWindow,
    start_cycle: f64,
    output: Option<PathBuf>,
) -> Result<()> {
    let offset = if start_cycle == 0.0 {
        PhaseOffset::None
    } else {
        PhaseOffset::Cycles(start_cycle)
    };
    let species = Species::new(mass, proportion).with_calibration(calibration);
    let engine = WaveformEngine::with_cycles(species, cycles, window, offset)
        .context("Invalid gate parameters")?;

    info!("Mass {}: delay {} ns, gate end {} ns", mass, engine.timing().delay, engine.gate_end());
    if engine.is_extended() {
        info!("Gate extended to close the final ON interval");
    }

    let wave = engine.generate()?;
    let table = SampleTable::from_waves("Ti", &[("WV", &wave)]);

    let mut writer = RecordWriter::new(output_sink(output.as_deref())?);
    writer
        .write_sample_table(&table)
        .context("Failed to write sample table")?;
    writer.flush()?;

    info!("Wrote {} samples ({} Hi)", wave.len(), wave.hi_count());
    Ok(())
}
