use anyhow::{Context, Result};

use mrsgate::scan::normalized_on_time;

/// Print `mass1 mass2 %C` for each partner mass
pub fn run(mass1: f64, others: &[f64], cycles: f64, proportion: f64, calibration: f64) -> Result<()> {
    for &mass2 in others {
        let normalized = normalized_on_time(mass1, mass2, cycles, proportion, calibration)
            .with_context(|| format!("Failed to simulate pair {}/{}", mass1, mass2))?;
        println!("{} {} {}", mass1, mass2, normalized);
    }
    Ok(())
}
