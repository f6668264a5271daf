use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use mrsgate::sweep::{Sweep, SweepConfig, SweepManifest};

/// Score every pair in the configured trapezoid
pub fn run(output: PathBuf, config: SweepConfig, manifest: Option<PathBuf>) -> Result<()> {
    info!("mrsgate Sweep");
    info!("=============");
    info!("Output: {}", output.display());
    info!(
        "Masses: {}..={} (window {})",
        config.lower_bound, config.upper_bound, config.window
    );
    info!("Cycles: {}, proportion: {}", config.cycles, config.proportion);
    info!("Adjacency break: {}", config.adjacency_break);
    if config.normalized_only {
        info!("Format: normalized on-time only");
    }

    let sweep = Sweep::new(config).context("Invalid sweep configuration")?;
    let stats = sweep
        .run_to_file(&output)
        .with_context(|| format!("Sweep into {} failed", output.display()))?;

    info!("Sweep complete!");
    info!("  {}", stats);

    if let Some(path) = manifest {
        SweepManifest::new(sweep.config().clone(), stats)
            .write_to_file(&path)
            .with_context(|| format!("Failed to write manifest: {}", path.display()))?;
        info!("  Manifest: {}", path.display());
    }

    Ok(())
}
