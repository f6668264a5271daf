use anyhow::{bail, Result};

use mrsgate::timing::{self, DutyTiming, MAX_MRS_CYCLES};

/// Print the derived duty-cycle intervals of a species
pub fn run(mass: f64, cycles: f64, proportion: f64, calibration: f64) -> Result<()> {
    if mass <= 0.0 || cycles <= 0.0 || cycles > MAX_MRS_CYCLES {
        bail!("Mass must be positive and cycles within (0, {}]", MAX_MRS_CYCLES);
    }

    let duty = DutyTiming::new(mass, proportion, calibration);

    println!("Mass {} Timing", mass);
    println!("==================");
    println!("Cycle:            {:.3} ns", duty.cycle);
    println!("OFF interval:     {} ns", duty.off);
    println!("ON interval:      {} ns", duty.on_half);
    println!("Startup delay:    {} ns", duty.delay);
    println!("ON duration:      {:.3} ns", duty.cycle * cycles);
    println!(
        "Expected on-time: {} samples",
        timing::expected_on_time(mass, cycles, proportion, calibration)
    );
    println!(
        "Suggested window: {} ns",
        timing::suggested_time_scale(mass, cycles, proportion, calibration)
    );

    Ok(())
}
