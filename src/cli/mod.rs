use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use mrsgate::scan::{MassPair, PairScan};
use mrsgate::timing::CESIUM_CYCLE_NS;
use mrsgate::waveform::SampleWindow;

mod ioi;
mod lengths;
mod norm;
mod pair;
mod suggest;
mod sweep;
mod wave;

mod config;

pub use config::Config;

/// mrsgate - Dual-species MRS gate waveform simulator
#[derive(Parser)]
#[command(name = "mrsgate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Load settings from a TOML config file
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Gate parameters shared by the single-scan commands.
#[derive(Args, Debug, Clone)]
pub struct GateArgs {
    /// MRS cycles of the heavy mass
    #[arg(short = 'n', long, default_value = "30")]
    cycles: f64,

    /// Fraction of each duty cycle the gate is OFF
    #[arg(short = 'p', long, default_value = "0.4")]
    proportion: f64,

    /// Sample window length in ns (defaults to the suggested window)
    #[arg(short = 'w', long)]
    window: Option<u32>,

    /// Steps across the window (defaults to one per ns)
    #[arg(short = 's', long)]
    steps: Option<u32>,

    /// Duration of one Cs-133 MRS cycle in ns
    #[arg(long)]
    calibration: Option<f64>,
}

impl GateArgs {
    fn calibration(&self, config: &Config) -> f64 {
        self.calibration
            .unwrap_or_else(|| config.calibration_or(CESIUM_CYCLE_NS))
    }

    /// Window sized for `heavy` unless given explicitly.
    fn window(&self, heavy: f64, calibration: f64) -> SampleWindow {
        let length = self.window.unwrap_or_else(|| {
            mrsgate::timing::suggested_time_scale(heavy, self.cycles, self.proportion, calibration)
        });
        SampleWindow::new(length, self.steps.unwrap_or(length))
    }

    fn pair_scan(&self, pair: MassPair, config: &Config) -> PairScan {
        let calibration = self.calibration(config);
        let window = self.window(pair.heavy(), calibration);
        PairScan::new(pair, self.cycles, self.proportion, window).with_calibration(calibration)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Score every mass pair in a range and write one record per pair
    Sweep {
        /// Output record file path
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Lightest mass scanned
        #[arg(short = 'l', long)]
        lower: Option<u32>,

        /// Heaviest mass scanned
        #[arg(short = 'u', long)]
        upper: Option<u32>,

        /// Largest mass difference within a pair
        #[arg(short = 'w', long)]
        window: Option<u32>,

        /// MRS cycles of the heavy mass
        #[arg(short = 'n', long)]
        cycles: Option<f64>,

        /// Fraction of each duty cycle the gate is OFF
        #[arg(short = 'p', long)]
        proportion: Option<f64>,

        /// Runs shorter than this many samples count as peaks
        #[arg(short = 'a', long)]
        adjacency_break: Option<u32>,

        /// Write only the normalized on-time of each pair
        #[arg(long)]
        normalized_only: bool,

        /// Duration of one Cs-133 MRS cycle in ns
        #[arg(long)]
        calibration: Option<f64>,

        /// Worker threads (defaults to available parallelism)
        #[arg(short = 'j', long)]
        workers: Option<usize>,

        /// Write a JSON manifest describing the sweep
        #[arg(long, value_name = "FILE")]
        manifest: Option<PathBuf>,
    },

    /// Simulate one mass pair and report its statistics
    Pair {
        /// First mass, amu
        #[arg(value_name = "MASS1")]
        mass1: f64,

        /// Second mass, amu
        #[arg(value_name = "MASS2")]
        mass2: f64,

        #[command(flatten)]
        gate: GateArgs,

        /// Runs shorter than this many samples count as peaks
        #[arg(short = 'a', long, default_value = "10")]
        adjacency_break: u32,

        /// Write the heavy, light and combined waves to a sample table
        #[arg(long, value_name = "FILE")]
        table: Option<PathBuf>,
    },

    /// Simulate a mass pair that must exclude an ion of interest
    Ioi {
        /// First mass, amu
        #[arg(value_name = "MASS1")]
        mass1: f64,

        /// Second mass, amu
        #[arg(value_name = "MASS2")]
        mass2: f64,

        /// Ion of interest, amu
        #[arg(value_name = "IOI")]
        ion_of_interest: f64,

        #[command(flatten)]
        gate: GateArgs,

        /// Heavy-mass cycles into the sequence at which the window starts
        #[arg(long, default_value = "0")]
        start_cycle: f64,

        /// Runs shorter than this many samples count as peaks
        #[arg(short = 'a', long, default_value = "10")]
        adjacency_break: u32,

        /// Write the combined, ion-of-interest and excluded waves to a sample table
        #[arg(long, value_name = "FILE")]
        table: Option<PathBuf>,
    },

    /// Write the gate wave of a single species as a sample table
    Wave {
        /// Mass of interest, amu
        #[arg(value_name = "MASS")]
        mass: f64,

        #[command(flatten)]
        gate: GateArgs,

        /// Cycles into the sequence at which the window starts
        #[arg(long, default_value = "0")]
        start_cycle: f64,

        /// Output file path (defaults to stdout)
        #[arg(value_name = "OUTPUT")]
        output: Option<PathBuf>,
    },

    /// Write the run lengths of a combined gate, one per line
    Lengths {
        /// First mass, amu
        #[arg(value_name = "MASS1")]
        mass1: f64,

        /// Second mass, amu
        #[arg(value_name = "MASS2")]
        mass2: f64,

        #[command(flatten)]
        gate: GateArgs,

        /// Exclude this ion of interest from the combined gate
        #[arg(long, value_name = "IOI")]
        ioi: Option<f64>,

        /// Write intervals between runs shorter than this instead of run lengths
        #[arg(long, value_name = "BREAK", conflicts_with = "ioi")]
        intervals: Option<u32>,

        /// Write the heavy gate's samples between the first and last combined run instead
        #[arg(long, conflicts_with_all = ["ioi", "intervals"])]
        values_of_interest: bool,

        /// Output file path (defaults to stdout)
        #[arg(value_name = "OUTPUT")]
        output: Option<PathBuf>,
    },

    /// Print the normalized on-time of mass pairs
    Norm {
        /// First mass, amu
        #[arg(value_name = "MASS1")]
        mass1: f64,

        /// Second masses, amu
        #[arg(value_name = "MASS2", required = true)]
        others: Vec<f64>,

        /// MRS cycles of the heavy mass
        #[arg(short = 'n', long, default_value = "30")]
        cycles: f64,

        /// Fraction of each duty cycle the gate is OFF
        #[arg(short = 'p', long, default_value = "0.4")]
        proportion: f64,

        /// Duration of one Cs-133 MRS cycle in ns
        #[arg(long)]
        calibration: Option<f64>,
    },

    /// Print the derived timing and suggested window of a species
    Suggest {
        /// Mass of interest, amu
        #[arg(value_name = "MASS")]
        mass: f64,

        /// MRS cycles
        #[arg(short = 'n', long, default_value = "30")]
        cycles: f64,

        /// Fraction of each duty cycle the gate is OFF
        #[arg(short = 'p', long, default_value = "0.4")]
        proportion: f64,

        /// Duration of one Cs-133 MRS cycle in ns
        #[arg(long)]
        calibration: Option<f64>,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Sweep {
            output,
            lower,
            upper,
            window,
            cycles,
            proportion,
            adjacency_break,
            normalized_only,
            calibration,
            workers,
            manifest,
        } => {
            let mut sweep_config = config.sweep_config();
            sweep_config.lower_bound = lower.unwrap_or(sweep_config.lower_bound);
            sweep_config.upper_bound = upper.unwrap_or(sweep_config.upper_bound);
            sweep_config.window = window.unwrap_or(sweep_config.window);
            sweep_config.cycles = cycles.unwrap_or(sweep_config.cycles);
            sweep_config.proportion = proportion.unwrap_or(sweep_config.proportion);
            sweep_config.adjacency_break = adjacency_break.unwrap_or(sweep_config.adjacency_break);
            sweep_config.normalized_only |= normalized_only;
            sweep_config.calibration = calibration.unwrap_or(sweep_config.calibration);
            sweep_config.workers = workers.unwrap_or(sweep_config.workers);
            sweep::run(output, sweep_config, manifest)
        }
        Commands::Pair {
            mass1,
            mass2,
            gate,
            adjacency_break,
            table,
        } => pair::run(
            gate.pair_scan(MassPair::new(mass1, mass2), &config),
            adjacency_break,
            table,
        ),
        Commands::Ioi {
            mass1,
            mass2,
            ion_of_interest,
            gate,
            start_cycle,
            adjacency_break,
            table,
        } => ioi::run(
            gate.pair_scan(MassPair::new(mass1, mass2), &config),
            ion_of_interest,
            start_cycle,
            adjacency_break,
            table,
        ),
        Commands::Wave {
            mass,
            gate,
            start_cycle,
            output,
        } => {
            let calibration = gate.calibration(&config);
            let window = gate.window(mass, calibration);
            wave::run(
                mass,
                gate.cycles,
                gate.proportion,
                calibration,
                window,
                start_cycle,
                output,
            )
        }
        Commands::Lengths {
            mass1,
            mass2,
            gate,
            ioi,
            intervals,
            values_of_interest,
            output,
        } => lengths::run(
            gate.pair_scan(MassPair::new(mass1, mass2), &config),
            ioi,
            intervals,
            values_of_interest,
            output,
        ),
        Commands::Norm {
            mass1,
            others,
            cycles,
            proportion,
            calibration,
        } => norm::run(
            mass1,
            &others,
            cycles,
            proportion,
            calibration.unwrap_or_else(|| config.calibration_or(CESIUM_CYCLE_NS)),
        ),
        Commands::Suggest {
            mass,
            cycles,
            proportion,
            calibration,
        } => suggest::run(
            mass,
            cycles,
            proportion,
            calibration.unwrap_or_else(|| config.calibration_or(CESIUM_CYCLE_NS)),
        ),
    }
}

/// Open `path` for writing, or stdout when absent.
fn output_sink(path: Option<&Path>) -> Result<Box<dyn std::io::Write>> {
    use anyhow::Context;
    use std::io::BufWriter;

    match path {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(std::io::stdout()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_pair() {
        let cli = Cli::try_parse_from(["mrsgate", "-vv", "pair", "94", "66", "-n", "50"]).unwrap();
        assert_eq!(cli.verbosity(), 2);
        match cli.command {
            Commands::Pair {
                mass1,
                mass2,
                gate,
                adjacency_break,
                ..
            } => {
                assert_eq!((mass1, mass2), (94.0, 66.0));
                assert_eq!(gate.cycles, 50.0);
                assert_eq!(gate.proportion, 0.4);
                assert_eq!(adjacency_break, 10);
            }
            _ => panic!("expected pair command"),
        }
    }

    #[test]
    fn test_gate_args_default_to_suggested_window() {
        let gate = GateArgs {
            cycles: 30.0,
            proportion: 0.4,
            window: None,
            steps: None,
            calibration: None,
        };
        let scan = gate.pair_scan(MassPair::new(40.0, 85.0), &Config::default());
        assert_eq!(scan.window, SampleWindow::unit(586745));
        assert_eq!(scan.calibration, CESIUM_CYCLE_NS);
    }

    #[test]
    fn test_gate_args_explicit_window() {
        let gate = GateArgs {
            cycles: 30.0,
            proportion: 0.4,
            window: Some(2_000_000),
            steps: Some(200_000),
            calibration: Some(22700.0),
        };
        let scan = gate.pair_scan(MassPair::new(85.0, 85.0), &Config::default());
        assert_eq!(scan.window, SampleWindow::new(2_000_000, 200_000));
        assert_eq!(scan.calibration, 22700.0);
    }

    #[test]
    fn test_config_calibration_fills_missing_flag() {
        let config = Config::from_str("[instrument]\ncalibration_ns = 22700.0").unwrap();
        let gate = GateArgs {
            cycles: 30.0,
            proportion: 0.4,
            window: None,
            steps: None,
            calibration: None,
        };
        assert_eq!(gate.calibration(&config), 22700.0);
    }

    #[test]
    fn test_intervals_conflict_with_ioi() {
        let parsed = Cli::try_parse_from([
            "mrsgate", "lengths", "85", "85", "--ioi", "80", "--intervals", "5",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_parse_values_of_interest() {
        let cli = Cli::try_parse_from(["mrsgate", "lengths", "85", "39", "--values-of-interest"]).unwrap();
        match cli.command {
            Commands::Lengths {
                values_of_interest, ..
            } => assert!(values_of_interest),
            _ => panic!("expected lengths"),
        }

        let parsed = Cli::try_parse_from([
            "mrsgate", "lengths", "85", "39", "--values-of-interest", "--intervals", "5",
        ]);
        assert!(parsed.is_err());
    }
}
