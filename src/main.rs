//! # mrsgate
//!
//! Command-line front end for the dual-species MRS gate simulator.
//!
//! ## Usage
//!
//! ```bash
//! # Score one pair over its suggested window
//! mrsgate pair 94 66 -n 50
//!
//! # Sweep every pair between 60 and 80 amu
//! mrsgate -v sweep scores.txt --lower 60 --upper 80 --window 20
//!
//! # Export the gate of Rb-85 as a sample table
//! mrsgate wave 85 -n 60 -w 2000000 -s 200000 rb85.txt
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
