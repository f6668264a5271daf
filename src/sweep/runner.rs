use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Instant;

use crossbeam_channel::{bounded, Sender};
use log::{debug, info, warn};
use rayon::prelude::*;

use crate::records::RecordWriter;
use crate::scan::{MassPair, PairScan};
use crate::statistics::RunStatistics;
use crate::waveform::WaveformError;

use super::config::SweepConfig;
use super::error::SweepError;
use super::pairs::mass_pairs;
use super::stats::SweepStats;

/// One scored pair on its way to the writer.
struct PairRow {
    pair: MassPair,
    stats: RunStatistics,
}

/// Mass-pair sweep over a worker pool with a single writer thread.
pub struct Sweep {
    config: SweepConfig,
}

impl Sweep {
    /// Validate `config` and prepare a sweep.
    pub fn new(config: SweepConfig) -> Result<Self, SweepError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Sweep parameters
    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    /// Pairs this sweep will simulate.
    pub fn pairs(&self) -> Vec<MassPair> {
        mass_pairs(
            self.config.lower_bound,
            self.config.upper_bound,
            self.config.window,
        )
    }

    /// Run the sweep into a new file at `path`.
    pub fn run_to_file<P: AsRef<Path>>(&self, path: P) -> Result<SweepStats, SweepError> {
        let file = File::create(path.as_ref())?;
        let (stats, _) = self.run(BufWriter::new(file))?;
        Ok(stats)
    }

    /// Run the sweep into `sink` and hand the sink back once every row is
    /// written and flushed.
    ///
    /// Rows arrive in completion order. A pair whose simulation fails is logged
    /// and skipped; a sink failure aborts the sweep.
    pub fn run<W>(&self, sink: W) -> Result<(SweepStats, W), SweepError>
    where
        W: Write + Send + 'static,
    {
        let start_time = Instant::now();
        let config = &self.config;
        let format = config.format();
        let pairs = self.pairs();

        info!(
            "Sweeping {} pairs over masses {}..={} with {} workers",
            pairs.len(),
            config.lower_bound,
            config.upper_bound,
            config.workers
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.workers)
            .thread_name(|i| format!("mrsgate-worker-{}", i))
            .build()?;

        let (sender, receiver) = bounded::<PairRow>(config.channel_capacity);

        let handle = thread::Builder::new()
            .name("mrsgate-writer".to_string())
            .spawn(move || -> std::io::Result<(usize, W)> {
                let mut writer = RecordWriter::new(sink);
                writer.write_header(format)?;
                for row in receiver {
                    writer.write_record(format, &row.pair, &row.stats)?;
                }
                let rows = writer.records_written();
                Ok((rows, writer.into_inner()?))
            })?;

        let skipped = AtomicUsize::new(0);
        let sent = pool.install(|| {
            pairs
                .par_iter()
                .try_for_each_with(sender, |sender: &mut Sender<PairRow>, pair| {
                    match score_pair(config, pair) {
                        Ok(stats) => sender.send(PairRow { pair: *pair, stats }),
                        Err(e) => {
                            warn!("Skipping pair {}: {}", pair, e);
                            skipped.fetch_add(1, Ordering::Relaxed);
                            Ok(())
                        }
                    }
                })
        });

        // Every sender is dropped once the pool returns, so the writer drains and exits.
        let (rows_written, sink) = handle.join().map_err(|_| SweepError::ThreadPanicked)??;
        if sent.is_err() {
            return Err(SweepError::WriterDisconnected);
        }

        let stats = SweepStats {
            pairs_submitted: pairs.len(),
            rows_written,
            pairs_skipped: skipped.into_inner(),
            elapsed_seconds: start_time.elapsed().as_secs_f64(),
        };
        info!("{}", stats);

        Ok((stats, sink))
    }
}

fn score_pair(config: &SweepConfig, pair: &MassPair) -> Result<RunStatistics, WaveformError> {
    let scan = PairScan::suggested(*pair, config.cycles, config.proportion, config.calibration);
    let stats = scan.statistics(config.adjacency_break)?;
    debug!("Pair {}: {}", pair, stats);
    Ok(stats)
}
