//! Plain-text record formats.
//!
//! Every record is one line of whitespace-separated fields terminated by `\n`.
//!
//! | Format       | Header                          | Row                                                         |
//! |--------------|---------------------------------|-------------------------------------------------------------|
//! | Statistics   | `M1 M2 Mi Br Ma OT Sw Mc Ss %C` | masses, indeterminate/plain/inclusive peaks, on-time, switches, min, second, normalized |
//! | Normalized   | `M1 M2 %C`                      | masses, normalized on-time                                  |
//! | Sample table | column labels                   | timestamp followed by one value per wave                    |
//! | Run lengths  | none                            | one length per line                                         |
//! | Sample values | none                           | one 0/1 value per line                                      |

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::scan::{MassPair, SampleTable};
use crate::statistics::RunStatistics;

/// Which row layout a sweep writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RecordFormat {
    /// Full run-length statistics
    #[default]
    Statistics,
    /// Normalized on-time only
    Normalized,
}

impl RecordFormat {
    /// Header line without the trailing newline.
    pub fn header(&self) -> &'static str {
        match self {
            RecordFormat::Statistics => "M1 M2 Mi Br Ma OT Sw Mc Ss %C",
            RecordFormat::Normalized => "M1 M2 %C",
        }
    }
}

/// Writes records to any `Write` sink.
pub struct RecordWriter<W: Write> {
    inner: W,
    records_written: usize,
}

impl<W: Write> RecordWriter<W> {
    /// Wrap a sink.
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            records_written: 0,
        }
    }

    /// Write the header for `format`.
    pub fn write_header(&mut self, format: RecordFormat) -> io::Result<()> {
        writeln!(self.inner, "{}", format.header())
    }

    /// Write one mass pair row in `format`.
    pub fn write_record(
        &mut self,
        format: RecordFormat,
        pair: &MassPair,
        stats: &RunStatistics,
    ) -> io::Result<()> {
        match format {
            RecordFormat::Statistics => writeln!(
                self.inner,
                "{} {} {} {} {} {} {} {} {} {}",
                pair.first,
                pair.second,
                stats.indeterminate_peaks,
                stats.peaks,
                stats.inclusive_peaks,
                stats.on_time,
                stats.switches,
                stats.min_run,
                stats.second_min_run,
                stats.normalized_on_time
            )?,
            RecordFormat::Normalized => writeln!(
                self.inner,
                "{} {} {}",
                pair.first, pair.second, stats.normalized_on_time
            )?,
        }
        self.records_written += 1;
        Ok(())
    }

    /// Write a sample table: header of labels, then one row per sample.
    pub fn write_sample_table(&mut self, table: &SampleTable) -> io::Result<()> {
        writeln!(self.inner, "{}", table.labels().join(" "))?;
        for (time, values) in table.rows() {
            write!(self.inner, "{}", time)?;
            for value in values {
                write!(self.inner, " {}", value)?;
            }
            writeln!(self.inner)?;
            self.records_written += 1;
        }
        Ok(())
    }

    /// Write run lengths, one per line.
    pub fn write_run_lengths(&mut self, lengths: &[usize]) -> io::Result<()> {
        for length in lengths {
            writeln!(self.inner, "{}", length)?;
        }
        self.records_written += lengths.len();
        Ok(())
    }

    /// Write sample values, one per line.
    pub fn write_values(&mut self, values: &[u8]) -> io::Result<()> {
        for value in values {
            writeln!(self.inner, "{}", value)?;
        }
        self.records_written += values.len();
        Ok(())
    }

    /// Write time values, one per line.
    pub fn write_intervals(&mut self, intervals: &[f64]) -> io::Result<()> {
        for interval in intervals {
            writeln!(self.inner, "{}", interval)?;
        }
        self.records_written += intervals.len();
        Ok(())
    }

    /// Rows written so far, headers excluded
    pub fn records_written(&self) -> usize {
        self.records_written
    }

    /// Flush the sink.
    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    /// Flush and return the sink.
    pub fn into_inner(mut self) -> io::Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}
