//! Human-readable scan reports.
//!
//! A [`ScanReport`] pairs the parameters of one simulation with its
//! [`RunStatistics`]. `Display` gives plain text; with the `colorized_output`
//! feature, [`ScanReport::format_colored`] styles it for a terminal.

use std::fmt;

#[cfg(feature = "colorized_output")]
use console::style;

use crate::statistics::RunStatistics;

/// Statistics of one simulation with the parameters that produced it
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Report heading, e.g. `Pair 94/66`
    pub title: String,
    /// Ordered `(name, value)` parameter lines
    pub parameters: Vec<(String, String)>,
    /// Statistics of the analysed wave
    pub stats: RunStatistics,
    /// Threshold the peak counts were taken with
    pub adjacency_break: u32,
}

impl ScanReport {
    /// Create a report with no parameter lines.
    pub fn new(title: impl Into<String>, stats: RunStatistics, adjacency_break: u32) -> Self {
        Self {
            title: title.into(),
            parameters: Vec::new(),
            stats,
            adjacency_break,
        }
    }

    /// Append a parameter line.
    pub fn parameter(mut self, name: impl Into<String>, value: impl fmt::Display) -> Self {
        self.parameters.push((name.into(), value.to_string()));
        self
    }

    /// True when no run fell below the adjacency break
    pub fn is_clean(&self) -> bool {
        self.stats.peaks == 0
    }

    fn shortest_runs(&self) -> String {
        let index = |i: Option<usize>| i.map_or_else(|| "-".to_string(), |i| i.to_string());
        format!(
            "{} at {}, {} at {}",
            self.stats.min_run,
            index(self.stats.min_index),
            self.stats.second_min_run,
            index(self.stats.second_min_index)
        )
    }

    fn verdict(&self) -> String {
        if self.is_clean() {
            format!("No runs shorter than {} samples", self.adjacency_break)
        } else {
            format!(
                "{} runs shorter than {} samples",
                self.stats.peaks, self.adjacency_break
            )
        }
    }

    /// Format the report with colors (requires console feature)
    pub fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            use console::Emoji;

            static OK: Emoji<'_, '_> = Emoji("✓", "[OK]");
            static WARN: Emoji<'_, '_> = Emoji("⚠", "[WARN]");

            let stats = &self.stats;
            let mut output = String::new();

            output.push_str(&format!("{}\n", style(&self.title).bold().cyan()));
            output.push_str(&format!("{}\n", style("=".repeat(self.title.len())).cyan()));
            for (name, value) in &self.parameters {
                output.push_str(&format!("{}: {}\n", style(name).bold(), value));
            }
            output.push('\n');

            output.push_str(&format!(
                "{}: {} ({} inclusive, {} indeterminate)\n",
                style("Peaks").bold(),
                stats.peaks,
                stats.inclusive_peaks,
                stats.indeterminate_peaks
            ));
            output.push_str(&format!("{}: {}\n", style("Switches").bold(), stats.switches));
            output.push_str(&format!(
                "{}: {} samples ({}%)\n",
                style("On-time").bold(),
                stats.on_time,
                stats.normalized_on_time
            ));
            output.push_str(&format!(
                "{}: {}\n\n",
                style("Shortest runs").bold(),
                self.shortest_runs()
            ));

            if self.is_clean() {
                output.push_str(&format!("[{}] {}\n", OK, style(self.verdict()).green().bold()));
            } else {
                output.push_str(&format!("[{}] {}\n", WARN, style(self.verdict()).yellow().bold()));
            }

            output
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            format!("{}", self)
        }
    }
}

impl fmt::Display for ScanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = &self.stats;
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", "=".repeat(self.title.len()))?;
        for (name, value) in &self.parameters {
            writeln!(f, "{}: {}", name, value)?;
        }
        writeln!(f)?;

        writeln!(
            f,
            "Peaks: {} ({} inclusive, {} indeterminate)",
            stats.peaks, stats.inclusive_peaks, stats.indeterminate_peaks
        )?;
        writeln!(f, "Switches: {}", stats.switches)?;
        writeln!(
            f,
            "On-time: {} samples ({}%)",
            stats.on_time, stats.normalized_on_time
        )?;
        writeln!(f, "Shortest runs: {}", self.shortest_runs())?;
        writeln!(f)?;

        let symbol = if self.is_clean() { "✓" } else { "⚠" };
        writeln!(f, "[{}] {}", symbol, self.verdict())
    }
}
