use crate::waveform::Waveform;

/// Column-oriented dump of several waves on one time grid, for plotting.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleTable {
    labels: Vec<String>,
    timings: Vec<f64>,
    series: Vec<Vec<u8>>,
}

impl SampleTable {
    /// Build a table from a time column label and one `(label, wave)` per column.
    ///
    /// Timestamps come from the first wave. Rows stop at the shortest wave.
    pub fn from_waves(time_label: &str, columns: &[(&str, &Waveform)]) -> Self {
        let rows = columns.iter().map(|(_, w)| w.len()).min().unwrap_or(0);
        let timings = columns
            .first()
            .map(|(_, w)| w.samples().take(rows).map(|(time, _)| time).collect())
            .unwrap_or_default();

        let mut labels = Vec::with_capacity(columns.len() + 1);
        labels.push(time_label.to_string());
        labels.extend(columns.iter().map(|(label, _)| label.to_string()));

        let series = columns
            .iter()
            .map(|(_, w)| w.values()[..rows].to_vec())
            .collect();

        Self {
            labels,
            timings,
            series,
        }
    }

    /// Column labels, time column first
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.timings.len()
    }

    /// True if the table has no rows
    pub fn is_empty(&self) -> bool {
        self.timings.is_empty()
    }

    /// Row `index` as `(timestamp, values)`.
    pub fn row(&self, index: usize) -> Option<(f64, Vec<u8>)> {
        let time = *self.timings.get(index)?;
        Some((time, self.series.iter().map(|s| s[index]).collect()))
    }

    /// Iterate over rows.
    pub fn rows(&self) -> impl Iterator<Item = (f64, Vec<u8>)> + '_ {
        (0..self.len()).filter_map(move |i| self.row(i))
    }
}
