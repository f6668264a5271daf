/// A maximal stretch of equal samples closed by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    /// Sample value of the run, 0 or 1
    pub value: u8,
    /// Number of samples in the run
    pub length: usize,
    /// Index of the run's last sample
    pub last_index: usize,
    /// True for the run that starts at index 0
    pub leading: bool,
}

impl Run {
    /// True for a Hi run.
    #[inline]
    pub fn is_hi(&self) -> bool {
        self.value == 1
    }

    /// Index of the run's first sample.
    #[inline]
    pub fn first_index(&self) -> usize {
        self.last_index + 1 - self.length
    }
}

/// Iterator over the closed runs of a bit sequence, in order.
///
/// The final run is still open at the end of the sequence and is not yielded.
#[derive(Debug, Clone)]
pub struct RunScanner<'a> {
    bits: &'a [u8],
    pos: usize,
}

impl<'a> RunScanner<'a> {
    /// Scan `bits` from the start.
    pub fn new(bits: &'a [u8]) -> Self {
        Self { bits, pos: 0 }
    }
}

impl Iterator for RunScanner<'_> {
    type Item = Run;

    fn next(&mut self) -> Option<Run> {
        let start = self.pos;
        let value = *self.bits.get(start)?;
        match self.bits[start..].iter().position(|&v| v != value) {
            Some(offset) => {
                self.pos = start + offset;
                Some(Run {
                    value,
                    length: offset,
                    last_index: start + offset - 1,
                    leading: start == 0,
                })
            }
            None => {
                self.pos = self.bits.len();
                None
            }
        }
    }
}

/// True when the last two samples differ.
pub fn trailing_edge(bits: &[u8]) -> bool {
    match bits {
        [.., a, b] => a != b,
        _ => false,
    }
}
