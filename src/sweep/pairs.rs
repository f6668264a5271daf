use crate::scan::MassPair;

/// Every integer pair `lower <= i <= j <= upper` with `j - i <= window`, ordered
/// by `i` then `j`.
pub fn mass_pairs(lower: u32, upper: u32, window: u32) -> Vec<MassPair> {
    let mut pairs = Vec::new();
    for i in lower..=upper {
        let last = upper.min(i.saturating_add(window));
        for j in i..=last {
            pairs.push(MassPair::new(f64::from(i), f64::from(j)));
        }
    }
    pairs
}
