use serde::Serialize;

/// Summary of a set of contig lengths
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct LengthStats {
    pub total: usize,
    pub total_length: usize,
    pub avg_length: f64,
    pub longest: usize,
    pub n50: usize,
}

/// N50 of a set of contig lengths.
///
/// Walks the lengths longest-first and returns the first one at which the
/// running sum reaches half of the total. The half is compared exactly, so an
/// odd total is not floored. Empty input gives 0.
pub fn n50(lengths: &[usize]) -> usize {
    if lengths.is_empty() {
        return 0;
    }

    let mut sorted = lengths.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));

    // acc >= total / 2  <=>  2 * acc >= total, without going through floats
    let total: u128 = sorted.iter().map(|&l| l as u128).sum();
    let mut acc: u128 = 0;
    sorted
        .iter()
        .find(|&&len| {
            acc += len as u128;
            acc * 2 >= total
        })
        .copied()
        .unwrap_or(0)
}

pub fn evaluate_lengths(lengths: &[usize]) -> LengthStats {
    let total_length: usize = lengths.iter().sum();
    let avg = if lengths.is_empty() {
        0.0
    } else {
        total_length as f64 / lengths.len() as f64
    };

    LengthStats {
        total: lengths.len(),
        total_length,
        avg_length: avg,
        longest: lengths.iter().copied().max().unwrap_or(0),
        n50: n50(lengths),
    }
}
