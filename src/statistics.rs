//! Cumulative statistics of individual cut failures

use crate::{bitmap::DecisionBitmap, cuts::NUM_CUTS};
use nalgebra::{SMatrix, SVector};

/// Per-cut failure counts
pub type FailureCounts = SVector<u64, NUM_CUTS>;

/// Pairwise failure correlation counts (upper triangle, diagonal included)
pub type CorrelationCounts = SMatrix<u64, NUM_CUTS, NUM_CUTS>;

/// Cut statistics, accumulated across all candidates seen by a set of cuts
///
/// Bins are numbered from 1 like in the QA histograms: the cut with bit
/// number `i` lands in bin `i + 1`.
///
#[derive(Clone, Debug, PartialEq)]
pub struct CutStatistics {
    /// Number of times each cut failed
    failures: FailureCounts,

    /// Number of times each pair of cuts (i <= j) failed on the same candidate
    correlation: CorrelationCounts,
}

impl Default for CutStatistics {
    fn default() -> Self {
        Self {
            failures: FailureCounts::zeros(),
            correlation: CorrelationCounts::zeros(),
        }
    }
}

impl CutStatistics {
    /// Prepare to accumulate statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for the decision bitmap of one candidate
    pub fn record(&mut self, bitmap: &DecisionBitmap) {
        for bit in bitmap.failed_bits() {
            self.failures[bit] += 1;
            for bit2 in bitmap.failed_bits().filter(|&bit2| bit2 >= bit) {
                self.correlation[(bit, bit2)] += 1;
            }
        }
    }

    /// Number of failures recorded in some (1-based) bin
    pub fn failures(&self, bin: usize) -> u64 {
        assert!((1..=NUM_CUTS).contains(&bin), "Bin {bin} is out of range");
        self.failures[bin - 1]
    }

    /// Number of joint failures recorded in some pair of (1-based) bins
    ///
    /// Only the upper triangle (bin_x <= bin_y) is ever filled.
    ///
    pub fn correlation(&self, bin_x: usize, bin_y: usize) -> u64 {
        assert!((1..=NUM_CUTS).contains(&bin_x), "Bin {bin_x} is out of range");
        assert!((1..=NUM_CUTS).contains(&bin_y), "Bin {bin_y} is out of range");
        self.correlation[(bin_x - 1, bin_y - 1)]
    }

    /// Raw per-cut failure counts, indexed by bit number
    pub fn failure_counts(&self) -> &FailureCounts {
        &self.failures
    }

    /// Raw correlation counts, indexed by bit numbers
    pub fn correlation_counts(&self) -> &CorrelationCounts {
        &self.correlation
    }

    /// Integrate the statistics of another set of cuts
    pub fn merge(&mut self, other: &Self) {
        self.failures += other.failures;
        self.correlation += other.correlation;
    }

    /// Forget everything that was accumulated so far
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cuts::Cut;

    #[test]
    fn two_failures() {
        let mut bitmap = DecisionBitmap::all_passed();
        bitmap.set(Cut::Charge, false);
        bitmap.set(Cut::DecayLengthMax, false);

        let mut stats = CutStatistics::new();
        stats.record(&bitmap);

        let (b1, b2) = (Cut::Charge.bin(), Cut::DecayLengthMax.bin());
        assert_eq!(stats.failures(b1), 1);
        assert_eq!(stats.failures(b2), 1);
        assert_eq!(stats.correlation(b1, b1), 1);
        assert_eq!(stats.correlation(b2, b2), 1);
        assert_eq!(stats.correlation(b1, b2), 1);
        assert_eq!(stats.correlation(b2, b1), 0);
        assert_eq!(stats.failure_counts().sum(), 2);
        assert_eq!(stats.correlation_counts().sum(), 3);
    }

    #[test]
    fn diagonal_matches_failures() {
        let mut stats = CutStatistics::new();
        let mut bitmap = DecisionBitmap::all_failed();
        stats.record(&bitmap);
        bitmap.set(Cut::PdgCode, true);
        stats.record(&bitmap);
        stats.record(&DecisionBitmap::all_passed());
        for bin in 1..=NUM_CUTS {
            assert_eq!(stats.correlation(bin, bin), stats.failures(bin));
        }
        assert_eq!(stats.failures(Cut::PdgCode.bin()), 1);
        assert_eq!(stats.failures(Cut::Charge.bin()), 2);
    }

    #[test]
    fn merge_and_reset() {
        let mut bitmap = DecisionBitmap::all_passed();
        bitmap.set(Cut::ProdVtxZMax, false);
        let mut s1 = CutStatistics::new();
        s1.record(&bitmap);
        let mut s2 = s1.clone();
        s2.record(&bitmap);
        s1.merge(&s2);
        assert_eq!(s1.failures(Cut::ProdVtxZMax.bin()), 3);
        s1.reset();
        assert_eq!(s1, CutStatistics::new());
    }
}
