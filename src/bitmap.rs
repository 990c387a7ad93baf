//! Storage for the outcome of every individual cut on one candidate

use crate::cuts::{Cut, NUM_CUTS};
use std::fmt::{self, Display};
use strum::IntoEnumIterator;

/// Pass/fail outcome of each cut, indexed by bit number
///
/// Every bit only reflects the outcome of its own cut. The bitmap is
/// recomputed from scratch for each candidate.
///
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct DecisionBitmap([bool; NUM_CUTS]);
//
impl DecisionBitmap {
    /// Bitmap in which every cut failed
    pub fn all_failed() -> Self {
        Self([false; NUM_CUTS])
    }

    /// Bitmap in which every cut passed
    pub fn all_passed() -> Self {
        Self([true; NUM_CUTS])
    }

    /// Record the outcome of one cut
    pub fn set(&mut self, cut: Cut, passed: bool) {
        self.0[cut.index()] = passed;
    }

    /// Outcome of one cut
    pub fn test(&self, cut: Cut) -> bool {
        self.0[cut.index()]
    }

    /// Iterate over the outcomes of all cuts, in bit order
    pub fn iter(&self) -> impl Iterator<Item = (Cut, bool)> + '_ {
        Cut::iter().zip(self.0.iter().copied())
    }

    /// Bit numbers of the cuts that failed, in increasing order
    pub fn failed_bits(&self) -> impl Iterator<Item = usize> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(bit, &passed)| (!passed).then_some(bit))
    }

    /// Combined decision: the candidate is accepted if all cuts passed
    pub fn passes(&self) -> bool {
        self.0.iter().all(|&passed| passed)
    }
}

impl Display for DecisionBitmap {
    /// Display as a string of 0s and 1s, bit 0 first
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &passed in self.0.iter() {
            write!(fmt, "{}", passed as u8)?;
        }
        Ok(())
    }
}
