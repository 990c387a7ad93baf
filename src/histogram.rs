//! Minimal fixed-binning histograms, in the spirit of HBOOK/ROOT ones
//!
//! Bin numbering follows the usual convention: bin 0 is the underflow, bins
//! 1..=num_bins cover the axis range, and bin num_bins + 1 is the overflow.

use crate::numeric::Float;
use num_traits::Zero;

/// Uniform binning of an axis
#[derive(Clone, Debug, PartialEq)]
pub struct Axis {
    num_bins: usize,
    low: Float,
    high: Float,
}
//
impl Axis {
    /// Define an axis with `num_bins` bins evenly spanning [low, high[
    pub fn new(num_bins: usize, low: Float, high: Float) -> Self {
        assert!(num_bins > 0, "An axis must have at least one bin");
        assert!(low < high, "Axis bounds must be ordered");
        Self {
            num_bins,
            low,
            high,
        }
    }

    /// Number of bins, excluding underflow and overflow
    pub fn num_bins(&self) -> usize {
        self.num_bins
    }

    /// Bin in which a value falls, including underflow and overflow bins
    pub fn find_bin(&self, x: Float) -> usize {
        if x < self.low {
            0
        } else if x >= self.high {
            self.num_bins + 1
        } else {
            let rel = (x - self.low) / (self.high - self.low);
            let bin = (rel * (self.num_bins as Float)).floor() as usize + 1;
            // Guard against rounding errors near the upper edge
            bin.min(self.num_bins)
        }
    }

    /// Center of a bin
    pub fn bin_center(&self, bin: usize) -> Float {
        let width = (self.high - self.low) / (self.num_bins as Float);
        self.low + width * ((bin as Float) - 0.5)
    }
}

/// One-dimensional histogram
#[derive(Clone, Debug, PartialEq)]
pub struct Histogram1D {
    name: String,
    axis: Axis,
    contents: Vec<Float>,
    entries: u64,
}
//
impl Histogram1D {
    /// Book an empty histogram
    pub fn new(name: impl Into<String>, num_bins: usize, low: Float, high: Float) -> Self {
        let axis = Axis::new(num_bins, low, high);
        Self {
            name: name.into(),
            contents: vec![Float::zero(); num_bins + 2],
            axis,
            entries: 0,
        }
    }

    /// Name of the histogram
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Binning of the histogram
    pub fn axis(&self) -> &Axis {
        &self.axis
    }

    /// Record one value with unit weight
    pub fn fill(&mut self, x: Float) {
        self.fill_weighted(x, 1.);
    }

    /// Record one value with some weight
    pub fn fill_weighted(&mut self, x: Float, weight: Float) {
        let bin = self.axis.find_bin(x);
        self.contents[bin] += weight;
        self.entries += 1;
    }

    /// Content of a bin (0 is underflow, num_bins + 1 is overflow)
    pub fn bin_content(&self, bin: usize) -> Float {
        self.contents[bin]
    }

    /// Number of fill operations, including under- and overflows
    pub fn entries(&self) -> u64 {
        self.entries
    }

    /// Sum of the in-range bin contents
    pub fn integral(&self) -> Float {
        self.contents[1..=self.axis.num_bins].iter().sum()
    }

    /// Mean of the in-range values, approximated by bin centers
    pub fn mean(&self) -> Option<Float> {
        let integral = self.integral();
        if integral == 0. {
            return None;
        }
        let sum = (1..=self.axis.num_bins)
            .map(|bin| self.contents[bin] * self.axis.bin_center(bin))
            .sum::<Float>();
        Some(sum / integral)
    }

    /// Add the contents of another histogram with the same binning
    pub fn merge(&mut self, other: &Self) {
        assert_eq!(self.axis, other.axis, "Can only merge identical binnings");
        for (dst, src) in self.contents.iter_mut().zip(other.contents.iter()) {
            *dst += *src;
        }
        self.entries += other.entries;
    }

    /// Reset all bins
    pub fn reset(&mut self) {
        self.contents.iter_mut().for_each(|c| *c = Float::zero());
        self.entries = 0;
    }
}

/// Two-dimensional histogram
#[derive(Clone, Debug, PartialEq)]
pub struct Histogram2D {
    name: String,
    x_axis: Axis,
    y_axis: Axis,
    // Row-major, rows are x bins including under/overflow
    contents: Vec<Float>,
    entries: u64,
}
//
impl Histogram2D {
    /// Book an empty histogram
    pub fn new(name: impl Into<String>, x_axis: Axis, y_axis: Axis) -> Self {
        let size = (x_axis.num_bins() + 2) * (y_axis.num_bins() + 2);
        Self {
            name: name.into(),
            x_axis,
            y_axis,
            contents: vec![Float::zero(); size],
            entries: 0,
        }
    }

    /// Name of the histogram
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Binning of the x axis
    pub fn x_axis(&self) -> &Axis {
        &self.x_axis
    }

    /// Binning of the y axis
    pub fn y_axis(&self) -> &Axis {
        &self.y_axis
    }

    fn linear_index(&self, x_bin: usize, y_bin: usize) -> usize {
        x_bin * (self.y_axis.num_bins() + 2) + y_bin
    }

    /// Record one value pair with unit weight
    pub fn fill(&mut self, x: Float, y: Float) {
        let idx = self.linear_index(self.x_axis.find_bin(x), self.y_axis.find_bin(y));
        self.contents[idx] += 1.;
        self.entries += 1;
    }

    /// Content of a bin
    pub fn bin_content(&self, x_bin: usize, y_bin: usize) -> Float {
        self.contents[self.linear_index(x_bin, y_bin)]
    }

    /// Number of fill operations
    pub fn entries(&self) -> u64 {
        self.entries
    }

    /// Add the contents of another histogram with the same binning
    pub fn merge(&mut self, other: &Self) {
        assert_eq!(self.x_axis, other.x_axis, "Can only merge identical binnings");
        assert_eq!(self.y_axis, other.y_axis, "Can only merge identical binnings");
        for (dst, src) in self.contents.iter_mut().zip(other.contents.iter()) {
            *dst += *src;
        }
        self.entries += other.entries;
    }
}
