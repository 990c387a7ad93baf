//! Quality assurance histograms of the individual cut outcomes

use crate::{
    bitmap::DecisionBitmap,
    cuts::{Cut, NUM_CUTS},
    histogram::Histogram1D,
    numeric::Float,
};
use strum::IntoEnumIterator;

/// Stage of the selection at which QA histograms are filled
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum QaStep {
    /// Every candidate, before the combined decision
    BeforeCuts,
    /// Only candidates which passed all cuts
    AfterCuts,
}

/// Outcome (0 or 1) of each cut, before and after the combined decision
#[derive(Clone, Debug, PartialEq)]
pub struct QaHistograms {
    before: Vec<Histogram1D>,
    after: Vec<Histogram1D>,
}
//
impl QaHistograms {
    /// Book the QA histograms of a named set of cuts
    pub fn new(name: &str) -> Self {
        let book = |suffix: &str| {
            Cut::iter()
                .map(|cut| {
                    let hist_name = format!("{name}_{}{suffix}", cut.qa_stem());
                    Histogram1D::new(hist_name, 2, -0.5, 1.5)
                })
                .collect::<Vec<_>>()
        };
        Self {
            before: book(""),
            after: book("_cut"),
        }
    }

    /// Record the outcome of every cut at some step
    pub fn fill(&mut self, step: QaStep, bitmap: &DecisionBitmap) {
        let histograms = match step {
            QaStep::BeforeCuts => &mut self.before,
            QaStep::AfterCuts => &mut self.after,
        };
        for (histogram, (_cut, passed)) in histograms.iter_mut().zip(bitmap.iter()) {
            histogram.fill(passed as u8 as Float);
        }
    }

    /// QA histogram of one cut at some step
    pub fn histogram(&self, cut: Cut, step: QaStep) -> &Histogram1D {
        match step {
            QaStep::BeforeCuts => &self.before[cut.index()],
            QaStep::AfterCuts => &self.after[cut.index()],
        }
    }

    /// All (before, after) histogram pairs, in bit order
    pub fn pairs(&self) -> impl Iterator<Item = (Cut, &Histogram1D, &Histogram1D)> + '_ {
        Cut::iter()
            .zip(self.before.iter().zip(self.after.iter()))
            .map(|(cut, (before, after))| (cut, before, after))
    }

    /// Fraction of the candidates seen by a cut which made it through the
    /// full selection
    ///
    /// This is only a measure of the individual impact of the cut if the
    /// cuts are uncorrelated.
    ///
    pub fn efficiency(&self, cut: Cut) -> Option<Float> {
        let before = self.before[cut.index()].entries();
        let after = self.after[cut.index()].entries();
        (before > 0).then(|| after as Float / before as Float)
    }

    /// Integrate the QA histograms of another set of cuts
    pub fn merge(&mut self, other: &Self) {
        debug_assert_eq!(self.before.len(), NUM_CUTS);
        for (dst, src) in self.before.iter_mut().zip(other.before.iter()) {
            dst.merge(src);
        }
        for (dst, src) in self.after.iter_mut().zip(other.after.iter()) {
            dst.merge(src);
        }
    }

    /// Reset every histogram
    pub fn reset(&mut self) {
        self.before
            .iter_mut()
            .chain(self.after.iter_mut())
            .for_each(Histogram1D::reset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn naming() {
        let qa = QaHistograms::new("gen");
        assert_eq!(qa.histogram(Cut::Charge, QaStep::BeforeCuts).name(), "gen_charge");
        assert_eq!(
            qa.histogram(Cut::DecayRxyMax, QaStep::AfterCuts).name(),
            "gen_decRxyMax_cut"
        );
        assert_eq!(qa.pairs().count(), NUM_CUTS);
    }

    #[test]
    fn outcome_bins() {
        let mut qa = QaHistograms::new("gen");
        let mut bitmap = DecisionBitmap::all_passed();
        qa.fill(QaStep::BeforeCuts, &bitmap);
        qa.fill(QaStep::AfterCuts, &bitmap);
        bitmap.set(Cut::PrimSec, false);
        qa.fill(QaStep::BeforeCuts, &bitmap);

        let prim_sec = qa.histogram(Cut::PrimSec, QaStep::BeforeCuts);
        assert_eq!(prim_sec.bin_content(1), 1.);
        assert_eq!(prim_sec.bin_content(2), 1.);
        assert_eq!(qa.efficiency(Cut::PrimSec), Some(0.5));
        assert_eq!(qa.efficiency(Cut::Charge), Some(0.5));

        let mut merged = qa.clone();
        merged.merge(&qa);
        assert_eq!(merged.histogram(Cut::Charge, QaStep::AfterCuts).entries(), 2);

        merged.reset();
        assert_eq!(merged.efficiency(Cut::Charge), None);
    }
}
