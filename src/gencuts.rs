//! Generation-level cuts on Monte-Carlo particles, with QA bookkeeping

use crate::{
    bitmap::DecisionBitmap,
    candidate::{Candidate, McEvent},
    cuts::CutConfiguration,
    error::CutError,
    qa::{QaHistograms, QaStep},
    selection,
    statistics::CutStatistics,
};
use log::{error, trace};

/// Set of cuts on generated particles
///
/// Each instance accumulates its own statistics and QA histograms, and is
/// meant to be used by a single event loop. Parallel event loops should use
/// one instance each and `merge()` them at the end.
///
#[derive(Clone, Debug)]
pub struct ParticleGenCuts {
    /// Name of this set of cuts, used as a prefix for histogram names
    name: String,

    /// Cut configuration
    cfg: CutConfiguration,

    /// Whether statistics and QA histograms should be filled
    qa_enabled: bool,

    /// Outcome of the individual cuts on the last successfully evaluated
    /// candidate
    bitmap: DecisionBitmap,

    /// Cut failure statistics
    statistics: CutStatistics,

    /// Per-cut outcome histograms
    qa: QaHistograms,
}
//
impl ParticleGenCuts {
    // ### CONSTRUCTION & CONFIGURATION ###

    /// Set up a named set of cuts, with QA enabled
    pub fn new(name: impl Into<String>, cfg: CutConfiguration) -> Self {
        let name = name.into();
        let qa = QaHistograms::new(&name);
        Self {
            name,
            cfg,
            qa_enabled: true,
            bitmap: DecisionBitmap::all_failed(),
            statistics: CutStatistics::new(),
            qa,
        }
    }

    /// Name of this set of cuts
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cut configuration
    pub fn configuration(&self) -> &CutConfiguration {
        &self.cfg
    }

    /// Modify the cut configuration (between runs)
    pub fn configuration_mut(&mut self) -> &mut CutConfiguration {
        &mut self.cfg
    }

    /// Enable or disable filling of the statistics and QA histograms
    pub fn set_qa_enabled(&mut self, enabled: bool) {
        self.qa_enabled = enabled;
    }

    /// Truth that statistics and QA histograms are being filled
    pub fn qa_enabled(&self) -> bool {
        self.qa_enabled
    }

    // ### EVALUATION ###

    /// Decide whether a candidate passes all cuts
    ///
    /// A candidate which cannot be evaluated is logged and rejected, without
    /// affecting the statistics or QA histograms.
    ///
    pub fn evaluate(&mut self, candidate: Candidate<'_>, mc_event: &McEvent) -> bool {
        match self.try_evaluate(candidate, mc_event) {
            Ok(accepted) => accepted,
            Err(e) => {
                error!("{}: {}", self.name, e);
                false
            }
        }
    }

    /// Version of `evaluate()` which reports evaluation failures to the caller
    pub fn try_evaluate(
        &mut self,
        candidate: Candidate<'_>,
        mc_event: &McEvent,
    ) -> Result<bool, CutError> {
        // Compute the full bitmap before any bookkeeping, so that a failed
        // evaluation leaves no trace.
        let bitmap = selection::selection_bitmap(&self.cfg, candidate, mc_event)?;
        self.bitmap = bitmap;
        trace!("{}: bitmap {}", self.name, bitmap);

        if self.qa_enabled {
            self.qa.fill(QaStep::BeforeCuts, &bitmap);
            self.statistics.record(&bitmap);
        }

        let accepted = bitmap.passes();
        if accepted && self.qa_enabled {
            self.qa.fill(QaStep::AfterCuts, &bitmap);
        }
        Ok(accepted)
    }

    // ### RESULTS ###

    /// Outcome of the individual cuts on the last evaluated candidate
    pub fn bitmap(&self) -> &DecisionBitmap {
        &self.bitmap
    }

    /// Cut failure statistics
    pub fn statistics(&self) -> &CutStatistics {
        &self.statistics
    }

    /// Per-cut QA histograms
    pub fn qa_histograms(&self) -> &QaHistograms {
        &self.qa
    }

    /// Integrate the statistics and histograms of another set of cuts
    pub fn merge(&mut self, other: &Self) {
        debug_assert_eq!(self.cfg, other.cfg, "Merging differently configured cuts");
        self.statistics.merge(&other.statistics);
        self.qa.merge(&other.qa);
    }

    /// Forget all accumulated statistics and histograms
    pub fn reset(&mut self) {
        self.statistics.reset();
        self.qa.reset();
        self.bitmap = DecisionBitmap::all_failed();
    }
}
