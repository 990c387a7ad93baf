//! Failures which can occur while applying cuts to a candidate
//!
//! None of these is fatal: the candidate at hand is rejected, and the
//! statistics accumulated from previous candidates are left untouched.

use crate::candidate::{CandidateKind, Label};
use thiserror::Error;

/// Reason why a candidate could not be evaluated
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CutError {
    /// The candidate is not of the kind that these cuts apply to
    #[error("cuts apply to {expected}s, but got a {found}")]
    InvalidCandidateType {
        /// Kind of candidate which the cuts expect
        expected: CandidateKind,
        /// Kind of candidate which was submitted
        found: CandidateKind,
    },

    /// Some information that the cuts need could not be provided by the
    /// Monte-Carlo truth record
    #[error("MC event has no {what} for particle #{label}")]
    MissingCollaborator {
        /// Nature of the missing information
        what: &'static str,
        /// Label of the particle that was being looked up
        label: Label,
    },
}
