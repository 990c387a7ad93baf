//! Generation-level particle cuts, with QA bookkeeping
//!
//!
//! # Introduction (for the physicist)
//!
//! When studying the efficiency of a reconstruction chain, one needs to
//! select the Monte-Carlo particles that the reconstruction could, in
//! principle, have found: charged or neutral ones, physical primaries or
//! secondaries, a given species, produced or decaying within some volume...
//!
//! This crate applies such a set of cuts to the generated particles of a
//! Monte-Carlo truth record, and keeps track of how often each cut fails,
//! how often pairs of cuts fail together, and of the outcome of each cut
//! before and after the combined decision.
//!
//!
//! # Introduction (for the computer guy)
//!
//! A `ParticleGenCuts` evaluates 19 independent boolean predicates on a
//! candidate, in a fixed order. The outcomes are stored in a decision bitmap,
//! which is reduced to an accept/reject decision by a logical AND, and fed to
//! the failure statistics and QA histograms.
//!
//! Every instance owns its statistics and histograms. Event loops which run
//! in parallel use one instance each, and merge them at the end.
//!
//! A small toy Monte-Carlo generator and an analysis task are provided in
//! order to drive the cuts from the companion binary.

#![warn(missing_docs)]

pub mod bitmap;
pub mod candidate;
pub mod config;
pub mod cuts;
pub mod error;
pub mod evgen;
pub mod gencuts;
pub mod histogram;
pub mod momentum;
pub mod numeric;
pub mod output;
pub mod qa;
pub mod random;
pub mod scheduling;
pub mod selection;
pub mod statistics;
pub mod task;
pub mod vertex;

pub use crate::{
    bitmap::DecisionBitmap,
    candidate::{Candidate, CandidateKind, McEvent, McParticle, RecoTrack},
    cuts::{Cut, CutConfiguration, NUM_CUTS},
    error::CutError,
    gencuts::ParticleGenCuts,
    qa::{QaHistograms, QaStep},
    statistics::CutStatistics,
};
