//! This module takes care of scheduling the event loop, encapsulating use of
//! multiple threads and anything else that will come in the future

#[cfg(feature = "multi-threading")]
mod multi_threading;
#[cfg(not(feature = "multi-threading"))]
mod sequential;

use crate::{
    random::RandomGenerator,
    task::{GenParticleTask, TaskResults},
};

/// Size of the processed event batches
///
/// Events are grouped in batches of a certain size, each of which gets its
/// own random number stream and its own task instance. This achieves perfect
/// reproducibility between sequential and parallel runs.
///
const EVENT_BATCH_SIZE: usize = 1_000;

/// Run the event loop in the manner that was configured at build time.
///
/// Takes as parameters the total number of events to be processed, the seed
/// of the random number streams, and a kernel that generates and processes a
/// certain number of events given a random number generator.
///
/// Returns the finalized task results
///
pub fn run_event_loop(
    num_events: usize,
    seed: u32,
    process_events: impl Send + Sync + Fn(usize, &mut RandomGenerator) -> GenParticleTask,
) -> TaskResults {
    // Check that the user is being reasonable (should have already been checked
    // at configuration time, but bugs can happen...)
    assert!(num_events > 0, "Must process at least one event");

    // Process and merge the event batches...
    let task = {
        // ...in sequential mode
        #[cfg(not(feature = "multi-threading"))]
        {
            sequential::run_event_loop_impl(num_events, seed, process_events)
        }

        // ...in multi-threaded mode
        #[cfg(feature = "multi-threading")]
        {
            multi_threading::run_event_loop_impl(num_events, seed, process_events)
        }
    };

    // Finalize the results
    task.finalize()
}

/// Sizes of the event batches, in processing order
fn batch_sizes(num_events: usize) -> impl Iterator<Item = usize> {
    let num_full_batches = num_events / EVENT_BATCH_SIZE;
    let remainder = num_events % EVENT_BATCH_SIZE;
    std::iter::repeat(EVENT_BATCH_SIZE)
        .take(num_full_batches)
        .chain((remainder > 0).then_some(remainder))
}
