//! Sequential back-end of the event loop

use crate::{
    random::RandomGenerator,
    scheduling::batch_sizes,
    task::GenParticleTask,
};

/// Process events in sequential mode
///
/// We use batched logic even in sequential mode, in order to achieve
/// reproducibility with respect to multi-threaded runs.
///
pub fn run_event_loop_impl(
    num_events: usize,
    seed: u32,
    process_events: impl Send + Sync + Fn(usize, &mut RandomGenerator) -> GenParticleTask,
) -> GenParticleTask {
    // Some double-checking cannot hurt...
    assert!(num_events > 0, "Must process at least one event");

    // Process the batches one after the other, merging results as we go
    let mut batches = batch_sizes(num_events).enumerate().map(|(batch_id, size)| {
        let mut rng = RandomGenerator::for_batch(seed, batch_id);
        process_events(size, &mut rng)
    });
    let first_batch = batches.next().expect("There should be at least one batch");
    batches.fold(first_batch, |mut acc, task| {
        acc.merge(task);
        acc
    })
}
