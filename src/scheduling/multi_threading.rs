//! Multi-threaded back-end of the event loop

use crate::{
    random::RandomGenerator,
    scheduling::batch_sizes,
    task::GenParticleTask,
};
use std::sync::Mutex;

/// Process events in multi-threaded mode
///
/// Every batch is processed by its own task, with its own random number
/// stream, and the tasks are merged in batch order at the end so that the
/// results do not depend on thread scheduling.
///
pub fn run_event_loop_impl(
    num_events: usize,
    seed: u32,
    process_events: impl Send + Sync + Fn(usize, &mut RandomGenerator) -> GenParticleTask,
) -> GenParticleTask {
    // Some double-checking cannot hurt...
    assert!(num_events > 0, "Must process at least one event");

    // We know in advance how many batches of events we will process
    let sizes = batch_sizes(num_events).collect::<Vec<_>>();
    let accumulator = ReproducibleAccumulator::new(sizes.len());

    // This function is a synchronization scope: it will only return
    // once all inner tasks have been executed
    rayon::scope(|scope| {
        for (batch_id, batch_size) in sizes.into_iter().enumerate() {
            let accumulator_ref = &accumulator;
            let process_events_ref = &process_events;
            scope.spawn(move |_| {
                let mut rng = RandomGenerator::for_batch(seed, batch_id);
                let result = process_events_ref(batch_size, &mut rng);
                accumulator_ref.set_task_result(batch_id, result);
            });
        }
    });

    // Extract the results from the accumulator
    accumulator.get_merged_result()
}

/// Reproducibility-optimized results accumulation mechanism
struct ReproducibleAccumulator {
    /// Storage for the intermediary results of parallel tasks
    results: Box<[Mutex<Option<GenParticleTask>>]>,
}
//
impl ReproducibleAccumulator {
    /// Set up results storage for N parallel tasks
    fn new(num_tasks: usize) -> Self {
        assert!(num_tasks > 0, "There should be at least one task");
        Self {
            results: (0..num_tasks)
                .map(|_| Mutex::new(None))
                .collect::<Vec<_>>()
                .into_boxed_slice(),
        }
    }

    /// Integrate the results of the n-th task
    fn set_task_result(&self, task_id: usize, result: GenParticleTask) {
        let mut lock = self.results[task_id]
            .lock()
            .expect("Mutex data should be valid");
        assert!(lock.is_none(), "Tasks should not report results twice");
        *lock = Some(result);
    }

    /// Aggregate the results in a reproducible fashion
    fn get_merged_result(self) -> GenParticleTask {
        // Start iterating over the task results
        let mut results_iter = self.results.into_vec().into_iter().map(|entry| {
            entry
                .into_inner()
                .expect("Mutex data should be valid")
                .expect("Result should be ready")
        });

        // Initialize results storage with the result of the first task
        let first_result = results_iter
            .next()
            .expect("There should be at least one task");

        // Merge the results of the other tasks
        results_iter.fold(first_result, |mut r1, r2| {
            r1.merge(r2);
            r1
        })
    }
}
