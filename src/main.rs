//! Toy analysis which applies generation-level cuts to Monte-Carlo events
//!
//! Events are generated by a toy Monte-Carlo generator, and every particle of
//! every event is submitted to a configurable set of cuts. The cut statistics,
//! QA histograms and kinematics of the accepted particles are then written
//! out to the standard output and to disk.

#![warn(missing_docs)]

use eyre::WrapErr;
use gen_cuts::{
    config::Configuration, evgen::EventGenerator, output, random::RandomGenerator, scheduling,
    task::GenParticleTask,
};
use log::info;
use std::time::Instant;

/// We'll use eyre's type-erased result type throughout the application
type Result<T> = eyre::Result<T>;

/// This will act as our main function, with suitable error handling
fn main() -> Result<()> {
    // Logging is configured through the RUST_LOG environment variable
    env_logger::init();

    // ### CONFIGURATION READOUT ###

    let cfg = Configuration::load("valeurs").wrap_err("Failed to load the configuration")?;

    // ### SIMULATION INITIALIZATION ###

    // NOTE: We start the clock after configuration I/O, to avoid IO-induced
    //       timing fluctuations
    let saved_time = Instant::now();

    // Initialize the event generator
    let evgen = EventGenerator::new(cfg.primaries_per_event);

    // ### EVENT LOOP ###

    // This kernel generates a number of events, given an initial random number
    // generator state, applies the cuts to all of their particles, and returns
    // the accumulated intermediary results
    let process_events = |num_events: usize, rng: &mut RandomGenerator| -> GenParticleTask {
        let mut task = GenParticleTask::new(&cfg.name, cfg.cuts.clone(), cfg.qa_enabled);
        for _ in 0..num_events {
            let event = evgen.generate(rng);
            task.process_event(&event);
        }
        task
    };

    // Run the event loop
    info!("Processing {} events", cfg.num_events);
    let results = scheduling::run_event_loop(cfg.num_events, cfg.seed, process_events);
    info!(
        "{} out of {} candidates passed the cuts",
        results.num_accepted, results.num_candidates
    );

    // ### RESULTS DISPLAY AND STORAGE ###

    // Measure how much time has elapsed
    let elapsed_time = saved_time.elapsed();

    // Send the results to the standard output and to disk and we're done
    output::dump_results(&cfg, &results, elapsed_time).wrap_err("Failed to output the results")?;

    // ...and we're done
    Ok(())
}
