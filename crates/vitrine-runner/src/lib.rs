//! Timer-driven stepping for the exhibits.
//!
//! Engines stay single-threaded. The runner owns one on a background thread
//! and hands post-step snapshots to a channel, so a consumer can watch the
//! simulation without ever touching live state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, info};
use vitrine_core::RunnerConfig;

/// An engine the runner can drive one step at a time
pub trait Exhibit {
    /// Cheap, cloneable view of the engine state after a step
    type Snapshot: Clone + Send + 'static;

    /// Advance exactly one unit of simulated time
    fn step(&mut self);

    /// View of the current state, taken between steps only
    fn snapshot(&self) -> Self::Snapshot;

    /// True once the engine has reached its own horizon
    fn finished(&self) -> bool {
        false
    }
}

/// Drives an exhibit on a background thread at a fixed cadence
pub struct Runner<E: Exhibit> {
    handle: JoinHandle<E>,
    stop: Arc<AtomicBool>,
}

impl<E> Runner<E>
where
    E: Exhibit + Send + 'static,
{
    /// Move the engine onto its own thread and start stepping. Returns the
    /// runner plus the snapshot channel; the channel closes when the engine
    /// finishes or the runner is stopped.
    pub fn spawn(engine: E, config: RunnerConfig) -> (Self, Receiver<E::Snapshot>) {
        let stop = Arc::new(AtomicBool::new(false));
        let (sender, receiver) = mpsc::channel();
        let flag = Arc::clone(&stop);

        let handle = thread::spawn(move || run_loop(engine, config, flag, sender));

        (Self { handle, stop }, receiver)
    }

    /// Ask the loop to halt and wait for it. An in-flight step completes
    /// before the engine is handed back.
    pub fn stop(self) -> E {
        self.stop.store(true, Ordering::Relaxed);
        match self.handle.join() {
            Ok(engine) => engine,
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }
}

fn run_loop<E: Exhibit>(
    mut engine: E,
    config: RunnerConfig,
    stop: Arc<AtomicBool>,
    snapshots: Sender<E::Snapshot>,
) -> E {
    let interval = Duration::from_millis(config.tick_interval_ms);
    let publish_every = config.publish_every.max(1);
    let mut steps: u64 = 0;

    info!(
        interval_ms = config.tick_interval_ms,
        publish_every, "runner started"
    );

    while !stop.load(Ordering::Relaxed) && !engine.finished() {
        engine.step();
        steps += 1;

        if steps % publish_every == 0 || engine.finished() {
            if snapshots.send(engine.snapshot()).is_err() {
                debug!(steps, "snapshot consumer went away, stopping");
                break;
            }
        }

        if !interval.is_zero() {
            thread::sleep(interval);
        }
    }

    debug!(steps, "runner loop ended");
    engine
}
