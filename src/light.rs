use std::{
  sync::{
    atomic::{AtomicBool, AtomicU8, Ordering},
    Arc,
  },
  thread::{self, JoinHandle},
  time::Instant,
};

use ampel_utils::thread::BlockingQueue;
use log::{debug, trace};
use rand::Rng;

use crate::{config::LightConfig, error::LightError, phase::Phase};

/// A signal that toggles between red and green on a randomized cadence and
/// publishes every change to a handoff queue.
pub struct TrafficLight {
  config: LightConfig,
  phase: Arc<AtomicU8>,
  queue: BlockingQueue<Phase>,
  running: Arc<AtomicBool>,
  worker: Option<JoinHandle<()>>,
}

impl TrafficLight {
  pub fn new(config: LightConfig) -> Self {
    Self {
      config,
      phase: Arc::new(AtomicU8::new(Phase::Red as u8)),
      queue: BlockingQueue::new(),
      running: Arc::new(AtomicBool::new(false)),
      worker: None,
    }
  }

  /// Spawns the toggle loop on its own thread and returns immediately.
  /// Fails if the loop is already running.
  pub fn start(&mut self) -> Result<(), LightError> {
    if self.worker.is_some() {
      return Err(LightError::AlreadyRunning);
    }

    debug!("Starting Toggle Loop");
    self.running.store(true, Ordering::Relaxed);

    let config = self.config.clone();
    let phase = Arc::clone(&self.phase);
    let queue = self.queue.clone();
    let running = Arc::clone(&self.running);

    self.worker = Some(thread::spawn(move || {
      toggle_loop(config, phase, queue, running);
    }));

    Ok(())
  }

  /// The most recently stored phase. May lag an in-flight change; the queue
  /// is the authoritative signal for transitions.
  pub fn current_phase(&self) -> Phase {
    Phase::from_u8(self.phase.load(Ordering::Relaxed))
  }

  /// Blocks until the next phase change is published and returns it.
  pub fn next_change(&self) -> Phase {
    self.queue.pop()
  }

  /// Blocks until a change to `target` is observed, discarding other changes.
  pub fn wait_for_phase(&self, target: Phase) {
    loop {
      if self.next_change() == target {
        return;
      }
    }
  }

  /// Signals the toggle loop to stop and joins it. Idempotent. Callers that
  /// never stop let the loop run until the process exits; the light also
  /// stops itself on drop.
  pub fn stop(&mut self) {
    self.running.store(false, Ordering::Relaxed);
    if let Some(worker) = self.worker.take() {
      debug!("Shutting down Toggle Loop");
      worker.join().expect("Failed to join toggle loop");
    }
  }
}

impl Default for TrafficLight {
  fn default() -> Self {
    Self::new(LightConfig::default())
  }
}

impl Drop for TrafficLight {
  fn drop(&mut self) {
    self.stop();
  }
}

fn toggle_loop(
  config: LightConfig,
  phase: Arc<AtomicU8>,
  queue: BlockingQueue<Phase>,
  running: Arc<AtomicBool>,
) {
  // One sample, reused for every cycle.
  let cycle = rand::thread_rng().gen_range(config.cycle_min..=config.cycle_max);
  debug!("Cycle duration {:?}", cycle);

  let mut current = Phase::from_u8(phase.load(Ordering::Relaxed));
  let mut last_toggle = Instant::now();

  while running.load(Ordering::Relaxed) {
    if last_toggle.elapsed() >= cycle {
      current = current.toggled();
      phase.store(current as u8, Ordering::Relaxed);
      queue.push(current);
      debug!("Phase changed to {}", current);
      last_toggle = Instant::now();
    }

    thread::sleep(config.poll_interval);
  }

  trace!("Toggle Loop exited");
}
