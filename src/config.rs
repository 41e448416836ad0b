use std::time::Duration;

/// Timing parameters of the toggle loop. The cycle duration is sampled once
/// per start from the inclusive `[cycle_min, cycle_max]` range.
#[derive(Clone)]
pub struct LightConfig {
  pub cycle_min: Duration,
  pub cycle_max: Duration,
  pub poll_interval: Duration,
}

impl Default for LightConfig {
  fn default() -> Self {
    Self {
      cycle_min: Duration::from_secs(4),
      cycle_max: Duration::from_secs(6),
      poll_interval: Duration::from_millis(1),
    }
  }
}
