use thiserror::Error;

#[derive(Error, Debug)]
pub enum LightError {
  #[error("Toggle loop already running")]
  AlreadyRunning,
}
