use std::fmt;

/// The two mutually exclusive states of the signal.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
  Red = 0,
  Green = 1,
}

impl Phase {
  pub fn toggled(self) -> Self {
    match self {
      Phase::Red => Phase::Green,
      Phase::Green => Phase::Red,
    }
  }

  pub(crate) fn from_u8(value: u8) -> Self {
    match value {
      0 => Phase::Red,
      _ => Phase::Green,
    }
  }
}

impl fmt::Display for Phase {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Phase::Red => write!(f, "red"),
      Phase::Green => write!(f, "green"),
    }
  }
}
