//! Run configuration.
use bitonet_primitives::direction::Direction;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::warn;

use crate::error::{Error, Result};

/// Number of values sorted when no length is given. Full-scale runs pass `-n 100000000`.
pub const DEFAULT_LENGTH: usize = 1 << 20;

/// Parameters of one verification run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
  /// Number of real values to generate.
  pub length: usize,
  /// Direction every executor sorts in.
  pub direction: Direction,
  /// Seed for value generation. `None` draws a fresh seed from the OS.
  pub seed: Option<u64>,
}

impl Default for RunConfig {
  fn default() -> Self {
    Self { length: DEFAULT_LENGTH, direction: Direction::Descending, seed: None }
  }
}

impl RunConfig {
  /// Checks that the configuration describes a runnable sort.
  pub fn validate(&self) -> Result<()> {
    if self.length == 0 {
      return Err(Error::InvalidConfig("length must be at least 1".into()));
    }
    if self.length > usize::MAX / 2 + 1 {
      return Err(Error::InvalidConfig(format!("length {} cannot be padded", self.length)));
    }
    Ok(())
  }

  /// The seed this run uses, drawing and logging a fresh one when none was configured.
  pub fn resolve_seed(&self) -> u64 {
    self.seed.unwrap_or_else(|| {
      let seed = rand::random::<u64>();
      warn!(seed, "no seed configured, pass it back to replay this run");
      seed
    })
  }

  /// Random source for value generation, seeded with `seed`.
  pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::Rng;

  #[test]
  fn test_defaults() {
    let config = RunConfig::default();
    assert_eq!(config.length, 1 << 20);
    assert_eq!(config.direction, Direction::Descending);
    assert!(config.validate().is_ok());
  }

  #[test]
  fn test_full_scale_length_is_valid() {
    let config = RunConfig { length: 100_000_000, ..Default::default() };
    assert!(config.validate().is_ok());
    assert!(DEFAULT_LENGTH < config.length);
  }

  #[test]
  fn test_rejects_empty_length() {
    let config = RunConfig { length: 0, ..Default::default() };
    assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
  }

  #[test]
  fn test_fixed_seed_is_reproducible() {
    let config = RunConfig { seed: Some(99), ..Default::default() };
    assert_eq!(config.resolve_seed(), 99);
    let a: u64 = RunConfig::rng(99).random();
    let b: u64 = RunConfig::rng(99).random();
    assert_eq!(a, b);
  }
}
