//! Stage schedule of the bitonic network.
//!
//! A network over `2^k` slots runs `k` levels. Level `p` (for `p = 2, 4, ..., 2^k`) turns pairs of
//! opposite-direction sorted runs of length `p / 2` into sorted runs of length `p`; it does so by
//! sweeping the compare distance from `p / 2` down to `1`. Each `(partition_size, compare_distance)`
//! pair is one stage, so there are `k(k+1)/2` stages in total.
//!
//! The order is load-bearing. Levels must run with doubling partition sizes and, within a level,
//! distances must halve. Any other order produces unsorted output.
use std::fmt;

use crate::utils::log2_exact;

/// One full pass of compare-exchanges at a fixed partition size and compare distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Stage {
  /// Length of the monotonic runs being merged in this level.
  pub partition_size: usize,
  /// Index offset between the two slots of a compared pair.
  pub compare_distance: usize,
}

impl Stage {
  /// Creates a stage.
  /// # Panics
  /// * If either parameter is not a power of two, or `compare_distance >= partition_size`.
  pub const fn new(partition_size: usize, compare_distance: usize) -> Self {
    assert!(partition_size.is_power_of_two() && partition_size >= 2);
    assert!(compare_distance.is_power_of_two() && compare_distance < partition_size);
    Self { partition_size, compare_distance }
  }

  /// Returns true if this stage starts a new level.
  #[inline]
  pub const fn opens_level(&self) -> bool {
    self.compare_distance * 2 == self.partition_size
  }
}

impl fmt::Display for Stage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "(partition={}, distance={})", self.partition_size, self.compare_distance)
  }
}

/// Number of stages in a network over `padded_length` slots.
/// # Panics
/// * If `padded_length` is not a power of two.
#[inline]
pub const fn stage_count(padded_length: usize) -> usize {
  let k = log2_exact(padded_length) as usize;
  k * (k + 1) / 2
}

/// The ordered list of stages for one padded length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkSchedule {
  padded_length: usize,
  stages: Vec<Stage>,
}

impl NetworkSchedule {
  /// Builds the schedule for a sequence of `padded_length` slots.
  /// # Panics
  /// * If `padded_length` is not a power of two of at least 2.
  pub fn new(padded_length: usize) -> Self {
    assert!(
      padded_length >= 2 && padded_length.is_power_of_two(),
      "bitonic network requires a power of two length of at least 2, got {padded_length}"
    );

    let mut stages = Vec::with_capacity(stage_count(padded_length));
    let mut partition_size = 2;
    while partition_size <= padded_length {
      let mut compare_distance = partition_size / 2;
      while compare_distance > 0 {
        stages.push(Stage { partition_size, compare_distance });
        compare_distance /= 2;
      }
      partition_size *= 2;
    }

    Self { padded_length, stages }
  }

  /// Length of the sequences this schedule sorts.
  #[inline]
  pub const fn padded_length(&self) -> usize {
    self.padded_length
  }

  /// Number of levels, `log2(padded_length)`.
  #[inline]
  pub const fn levels(&self) -> u32 {
    log2_exact(self.padded_length)
  }

  /// Number of stages.
  #[inline]
  pub fn len(&self) -> usize {
    self.stages.len()
  }

  /// The stages in execution order.
  #[inline]
  pub fn stages(&self) -> &[Stage] {
    &self.stages
  }

  /// Iterates over the stages in execution order.
  pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, Stage>> {
    self.stages.iter().copied()
  }
}

impl<'a> IntoIterator for &'a NetworkSchedule {
  type Item = Stage;
  type IntoIter = std::iter::Copied<std::slice::Iter<'a, Stage>>;

  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_stage_count() {
    assert_eq!(stage_count(2), 1);
    assert_eq!(stage_count(4), 3);
    assert_eq!(stage_count(8), 6);
    assert_eq!(stage_count(1 << 20), 210);
    for k in 1..16 {
      assert_eq!(NetworkSchedule::new(1 << k).len(), k * (k + 1) / 2);
    }
  }

  #[test]
  fn test_schedule_order() {
    let schedule = NetworkSchedule::new(8);
    let got: Vec<(usize, usize)> =
      schedule.iter().map(|s| (s.partition_size, s.compare_distance)).collect();
    assert_eq!(got, vec![(2, 1), (4, 2), (4, 1), (8, 4), (8, 2), (8, 1)]);
    assert_eq!(schedule.levels(), 3);
  }

  #[test]
  fn test_single_pair_schedule() {
    let schedule = NetworkSchedule::new(2);
    assert_eq!(schedule.stages(), &[Stage::new(2, 1)]);
  }

  #[test]
  fn test_levels_are_contiguous_and_halving() {
    let schedule = NetworkSchedule::new(1 << 10);
    let mut previous: Option<Stage> = None;
    for stage in &schedule {
      if let Some(prev) = previous {
        if stage.opens_level() {
          assert_eq!(prev.compare_distance, 1);
          assert_eq!(stage.partition_size, prev.partition_size * 2);
        } else {
          assert_eq!(stage.partition_size, prev.partition_size);
          assert_eq!(stage.compare_distance * 2, prev.compare_distance);
        }
      } else {
        assert_eq!(stage, Stage::new(2, 1));
      }
      previous = Some(stage);
    }
  }

  #[test]
  #[should_panic(expected = "power of two")]
  fn test_rejects_non_power_of_two() {
    let _ = NetworkSchedule::new(6);
  }

  #[test]
  #[should_panic(expected = "at least 2")]
  fn test_rejects_single_slot() {
    let _ = NetworkSchedule::new(1);
  }
}
