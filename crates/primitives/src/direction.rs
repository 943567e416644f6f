//! Sort direction and padding placement.
use std::fmt;

/// Direction of the final sorted order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
  /// Smallest value first.
  #[default]
  Ascending,
  /// Largest value first.
  Descending,
}

/// Which end of a padded sequence holds the sentinel slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PadSide {
  /// Padding occupies the first slots.
  Head,
  /// Padding occupies the last slots.
  #[default]
  Tail,
}

impl Direction {
  /// Returns true for `Descending`.
  #[inline]
  pub const fn is_descending(self) -> bool {
    matches!(self, Self::Descending)
  }

  /// The side the sentinels settle at once a sequence is sorted in this direction.
  /// Sentinels are maximal, so they end up last when ascending and first when descending.
  #[inline]
  pub const fn pad_side(self) -> PadSide {
    match self {
      Self::Ascending => PadSide::Tail,
      Self::Descending => PadSide::Head,
    }
  }
}

impl fmt::Display for Direction {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Ascending => f.write_str("ascending"),
      Self::Descending => f.write_str("descending"),
    }
  }
}

impl fmt::Display for PadSide {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Head => f.write_str("head"),
      Self::Tail => f.write_str("tail"),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_pad_side_follows_direction() {
    assert_eq!(Direction::Ascending.pad_side(), PadSide::Tail);
    assert_eq!(Direction::Descending.pad_side(), PadSide::Head);
    assert!(Direction::Descending.is_descending());
  }
}
