//! Power-of-two helpers used to size the network.

/// Returns the smallest power of two that is strictly greater than the given size.
#[inline]
pub const fn get_strictly_bigger_power_of_two(size: usize) -> usize {
  let mut n = 1;
  while n <= size {
    n *= 2;
  }
  n
}

/// Physical length of a sequence holding `logical_length` real values.
///
/// This is the smallest power of two `>= logical_length`, except that a single value is padded
/// to two slots: the network needs at least one pair to compare.
/// # Panics
/// * If `logical_length == 0`.
#[inline]
pub const fn padded_length_for(logical_length: usize) -> usize {
  assert!(logical_length > 0, "a padded sequence needs at least one value");
  let n = get_strictly_bigger_power_of_two(logical_length - 1);
  if n < 2 {
    2
  } else {
    n
  }
}

/// `log2(n)` for an exact power of two.
/// # Panics
/// * If `n` is not a power of two.
#[inline]
pub const fn log2_exact(n: usize) -> u32 {
  assert!(n.is_power_of_two(), "length must be a power of two");
  n.trailing_zeros()
}
