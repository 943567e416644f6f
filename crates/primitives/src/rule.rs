//! The compare-exchange rule shared by every executor.
//!
//! Within a stage, index `i` is paired with `i ^ compare_distance`. Only the lower index of a pair
//! acts, so no slot is touched twice in one stage and every pair is independent of the others.
//! The bit `i & partition_size` tells which half of a bitonic block `i` sits in: the half that
//! runs in the requested direction moves the larger value up, the other half moves it down.
//!
//! At the last level (`partition_size == padded_length`) that bit is zero for every index, so only
//! the first branch is ever taken and the stage is a plain merge of the whole sequence.
use crate::direction::Direction;
use crate::schedule::Stage;
use crate::traits::SortElement;

/// Index compared against `index` in `stage`.
#[inline]
pub const fn partner_index(index: usize, stage: Stage) -> usize {
  index ^ stage.compare_distance
}

/// Returns true if `index` lies in the half of its block that is ordered in `direction`.
#[inline]
pub const fn in_leading_half(index: usize, stage: Stage, direction: Direction) -> bool {
  ((index & stage.partition_size) == 0) != direction.is_descending()
}

/// Decides whether the values at `index` and its partner must be exchanged.
///
/// `at_index` and `at_partner` are the current values of the two slots. Returns false whenever the
/// partner is not above `index`.
#[inline]
pub fn should_swap<T: SortElement>(
  index: usize,
  stage: Stage,
  direction: Direction,
  at_index: &T,
  at_partner: &T,
) -> bool {
  if partner_index(index, stage) <= index {
    return false;
  }
  let greater = at_index.is_greater(at_partner);
  if in_leading_half(index, stage, direction) {
    greater
  } else {
    !greater
  }
}

/// Applies the rule to slot `index` of `arr` in place. Returns true if the pair was exchanged.
/// # Panics
/// * If the partner of `index` is out of bounds.
#[inline]
pub fn compare_exchange<T: SortElement>(
  arr: &mut [T],
  index: usize,
  stage: Stage,
  direction: Direction,
) -> bool {
  let partner = partner_index(index, stage);
  if partner <= index {
    return false;
  }
  let swap = should_swap(index, stage, direction, &arr[index], &arr[partner]);
  if swap {
    arr.swap(index, partner);
  }
  swap
}
