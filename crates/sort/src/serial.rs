//! Single-threaded, in-place execution of the network.
use bitonet_primitives::direction::Direction;
use bitonet_primitives::rule::compare_exchange;
use bitonet_primitives::schedule::{NetworkSchedule, Stage};
use bitonet_primitives::traits::SortElement;
use tracing::{debug, trace};

use crate::sequence::PaddedSequence;

/// Applies one stage to every index of `arr`. Returns the number of exchanges.
pub fn serial_stage<T: SortElement>(arr: &mut [T], stage: Stage, direction: Direction) -> usize {
  let mut swaps = 0;
  for i in 0..arr.len() {
    swaps += usize::from(compare_exchange(arr, i, stage, direction));
  }
  swaps
}

/// Sorts `seq` in `direction` by running every stage of `schedule` in order.
/// Returns the total number of exchanges performed.
/// # Panics
/// * If `schedule` was built for a different length than `seq`.
pub fn run_serial<T: SortElement>(
  seq: &mut PaddedSequence<T>,
  schedule: &NetworkSchedule,
  direction: Direction,
) -> usize {
  assert_eq!(
    seq.padded_length(),
    schedule.padded_length(),
    "schedule does not match the sequence length"
  );

  let mut swaps = 0;
  for stage in schedule {
    if stage.opens_level() {
      debug!(partition_size = stage.partition_size, "serial level");
    }
    let stage_swaps = serial_stage(seq.contents_mut(), stage, direction);
    trace!(%stage, swaps = stage_swaps, "serial stage");
    swaps += stage_swaps;
  }
  seq.settle(direction);
  swaps
}

/// Sorts `seq` in `direction`, deriving the schedule from its length.
pub fn serial_bitonic_sort<T: SortElement>(seq: &mut PaddedSequence<T>, direction: Direction) {
  let schedule = NetworkSchedule::new(seq.padded_length());
  run_serial(seq, &schedule, direction);
}
