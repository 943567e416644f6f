//! Execution of the network on a data-parallel backend.
//!
//! The executor owns only the stage dispatch: it moves the sequence into the backend once, hands
//! the backend one `(stage, direction)` at a time in schedule order and reads the result back once.
//! Per-index work and the barrier between stages are the backend's job, see
//! [`ComputeBackend`].
use bitonet_backend::error::{BackendError, BackendResult};
use bitonet_backend::traits::ComputeBackend;
use bitonet_primitives::direction::Direction;
use bitonet_primitives::schedule::NetworkSchedule;
use bitonet_primitives::traits::SortElement;
use tracing::{debug, trace};

use crate::sequence::PaddedSequence;

/// Sorts `seq` in `direction` on `backend`, running every stage of `schedule` in order.
/// # Panics
/// * If `schedule` was built for a different length than `seq`.
pub fn run_parallel<T, B>(
  seq: &mut PaddedSequence<T>,
  schedule: &NetworkSchedule,
  direction: Direction,
  backend: &mut B,
) -> BackendResult<()>
where
  T: SortElement,
  B: ComputeBackend<T> + ?Sized,
{
  let n = seq.padded_length();
  assert_eq!(n, schedule.padded_length(), "schedule does not match the sequence length");

  backend.allocate(n)?;
  backend.upload(seq.contents())?;
  debug!(backend = backend.name(), padded_length = n, "uploaded sequence");

  for stage in schedule {
    backend.run_stage(stage, direction)?;
    trace!(%stage, "parallel stage dispatched");
  }

  let sorted = backend.download()?;
  if sorted.len() != n {
    return Err(BackendError::LengthMismatch { expected: n, actual: sorted.len() });
  }
  seq.contents_mut().copy_from_slice(&sorted);
  seq.settle(direction);
  Ok(())
}

/// Sorts `seq` in `direction` on `backend`, deriving the schedule from its length.
pub fn parallel_bitonic_sort<T, B>(
  seq: &mut PaddedSequence<T>,
  direction: Direction,
  backend: &mut B,
) -> BackendResult<()>
where
  T: SortElement,
  B: ComputeBackend<T> + ?Sized,
{
  let schedule = NetworkSchedule::new(seq.padded_length());
  run_parallel(seq, &schedule, direction, backend)
}
