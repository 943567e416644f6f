//! Multicore CPU backend built on a rayon thread pool.
use bitonet_primitives::direction::Direction;
use bitonet_primitives::rule::should_swap;
use bitonet_primitives::schedule::Stage;
use bitonet_primitives::traits::SortElement;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, trace};

use crate::error::{BackendError, BackendResult};
use crate::traits::ComputeBackend;

/// Default number of compare-exchange pairs a single rayon task handles.
pub const DEFAULT_MIN_PAIRS_PER_TASK: usize = crate::DEFAULT_WORK_GROUP_SIZE;

/// Configuration of the [`CpuBackend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuBackendConfig {
  /// Number of worker threads. `None` lets rayon pick (one per logical core).
  pub threads: Option<usize>,
  /// Lower bound on the pairs processed by one task, to keep tiny stages from oversplitting.
  pub min_pairs_per_task: usize,
}

impl Default for CpuBackendConfig {
  fn default() -> Self {
    Self { threads: None, min_pairs_per_task: DEFAULT_MIN_PAIRS_PER_TASK }
  }
}

/// Runs network stages on a dedicated rayon pool.
///
/// A stage with compare distance `d` splits the buffer into blocks of `2d` slots. Every pair of
/// the stage lives entirely inside one block (lower half against upper half), so blocks are
/// handed to the pool as disjoint mutable chunks. The parallel iterator joins before
/// `run_stage` returns, which is the stage barrier.
#[derive(Debug)]
pub struct CpuBackend<T: SortElement> {
  pool: ThreadPool,
  min_pairs_per_task: usize,
  buffer: Option<Vec<T>>,
  name: String,
}

impl<T: SortElement> CpuBackend<T> {
  /// Creates a backend with its own thread pool.
  pub fn new(config: CpuBackendConfig) -> BackendResult<Self> {
    if config.min_pairs_per_task == 0 {
      return Err(BackendError::InvalidConfig("min_pairs_per_task must be positive".into()));
    }
    let mut builder = ThreadPoolBuilder::new().thread_name(|i| format!("bitonet-lane-{i}"));
    if let Some(threads) = config.threads {
      if threads == 0 {
        return Err(BackendError::InvalidConfig("thread count must be positive".into()));
      }
      builder = builder.num_threads(threads);
    }
    let pool = builder.build().map_err(|e| BackendError::Unavailable(e.to_string()))?;
    let name = format!("cpu ({} lanes)", pool.current_num_threads());
    debug!(backend = %name, "created rayon pool");
    Ok(Self { pool, min_pairs_per_task: config.min_pairs_per_task, buffer: None, name })
  }

  /// Number of worker threads in the pool.
  pub fn lanes(&self) -> usize {
    self.pool.current_num_threads()
  }
}

impl<T: SortElement> ComputeBackend<T> for CpuBackend<T> {
  fn name(&self) -> &str {
    &self.name
  }

  fn allocate(&mut self, padded_length: usize) -> BackendResult<()> {
    assert!(
      padded_length >= 2 && padded_length.is_power_of_two(),
      "bitonic network requires a power of two length of at least 2, got {padded_length}"
    );
    debug!(padded_length, element = T::TYPE_NAME, "allocating host working buffer");
    self.buffer = Some(vec![T::zeroed(); padded_length]);
    Ok(())
  }

  fn upload(&mut self, data: &[T]) -> BackendResult<()> {
    let buffer = self.buffer.as_mut().ok_or(BackendError::NotAllocated)?;
    if buffer.len() != data.len() {
      return Err(BackendError::LengthMismatch { expected: buffer.len(), actual: data.len() });
    }
    buffer.copy_from_slice(data);
    Ok(())
  }

  fn run_stage(&mut self, stage: Stage, direction: Direction) -> BackendResult<()> {
    let data = self.buffer.as_mut().ok_or(BackendError::NotAllocated)?;
    assert!(
      stage.partition_size <= data.len(),
      "stage {stage} does not fit a sequence of {} elements",
      data.len()
    );

    let distance = stage.compare_distance;
    let block = 2 * distance;
    let min_blocks = (self.min_pairs_per_task / distance).max(1);
    self.pool.install(|| {
      data.par_chunks_mut(block).with_min_len(min_blocks).enumerate().for_each(|(b, chunk)| {
        let base = b * block;
        let (lower, upper) = chunk.split_at_mut(distance);
        for (offset, (lo, hi)) in lower.iter_mut().zip(upper.iter_mut()).enumerate() {
          if should_swap(base + offset, stage, direction, lo, hi) {
            std::mem::swap(lo, hi);
          }
        }
      });
    });
    trace!(%stage, %direction, "cpu stage committed");
    Ok(())
  }

  fn download(&mut self) -> BackendResult<Vec<T>> {
    self.buffer.clone().ok_or(BackendError::NotAllocated)
  }
}
