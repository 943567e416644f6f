//! The contract between the network and a data-parallel backend.
use bitonet_primitives::direction::Direction;
use bitonet_primitives::schedule::Stage;
use bitonet_primitives::traits::SortElement;

use crate::error::BackendResult;

/// A data-parallel executor for single network stages.
///
/// The caller allocates once, uploads once, calls [`ComputeBackend::run_stage`] once per stage in
/// schedule order and downloads once. Inside a stage the backend may evaluate indices in any order
/// or all at once; the compare-exchange rule keeps pairs independent. Across stages the backend
/// must provide a full barrier: `run_stage` returns only after every write of that stage is
/// visible to the next one.
pub trait ComputeBackend<T: SortElement> {
  /// Short human readable name, used in logs and reports.
  fn name(&self) -> &str;

  /// Reserves working memory for `padded_length` elements. Calling it again replaces the buffer.
  fn allocate(&mut self, padded_length: usize) -> BackendResult<()>;

  /// Copies `data` into working memory. `data.len()` must equal the allocated length.
  fn upload(&mut self, data: &[T]) -> BackendResult<()>;

  /// Applies the compare-exchange rule at `stage` to every index of the working memory.
  fn run_stage(&mut self, stage: Stage, direction: Direction) -> BackendResult<()>;

  /// Copies working memory back to the host.
  fn download(&mut self) -> BackendResult<Vec<T>>;
}

impl<T: SortElement, B: ComputeBackend<T> + ?Sized> ComputeBackend<T> for Box<B> {
  fn name(&self) -> &str {
    (**self).name()
  }

  fn allocate(&mut self, padded_length: usize) -> BackendResult<()> {
    (**self).allocate(padded_length)
  }

  fn upload(&mut self, data: &[T]) -> BackendResult<()> {
    (**self).upload(data)
  }

  fn run_stage(&mut self, stage: Stage, direction: Direction) -> BackendResult<()> {
    (**self).run_stage(stage, direction)
  }

  fn download(&mut self) -> BackendResult<Vec<T>> {
    (**self).download()
  }
}
