//! Errors of a verification run.
use bitonet_backend::error::BackendError;
use bitonet_primitives::direction::PadSide;
use thiserror::Error;

/// Disagreement between a sorted sequence and the reference result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Mismatch {
  /// The sequences hold a different number of real values.
  #[error("logical length differs: expected {expected}, found {actual}")]
  LogicalLength {
    /// Reference value.
    expected: usize,
    /// Checked value.
    actual: usize,
  },
  /// The sequences have a different number of slots.
  #[error("padded length differs: expected {expected}, found {actual}")]
  PaddedLength {
    /// Reference value.
    expected: usize,
    /// Checked value.
    actual: usize,
  },
  /// The padding sits at different ends.
  #[error("padding side differs: expected {expected}, found {actual}")]
  PadSide {
    /// Reference value.
    expected: PadSide,
    /// Checked value.
    actual: PadSide,
  },
  /// A slot holds a different value.
  #[error("element {index} differs: expected {expected}, found {actual}")]
  Element {
    /// First differing slot.
    index: usize,
    /// Reference value, formatted.
    expected: String,
    /// Checked value, formatted.
    actual: String,
  },
}

/// Failure of a verification run.
#[derive(Debug, Error)]
pub enum Error {
  /// The run configuration is unusable.
  #[error("invalid configuration: {0}")]
  InvalidConfig(String),
  /// The compute backend failed.
  #[error(transparent)]
  Backend(#[from] BackendError),
  /// An executor disagreed with the reference sort.
  #[error("{executor} result disagrees with the reference sort: {source}")]
  Mismatch {
    /// Name of the executor whose output was checked.
    executor: &'static str,
    /// What differed.
    source: Mismatch,
  },
}

/// Result alias for verification runs.
pub type Result<T> = std::result::Result<T, Error>;
