//! Errors reported by compute backends.
use thiserror::Error;

/// Failure of a compute backend.
///
/// None of these are retried by the network; retry policy belongs to the caller.
#[derive(Debug, Error)]
pub enum BackendError {
  /// The backend could not be brought up: no device, no thread pool, or the kernel did not build.
  #[error("backend unavailable: {0}")]
  Unavailable(String),
  /// The backend configuration is unusable.
  #[error("invalid backend configuration: {0}")]
  InvalidConfig(String),
  /// A stage or transfer was requested before `allocate`.
  #[error("backend memory has not been allocated")]
  NotAllocated,
  /// Uploaded or downloaded data does not match the allocated length.
  #[error("length mismatch: backend holds {expected} elements, got {actual}")]
  LengthMismatch {
    /// Allocated length.
    expected: usize,
    /// Length that was supplied or returned.
    actual: usize,
  },
  /// The requested length cannot be addressed by the backend.
  #[error("cannot allocate {requested} elements, backend limit is {limit}")]
  TooLarge {
    /// Requested length.
    requested: usize,
    /// Largest supported length.
    limit: usize,
  },
  /// A transfer or kernel launch failed after the backend was set up.
  #[error("kernel execution failed: {0}")]
  Kernel(String),
}

/// Result alias for backend operations.
pub type BackendResult<T> = Result<T, BackendError>;
