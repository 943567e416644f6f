//! The verification pipeline: one random sequence sorted by every executor and cross-checked.
//!
//! Each executor gets its own deep copy of the input. The serial and parallel executors share one
//! schedule. The reference sort is the ground truth and both network results are compared against
//! it with [`check_equivalence`].
use std::fmt;
use std::time::{Duration, Instant};

use bitonet_backend::traits::ComputeBackend;
use bitonet_primitives::direction::Direction;
use bitonet_primitives::schedule::NetworkSchedule;
use bitonet_primitives::traits::SortElement;
use tracing::info;

use crate::config::RunConfig;
use crate::error::{Error, Result};
use crate::oracle::{check_equivalence, oracle_sort};
use crate::parallel::run_parallel;
use crate::sequence::PaddedSequence;
use crate::serial::run_serial;

/// Timings and shape of a successful verification run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationReport {
  /// Number of real values sorted.
  pub logical_length: usize,
  /// Number of slots, padding included.
  pub padded_length: usize,
  /// Number of stages in the network.
  pub stages: usize,
  /// Direction of the sort.
  pub direction: Direction,
  /// Name of the backend the parallel executor ran on.
  pub backend: String,
  /// Seed the input was generated from, if it was generated.
  pub seed: Option<u64>,
  /// Time spent in the serial executor.
  pub serial: Duration,
  /// Time spent in the parallel executor, transfers included.
  pub parallel: Duration,
  /// Time spent in the reference sort.
  pub oracle: Duration,
}

impl fmt::Display for VerificationReport {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(
      f,
      "sorted {} values ({} padded, {} stages) {}",
      self.logical_length, self.padded_length, self.stages, self.direction
    )?;
    if let Some(seed) = self.seed {
      writeln!(f, "seed: {seed}")?;
    }
    writeln!(f, "serial:   {:>10.3} ms", as_millis(self.serial))?;
    writeln!(f, "parallel: {:>10.3} ms ({})", as_millis(self.parallel), self.backend)?;
    writeln!(f, "oracle:   {:>10.3} ms", as_millis(self.oracle))?;
    write!(f, "all three sorts agree")
  }
}

fn as_millis(d: Duration) -> f64 {
  d.as_secs_f64() * 1e3
}

/// Outcome of a successful run: the report and the agreed sorted sequence.
#[derive(Debug, Clone)]
pub struct Verification<T: SortElement> {
  /// Shape and timings of the run.
  pub report: VerificationReport,
  /// The sorted sequence every executor produced.
  pub sorted: PaddedSequence<T>,
}

/// Sorts copies of `original` with the serial, parallel and reference executors and checks that
/// the network results match the reference byte for byte.
///
/// `original` itself is left untouched.
pub fn verify_sequence<T, B>(
  original: &PaddedSequence<T>,
  direction: Direction,
  backend: &mut B,
) -> Result<Verification<T>>
where
  T: SortElement,
  B: ComputeBackend<T> + ?Sized,
{
  let schedule = NetworkSchedule::new(original.padded_length());
  info!(
    element = T::TYPE_NAME,
    logical_length = original.logical_length(),
    padded_length = schedule.padded_length(),
    levels = schedule.levels(),
    stages = schedule.len(),
    %direction,
    "starting verification"
  );

  let mut serial = original.clone();
  info!("serial sort started");
  let start = Instant::now();
  let swaps = run_serial(&mut serial, &schedule, direction);
  let serial_time = start.elapsed();
  info!(elapsed = ?serial_time, swaps, "serial sort finished");

  let mut parallel = original.clone();
  info!(backend = backend.name(), "parallel sort started");
  let start = Instant::now();
  run_parallel(&mut parallel, &schedule, direction, backend)?;
  let parallel_time = start.elapsed();
  info!(elapsed = ?parallel_time, "parallel sort finished");

  let mut oracle = original.clone();
  info!("reference sort started");
  let start = Instant::now();
  oracle_sort(&mut oracle, direction);
  let oracle_time = start.elapsed();
  info!(elapsed = ?oracle_time, "reference sort finished");

  check_equivalence(&oracle, &serial)
    .map_err(|source| Error::Mismatch { executor: "serial", source })?;
  check_equivalence(&oracle, &parallel)
    .map_err(|source| Error::Mismatch { executor: "parallel", source })?;
  info!("all three sorts agree");

  let report = VerificationReport {
    logical_length: original.logical_length(),
    padded_length: schedule.padded_length(),
    stages: schedule.len(),
    direction,
    backend: backend.name().to_owned(),
    seed: None,
    serial: serial_time,
    parallel: parallel_time,
    oracle: oracle_time,
  };
  Ok(Verification { report, sorted: oracle })
}

/// Generates the sequence described by `config` and runs [`verify_sequence`] on it.
pub fn verify<T, B>(config: &RunConfig, backend: &mut B) -> Result<Verification<T>>
where
  T: SortElement,
  B: ComputeBackend<T> + ?Sized,
{
  config.validate()?;
  let seed = config.resolve_seed();
  let original = PaddedSequence::<T>::random(config.length, &mut RunConfig::rng(seed));
  let mut verification = verify_sequence(&original, config.direction, backend)?;
  verification.report.seed = Some(seed);
  Ok(verification)
}
