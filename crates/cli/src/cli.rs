//! Command line arguments.
use std::path::PathBuf;

use bitonet_backend::cpu::DEFAULT_MIN_PAIRS_PER_TASK;
use bitonet_backend::DEFAULT_WORK_GROUP_SIZE;
use bitonet_primitives::direction::Direction;
use bitonet_sort::config::DEFAULT_LENGTH;
use bitonet_sort::RunConfig;
use clap::{ArgAction, Parser, ValueEnum};

#[derive(Debug, Parser)]
#[command(
  name = "bitonet",
  about = "Sorts a random sequence with a bitonic network, serially and in parallel, and checks both against a reference sort",
  version
)]
pub(crate) struct Cli {
  /// Number of values to sort.
  #[arg(short = 'n', long, default_value_t = DEFAULT_LENGTH, value_parser = parse_length)]
  pub(crate) length: usize,

  /// Sort direction.
  #[arg(short, long, value_enum, default_value_t = DirectionArg::Desc)]
  pub(crate) direction: DirectionArg,

  /// Element type of the sequence.
  #[arg(short = 't', long = "element-type", value_enum, default_value_t = ElementType::F64)]
  pub(crate) element_type: ElementType,

  /// Seed for value generation. A random seed is drawn and logged when omitted.
  #[arg(long)]
  pub(crate) seed: Option<u64>,

  /// Backend the parallel executor runs on.
  #[arg(short, long, value_enum, default_value_t = BackendArg::Cpu)]
  pub(crate) backend: BackendArg,

  /// Worker threads of the cpu backend. Defaults to one per logical core.
  #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
  pub(crate) threads: Option<u16>,

  /// Minimum compare-exchange pairs per cpu task.
  #[arg(long, default_value_t = DEFAULT_MIN_PAIRS_PER_TASK)]
  pub(crate) min_pairs_per_task: usize,

  /// Work-items per work-group on the opencl backend.
  #[arg(long, default_value_t = DEFAULT_WORK_GROUP_SIZE)]
  pub(crate) work_group_size: usize,

  /// Use the first device of any type instead of preferring a GPU.
  #[arg(long)]
  pub(crate) prefer_cpu_device: bool,

  /// Load the stage kernel from this file instead of the built-in source.
  #[arg(long, value_name = "PATH")]
  pub(crate) kernel: Option<PathBuf>,

  /// Print the sorted values.
  #[arg(long)]
  pub(crate) print: bool,

  /// Increase log verbosity (-v info, -vv debug, -vvv trace).
  #[arg(short, long, action = ArgAction::Count)]
  pub(crate) verbose: u8,
}

impl Cli {
  /// The run configuration these arguments describe.
  pub(crate) fn run_config(&self) -> RunConfig {
    RunConfig { length: self.length, direction: self.direction.into(), seed: self.seed }
  }

  /// Maximum log level for the requested verbosity.
  pub(crate) fn log_level(&self) -> tracing::Level {
    match self.verbose {
      0 => tracing::Level::WARN,
      1 => tracing::Level::INFO,
      2 => tracing::Level::DEBUG,
      _ => tracing::Level::TRACE,
    }
  }
}

fn parse_length(s: &str) -> Result<usize, String> {
  let length: usize = s.parse().map_err(|e| format!("{e}"))?;
  if length == 0 {
    return Err("length must be at least 1".into());
  }
  Ok(length)
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub(crate) enum DirectionArg {
  Asc,
  Desc,
}

impl From<DirectionArg> for Direction {
  fn from(arg: DirectionArg) -> Self {
    match arg {
      DirectionArg::Asc => Direction::Ascending,
      DirectionArg::Desc => Direction::Descending,
    }
  }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub(crate) enum ElementType {
  I8,
  I16,
  I32,
  I64,
  U8,
  U16,
  U32,
  U64,
  F32,
  F64,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub(crate) enum BackendArg {
  Cpu,
  Opencl,
}
