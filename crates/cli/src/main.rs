//! `bitonet`: sorts one random sequence with the serial network, the parallel network and the
//! standard library, prints how long each took and fails when they disagree.
mod cli;

use anyhow::{Context, Result};
use bitonet_backend::cpu::{CpuBackend, CpuBackendConfig};
use bitonet_backend::error::BackendError;
use bitonet_backend::traits::ComputeBackend;
use bitonet_primitives::traits::SortElement;
use clap::Parser;
use cli::{BackendArg, Cli, ElementType};
use tracing::info;

fn main() {
  let cli = Cli::parse();
  tracing_subscriber::fmt().with_writer(std::io::stderr).with_max_level(cli.log_level()).init();

  if let Err(err) = dispatch(&cli) {
    eprintln!("error: {err:#}");
    std::process::exit(1);
  }
}

/// Calls `run::<T>` with the element type selected on the command line.
macro_rules! with_element_type {
  ($ty:expr, $run:ident, $($arg:expr),*) => {
    match $ty {
      ElementType::I8 => $run::<i8>($($arg),*),
      ElementType::I16 => $run::<i16>($($arg),*),
      ElementType::I32 => $run::<i32>($($arg),*),
      ElementType::I64 => $run::<i64>($($arg),*),
      ElementType::U8 => $run::<u8>($($arg),*),
      ElementType::U16 => $run::<u16>($($arg),*),
      ElementType::U32 => $run::<u32>($($arg),*),
      ElementType::U64 => $run::<u64>($($arg),*),
      ElementType::F32 => $run::<f32>($($arg),*),
      ElementType::F64 => $run::<f64>($($arg),*),
    }
  };
}

fn dispatch(cli: &Cli) -> Result<()> {
  with_element_type!(cli.element_type, run, cli)
}

fn run<T: SortElement>(cli: &Cli) -> Result<()> {
  let config = cli.run_config();
  let mut backend = build_backend::<T>(cli).context("failed to set up the compute backend")?;
  info!(element = T::TYPE_NAME, backend = backend.name(), length = config.length, "bitonet run");

  let verification = bitonet_sort::verify::<T, _>(&config, &mut backend)
    .with_context(|| format!("{} sort of {} values failed", T::TYPE_NAME, config.length))?;

  println!("{}", verification.report);
  if cli.print {
    println!("{}", verification.sorted);
  }
  Ok(())
}

fn build_backend<T: SortElement>(cli: &Cli) -> Result<Box<dyn ComputeBackend<T>>, BackendError> {
  match cli.backend {
    BackendArg::Cpu => {
      let config = CpuBackendConfig {
        threads: cli.threads.map(usize::from),
        min_pairs_per_task: cli.min_pairs_per_task,
      };
      Ok(Box::new(CpuBackend::<T>::new(config)?))
    }
    BackendArg::Opencl => build_opencl_backend::<T>(cli),
  }
}

#[cfg(feature = "opencl")]
fn build_opencl_backend<T: SortElement>(
  cli: &Cli,
) -> Result<Box<dyn ComputeBackend<T>>, BackendError> {
  use bitonet_backend::opencl::{OpenClBackend, OpenClConfig};

  let config = OpenClConfig {
    prefer_gpu: !cli.prefer_cpu_device,
    work_group_size: cli.work_group_size,
    kernel_path: cli.kernel.clone(),
  };
  Ok(Box::new(OpenClBackend::<T>::new(&config)?))
}

#[cfg(not(feature = "opencl"))]
fn build_opencl_backend<T: SortElement>(
  _cli: &Cli,
) -> Result<Box<dyn ComputeBackend<T>>, BackendError> {
  Err(BackendError::Unavailable("bitonet was built without the `opencl` feature".into()))
}
