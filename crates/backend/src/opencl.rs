//! OpenCL device backend.
//!
//! Only built with the `opencl` feature. The stage kernel lives in `kernels/bitonic_step.cl` and is
//! compiled once per element type with `-DELEMENT_TYPE=<type>`. Every stage is one launch over all
//! `padded_length` indices on an in-order queue; waiting on the launch event is the stage barrier.
//!
//! The kernel compares with `>` rather than a total order, which agrees with
//! [`SortElement::total_cmp`] for every value the network generates (no NaNs, no negative zero).
use std::path::PathBuf;
use std::ptr;

use bitonet_primitives::direction::Direction;
use bitonet_primitives::schedule::Stage;
use bitonet_primitives::traits::SortElement;
use opencl3::command_queue::CommandQueue;
use opencl3::context::Context;
use opencl3::device::{get_all_devices, Device, CL_DEVICE_TYPE_ALL, CL_DEVICE_TYPE_GPU};
use opencl3::kernel::{ExecuteKernel, Kernel};
use opencl3::memory::{Buffer, CL_MEM_READ_WRITE};
use opencl3::program::Program;
use opencl3::types::{cl_uint, CL_BLOCKING};
use tracing::{debug, info, trace};

use crate::error::{BackendError, BackendResult};
use crate::DEFAULT_WORK_GROUP_SIZE;
use crate::traits::ComputeBackend;

/// Stage kernel compiled into the binary.
pub const BITONIC_KERNEL_SOURCE: &str = include_str!("../kernels/bitonic_step.cl");

/// Entry point of the stage kernel.
pub const KERNEL_NAME: &str = "bitonic_step";


/// Configuration of the [`OpenClBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenClConfig {
  /// Pick a GPU when one exists, otherwise the first device of any type.
  pub prefer_gpu: bool,
  /// Work-items per work-group. Must be a power of two.
  pub work_group_size: usize,
  /// Read the kernel from this file instead of the embedded source.
  pub kernel_path: Option<PathBuf>,
}

impl Default for OpenClConfig {
  fn default() -> Self {
    Self { prefer_gpu: true, work_group_size: DEFAULT_WORK_GROUP_SIZE, kernel_path: None }
  }
}

/// Runs network stages as OpenCL kernel launches.
pub struct OpenClBackend<T: SortElement> {
  _device: Device,
  context: Context,
  queue: CommandQueue,
  kernel: Kernel,
  buffer: Option<Buffer<T>>,
  len: usize,
  work_group_size: usize,
  name: String,
}

impl<T: SortElement> std::fmt::Debug for OpenClBackend<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("OpenClBackend")
      .field("name", &self.name)
      .field("len", &self.len)
      .field("work_group_size", &self.work_group_size)
      .finish_non_exhaustive()
  }
}

fn unavailable<E: std::fmt::Debug>(what: &str) -> impl FnOnce(E) -> BackendError + '_ {
  move |e| BackendError::Unavailable(format!("{what}: {e:?}"))
}

fn kernel_failure<E: std::fmt::Debug>(what: &str) -> impl FnOnce(E) -> BackendError + '_ {
  move |e| BackendError::Kernel(format!("{what}: {e:?}"))
}

/// Largest power of two not above `requested`, the device limit or the kernel limit.
///
/// `requested` must be a power of two. Limits of zero are treated as one.
pub fn clamp_work_group_size(requested: usize, device_limit: usize, kernel_limit: usize) -> usize {
  let limit = requested.min(device_limit.max(1)).min(kernel_limit.max(1));
  1 << limit.ilog2()
}

impl<T: SortElement> OpenClBackend<T> {
  /// Selects a device, creates a context and queue, and builds the stage kernel for `T`.
  pub fn new(config: &OpenClConfig) -> BackendResult<Self> {
    if !config.work_group_size.is_power_of_two() {
      return Err(BackendError::InvalidConfig(format!(
        "work group size must be a power of two, got {}",
        config.work_group_size
      )));
    }

    let all_ids = get_all_devices(CL_DEVICE_TYPE_ALL).map_err(unavailable("device discovery"))?;
    let Some(&first) = all_ids.first() else {
      return Err(BackendError::Unavailable("no OpenCL devices found".into()));
    };
    let selected = if config.prefer_gpu {
      get_all_devices(CL_DEVICE_TYPE_GPU).unwrap_or_default().first().copied().unwrap_or(first)
    } else {
      first
    };

    let device = Device::new(selected);
    let device_name = device.name().unwrap_or_default().trim().to_string();
    let device_limit = device.max_work_group_size().unwrap_or(1);

    let context = Context::from_device(&device).map_err(unavailable("context creation"))?;
    #[allow(deprecated)]
    let queue = CommandQueue::create_default(&context, 0).map_err(unavailable("queue creation"))?;

    let source = match &config.kernel_path {
      Some(path) => std::fs::read_to_string(path).map_err(|e| {
        BackendError::Unavailable(format!("cannot read kernel source {}: {e}", path.display()))
      })?,
      None => BITONIC_KERNEL_SOURCE.to_string(),
    };
    let options = format!("-DELEMENT_TYPE={}", T::CL_TYPE);
    let program = Program::create_and_build_from_source(&context, &source, &options)
      .map_err(|log| BackendError::Unavailable(format!("kernel build failed: {log}")))?;
    let kernel = Kernel::create(&program, KERNEL_NAME).map_err(unavailable("kernel creation"))?;
    let kernel_limit = kernel.get_work_group_size(device.id()).unwrap_or(device_limit);
    let work_group_size = clamp_work_group_size(config.work_group_size, device_limit, kernel_limit);
    if work_group_size < config.work_group_size {
      debug!(
        requested = config.work_group_size,
        device_limit, kernel_limit, work_group_size, "work group size clamped"
      );
    }

    let name = format!("opencl ({device_name})");
    info!(backend = %name, work_group_size, element = T::CL_TYPE, "built stage kernel");
    Ok(Self {
      _device: device,
      context,
      queue,
      kernel,
      buffer: None,
      len: 0,
      work_group_size,
      name,
    })
  }

  fn buffer(&self) -> BackendResult<&Buffer<T>> {
    self.buffer.as_ref().ok_or(BackendError::NotAllocated)
  }
}

impl<T: SortElement> ComputeBackend<T> for OpenClBackend<T> {
  fn name(&self) -> &str {
    &self.name
  }

  fn allocate(&mut self, padded_length: usize) -> BackendResult<()> {
    assert!(
      padded_length >= 2 && padded_length.is_power_of_two(),
      "bitonic network requires a power of two length of at least 2, got {padded_length}"
    );
    let limit = cl_uint::MAX as usize;
    if padded_length > limit {
      return Err(BackendError::TooLarge { requested: padded_length, limit });
    }
    let buffer = unsafe {
      Buffer::<T>::create(&self.context, CL_MEM_READ_WRITE, padded_length, ptr::null_mut())
        .map_err(unavailable("buffer allocation"))?
    };
    debug!(padded_length, element = T::CL_TYPE, "allocated device buffer");
    self.buffer = Some(buffer);
    self.len = padded_length;
    Ok(())
  }

  fn upload(&mut self, data: &[T]) -> BackendResult<()> {
    if self.buffer.is_none() {
      return Err(BackendError::NotAllocated);
    }
    if data.len() != self.len {
      return Err(BackendError::LengthMismatch { expected: self.len, actual: data.len() });
    }
    let Some(buffer) = self.buffer.as_mut() else {
      return Err(BackendError::NotAllocated);
    };
    let event = unsafe {
      self
        .queue
        .enqueue_write_buffer(buffer, CL_BLOCKING, 0, data, &[])
        .map_err(kernel_failure("upload"))?
    };
    event.wait().map_err(kernel_failure("upload"))?;
    Ok(())
  }

  fn run_stage(&mut self, stage: Stage, direction: Direction) -> BackendResult<()> {
    let buffer = self.buffer()?;
    assert!(
      stage.partition_size <= self.len,
      "stage {stage} does not fit a sequence of {} elements",
      self.len
    );
    let compare_distance = stage.compare_distance as cl_uint;
    let partition_size = stage.partition_size as cl_uint;
    let descending = cl_uint::from(direction.is_descending());
    let local = self.work_group_size.min(self.len);

    let event = unsafe {
      ExecuteKernel::new(&self.kernel)
        .set_arg(buffer)
        .set_arg(&compare_distance)
        .set_arg(&partition_size)
        .set_arg(&descending)
        .set_global_work_size(self.len)
        .set_local_work_size(local)
        .enqueue_nd_range(&self.queue)
        .map_err(kernel_failure("stage launch"))?
    };
    event.wait().map_err(kernel_failure("stage launch"))?;
    trace!(%stage, %direction, "device stage committed");
    Ok(())
  }

  fn download(&mut self) -> BackendResult<Vec<T>> {
    let buffer = self.buffer()?;
    let mut out = vec![T::zeroed(); self.len];
    let event = unsafe {
      self
        .queue
        .enqueue_read_buffer(buffer, CL_BLOCKING, 0, &mut out, &[])
        .map_err(kernel_failure("download"))?
    };
    event.wait().map_err(kernel_failure("download"))?;
    Ok(out)
  }
}
