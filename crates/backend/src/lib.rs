//! Compute backends for the bitonic sorting network.
//!
//! A backend receives the sequence once, runs one stage of the network per call and hands the
//! sequence back after the last stage. [`cpu::CpuBackend`] runs stages on a rayon pool;
//! `opencl::OpenClBackend` (feature `opencl`) runs them as device kernels.

/// Default number of work-items per work-group on device backends, and of compare-exchange pairs
/// per task on the CPU backend.
pub const DEFAULT_WORK_GROUP_SIZE: usize = 256;

pub mod error;

pub mod traits;

pub mod cpu;

#[cfg(feature = "opencl")]
pub mod opencl;
