//! Bitonic sorting network over power-of-two padded sequences.
//!
//! The same network runs on two executors, a single-threaded one ([`serial`]) and a data-parallel
//! one driving any [`bitonet_backend::traits::ComputeBackend`] ([`parallel`]). The [`pipeline`]
//! sorts one random sequence with both and with a standard library reference sort ([`oracle`]),
//! then checks that all three agree byte for byte.

pub mod config;

pub mod error;

pub mod oracle;

pub mod parallel;

pub mod pipeline;

pub mod sequence;

pub mod serial;

pub use config::RunConfig;
pub use error::{Error, Mismatch, Result};
pub use pipeline::{verify, verify_sequence, Verification, VerificationReport};
pub use sequence::PaddedSequence;
