//! Commonly used base types and primitives for the bitonic sorting network.

pub mod traits;

pub mod direction;

pub mod schedule;

pub mod rule;

pub mod utils;
