//! Pea benchmarking suite
//!
//! Benchmarks for version selection, metadata parsing and the name
//! resolution cache.

pub mod common;

pub use common::*;
