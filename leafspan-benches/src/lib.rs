//! Benchmark support crate for leafspan.
//!
//! Provides synthetic graphs and parameter types used by the Criterion
//! benchmarks of the baseline and branch-and-bound solvers.

pub mod error;
pub mod params;
pub mod synthetic;
