//! fuzzbuild - Build Go packages into libFuzzer-instrumented static archives
//!
//! This crate resolves a Go package, generates a cgo bridge exporting the
//! fuzzing engine's entry point, and compiles both into a `c-archive` with
//! the toolchain's libFuzzer instrumentation enabled.

pub mod builder;
pub mod core;
pub mod harness;
pub mod ops;
pub mod resolver;
pub mod util;

/// Test utilities and mocks for fuzzbuild unit tests.
#[cfg(test)]
pub mod test_support;

pub use crate::core::config::FuzzConfig;
pub use ops::{fuzz_build, FuzzBuildResult};
pub use resolver::{GoList, PackageQuery, ResolvedTarget};
