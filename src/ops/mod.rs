//! High-level operations.
//!
//! This module contains the implementation of fuzzbuild commands.

pub mod fuzz_build;

pub use fuzz_build::{fuzz_build, FuzzBuildResult};
