//! Core data structures for fuzzbuild.

pub mod config;

pub use config::{ConfigError, FuzzConfig};
