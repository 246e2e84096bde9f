//! Build orchestration.
//!
//! [`BuildFlags`] composes the instrumentation, tag and build-mode flags from
//! a [`FuzzConfig`](crate::core::config::FuzzConfig); [`BuildInvocation`]
//! runs `go build` with them exactly once.

pub mod flags;
pub mod invocation;

pub use flags::{BuildFlags, INSTRUMENTATION_EXEMPT};
pub use invocation::{BuildError, BuildInvocation};
