//! Test utilities and mocks for fuzzbuild unit tests.
//!
//! This module provides a scripted [`PackageQuery`] so resolution and the
//! build pipeline can be tested without a Go toolchain.
//!
//! # Example
//!
//! ```rust,ignore
//! use fuzzbuild::test_support::{listed, MockQuery};
//!
//! #[test]
//! fn test_example() {
//!     let query = MockQuery::returning(vec![listed("example.com/sample", "sample")]);
//!     let target = resolve_target(&query, "./sample", &[]).unwrap();
//!     assert_eq!(query.calls().len(), 1);
//! }
//! ```

pub mod fixtures;

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::resolver::{ListedPackage, PackageQuery, ResolveError};
use crate::util::shell::{ColorChoice, Shell, ShellMode, Verbosity};

// Re-export fixtures for convenience
pub use fixtures::*;

/// Scripted package query.
///
/// Returns the same response for every call and records the pattern and
/// build flags of each call.
#[derive(Debug)]
pub struct MockQuery {
    response: Result<Vec<ListedPackage>, String>,
    calls: RefCell<Vec<(String, Vec<String>)>>,
}

impl MockQuery {
    /// A query that lists `packages`.
    pub fn returning(packages: Vec<ListedPackage>) -> Self {
        MockQuery {
            response: Ok(packages),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// A query whose transport fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        MockQuery {
            response: Err(message.into()),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Calls made so far, as `(pattern, build_flags)`.
    pub fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.borrow().clone()
    }
}

impl PackageQuery for MockQuery {
    fn load(
        &self,
        pattern: &str,
        build_flags: &[String],
    ) -> Result<Vec<ListedPackage>, ResolveError> {
        self.calls
            .borrow_mut()
            .push((pattern.to_string(), build_flags.to_vec()));

        match &self.response {
            Ok(packages) => Ok(packages.clone()),
            Err(message) => Err(ResolveError::QueryFailed(message.clone())),
        }
    }
}

/// A shell that prints nothing but errors.
pub fn quiet_shell() -> Arc<Shell> {
    Arc::new(Shell::new(ShellMode::Human {
        verbosity: Verbosity::Quiet,
        color: ColorChoice::Never,
    }))
}

/// `.go` files directly inside `dir`.
pub fn go_files(dir: &Path) -> Vec<PathBuf> {
    std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok().map(|e| e.path()))
                .filter(|p| p.extension().is_some_and(|e| e == "go"))
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_query_records_calls() {
        let query = MockQuery::returning(vec![listed("example.com/a", "a")]);

        let packages = query.load("./a", &["-trimpath".to_string()]).unwrap();
        assert_eq!(packages.len(), 1);
        assert_eq!(
            query.calls(),
            vec![("./a".to_string(), vec!["-trimpath".to_string()])]
        );
    }

    #[test]
    fn test_mock_query_failure() {
        let query = MockQuery::failing("boom");
        assert!(matches!(
            query.load("./a", &[]),
            Err(ResolveError::QueryFailed(m)) if m == "boom"
        ));
    }
}
