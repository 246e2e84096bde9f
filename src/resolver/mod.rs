//! Target package resolution.
//!
//! Turns the package path given on the command line into exactly one
//! [`ResolvedTarget`]. The lookup itself is delegated to a [`PackageQuery`],
//! normally [`GoList`], and is given the same build flags as the final build
//! so that both see the same tag-gated set of files.

pub mod errors;
pub mod go_list;

use std::fmt;

use serde::Deserialize;

pub use errors::ResolveError;
pub use go_list::GoList;

/// Marker prefix the toolchain uses for directories outside any module.
const LOCAL_IMPORT_MARKER: &str = "_/";

/// Recursive wildcard accepted by package patterns.
const WILDCARD: &str = "...";

/// The package a harness will import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    /// Path usable in an `import` declaration.
    pub import_path: String,
    /// Package clause name, used for the default artifact name.
    pub package_name: String,
}

/// One package reported by a metadata query.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListedPackage {
    pub import_path: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub error: Option<PackageError>,
}

/// A load error attached to a single package.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PackageError {
    #[serde(default)]
    pub pos: String,
    pub err: String,
}

impl fmt::Display for PackageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.pos.is_empty() {
            write!(f, "{}", self.err)
        } else {
            write!(f, "{}: {}", self.pos, self.err)
        }
    }
}

/// Source of package metadata.
pub trait PackageQuery {
    /// List the packages matching `pattern` under the given build flags.
    ///
    /// Only names and import paths are needed; nothing is compiled.
    fn load(&self, pattern: &str, build_flags: &[String])
        -> Result<Vec<ListedPackage>, ResolveError>;
}

/// Resolve `pattern` to exactly one package.
pub fn resolve_target(
    query: &dyn PackageQuery,
    pattern: &str,
    build_flags: &[String],
) -> Result<ResolvedTarget, ResolveError> {
    if pattern.contains(WILDCARD) {
        return Err(ResolveError::WildcardPattern(pattern.to_string()));
    }

    let packages = query.load(pattern, build_flags)?;

    let errors: Vec<String> = packages
        .iter()
        .filter_map(|p| p.error.as_ref().map(ToString::to_string))
        .collect();
    if !errors.is_empty() {
        return Err(ResolveError::PackageErrors {
            pattern: pattern.to_string(),
            errors,
        });
    }

    let package = match packages.as_slice() {
        [] => return Err(ResolveError::NoPackage(pattern.to_string())),
        [package] => package,
        many => {
            return Err(ResolveError::Ambiguous {
                pattern: pattern.to_string(),
                matches: many.iter().map(|p| p.import_path.clone()).collect(),
            })
        }
    };

    let import_path = if package.import_path.starts_with(LOCAL_IMPORT_MARKER) {
        tracing::debug!(
            "`{}` has no module import path, importing `{}` instead",
            package.import_path,
            pattern
        );
        pattern.to_string()
    } else {
        package.import_path.clone()
    };

    Ok(ResolvedTarget {
        import_path,
        package_name: package.name.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{listed, listed_with_error, MockQuery};

    fn flags() -> Vec<String> {
        vec!["-tags".to_string(), "gofuzz".to_string()]
    }

    #[test]
    fn test_resolves_single_package() {
        let query = MockQuery::returning(vec![listed("example.com/sample", "sample")]);

        let target = resolve_target(&query, "./sample", &flags()).unwrap();
        assert_eq!(
            target,
            ResolvedTarget {
                import_path: "example.com/sample".to_string(),
                package_name: "sample".to_string(),
            }
        );
    }

    #[test]
    fn test_query_receives_build_flags() {
        let query = MockQuery::returning(vec![listed("example.com/sample", "sample")]);

        resolve_target(&query, "./sample", &flags()).unwrap();
        assert_eq!(query.calls(), vec![("./sample".to_string(), flags())]);
    }

    #[test]
    fn test_wildcard_rejected_before_query() {
        let query = MockQuery::returning(vec![listed("example.com/sample", "sample")]);

        let err = resolve_target(&query, "./sample/...", &flags()).unwrap_err();
        assert!(matches!(err, ResolveError::WildcardPattern(_)));
        assert!(query.calls().is_empty());
    }

    #[test]
    fn test_no_match_is_error() {
        let query = MockQuery::returning(vec![]);

        let err = resolve_target(&query, "./missing", &flags()).unwrap_err();
        assert!(matches!(err, ResolveError::NoPackage(p) if p == "./missing"));
    }

    #[test]
    fn test_multiple_matches_are_ambiguous() {
        let query = MockQuery::returning(vec![
            listed("example.com/a", "a"),
            listed("example.com/b", "b"),
        ]);

        let err = resolve_target(&query, "example.com/a", &[]).unwrap_err();
        match err {
            ResolveError::Ambiguous { matches, .. } => {
                assert_eq!(matches, vec!["example.com/a", "example.com/b"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_package_errors_abort() {
        let query = MockQuery::returning(vec![listed_with_error(
            "example.com/broken",
            "broken",
            "broken/a.go:1:1",
            "expected 'package', found 'EOF'",
        )]);

        let err = resolve_target(&query, "./broken", &[]).unwrap_err();
        match err {
            ResolveError::PackageErrors { errors, .. } => {
                assert_eq!(errors, vec!["broken/a.go:1:1: expected 'package', found 'EOF'"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_local_marker_replaced_with_pattern() {
        let query = MockQuery::returning(vec![listed("_/home/dev/sample", "sample")]);

        let target = resolve_target(&query, "./sample", &[]).unwrap();
        assert_eq!(target.import_path, "./sample");
        assert_eq!(target.package_name, "sample");
    }

    #[test]
    fn test_query_failure_propagates() {
        let query = MockQuery::failing("go: cannot find main module");

        let err = resolve_target(&query, "./sample", &[]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed to load packages: go: cannot find main module"
        );
    }

    #[test]
    fn test_package_error_display() {
        let err = PackageError {
            pos: String::new(),
            err: "no Go files".to_string(),
        };
        assert_eq!(err.to_string(), "no Go files");
    }
}
