//! `go list` backed package queries.

use std::path::{Path, PathBuf};

use super::{ListedPackage, PackageQuery, ResolveError};
use crate::util::process::ProcessBuilder;

/// Fields requested from `go list -json`.
const LIST_FIELDS: &str = "-json=Name,ImportPath,Error";

/// Queries package metadata with `go list`.
#[derive(Debug, Clone)]
pub struct GoList {
    go: PathBuf,
    cwd: Option<PathBuf>,
}

impl GoList {
    pub fn new(go: impl AsRef<Path>) -> Self {
        GoList {
            go: go.as_ref().to_path_buf(),
            cwd: None,
        }
    }

    /// Run the query from `cwd` instead of the current directory.
    pub fn with_cwd(mut self, cwd: impl AsRef<Path>) -> Self {
        self.cwd = Some(cwd.as_ref().to_path_buf());
        self
    }

    fn command(&self, pattern: &str, build_flags: &[String]) -> ProcessBuilder {
        // -e reports broken packages in the Error field instead of failing,
        // -find skips dependency resolution.
        let mut pb = ProcessBuilder::new(&self.go)
            .args(["list", "-e", "-find", LIST_FIELDS])
            .args(build_flags)
            .arg("--")
            .arg(pattern);
        if let Some(ref cwd) = self.cwd {
            pb = pb.cwd(cwd);
        }
        pb
    }
}

impl PackageQuery for GoList {
    fn load(
        &self,
        pattern: &str,
        build_flags: &[String],
    ) -> Result<Vec<ListedPackage>, ResolveError> {
        let pb = self.command(pattern, build_flags);
        tracing::debug!("Running `{}`", pb.display_command());

        let output = pb
            .exec()
            .map_err(|e| ResolveError::QueryFailed(format!("{:#}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let msg = if stderr.is_empty() {
                format!("`{}` exited with {}", pb.display_command(), output.status)
            } else {
                stderr
            };
            return Err(ResolveError::QueryFailed(msg));
        }

        parse_packages(&output.stdout)
    }
}

/// Decode the stream of JSON objects printed by `go list -json`.
pub fn parse_packages(stdout: &[u8]) -> Result<Vec<ListedPackage>, ResolveError> {
    serde_json::Deserializer::from_slice(stdout)
        .into_iter::<ListedPackage>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ResolveError::MalformedOutput(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::PackageError;

    #[test]
    fn test_command_line() {
        let flags = vec!["-tags".to_string(), "gofuzz".to_string()];
        let pb = GoList::new("go").command("./sample", &flags);

        assert_eq!(
            pb.display_command(),
            "go list -e -find -json=Name,ImportPath,Error -tags gofuzz -- ./sample"
        );
    }

    #[test]
    fn test_parse_concatenated_objects() {
        let stdout = br#"{
	"ImportPath": "example.com/a",
	"Name": "a"
}
{
	"ImportPath": "example.com/b",
	"Name": "b",
	"Error": {
		"ImportStack": ["example.com/b"],
		"Pos": "b/b.go:4:2",
		"Err": "undefined: x"
	}
}
"#;

        let packages = parse_packages(stdout).unwrap();
        assert_eq!(packages.len(), 2);
        assert_eq!(packages[0].import_path, "example.com/a");
        assert_eq!(packages[0].error, None);
        assert_eq!(
            packages[1].error,
            Some(PackageError {
                pos: "b/b.go:4:2".to_string(),
                err: "undefined: x".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_empty_output() {
        assert!(parse_packages(b"").unwrap().is_empty());
    }

    #[test]
    fn test_parse_garbage() {
        let err = parse_packages(b"go: warning\n").unwrap_err();
        assert!(matches!(err, ResolveError::MalformedOutput(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_missing_toolchain_is_query_failure() {
        let err = GoList::new("/nonexistent/bin/go")
            .load("./sample", &[])
            .unwrap_err();
        assert!(matches!(err, ResolveError::QueryFailed(_)));
    }
}
