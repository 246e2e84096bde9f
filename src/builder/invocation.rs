//! The single `go build` invocation producing the archive.

use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use thiserror::Error;

use super::flags::BuildFlags;
use crate::util::process::ProcessBuilder;

/// Failure of the archive build.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("failed to run `{command}`: {message}")]
    Spawn { command: String, message: String },

    #[error("failed to build packages: {status}")]
    Failed { status: ExitStatus },
}

/// A fully determined `go build` command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInvocation {
    flags: BuildFlags,
    source_file: PathBuf,
    output_file: PathBuf,
}

impl BuildInvocation {
    pub fn new(
        flags: BuildFlags,
        source_file: impl Into<PathBuf>,
        output_file: impl Into<PathBuf>,
    ) -> Self {
        BuildInvocation {
            flags,
            source_file: source_file.into(),
            output_file: output_file.into(),
        }
    }

    /// Path of the C header written next to the archive.
    pub fn header_file(&self) -> PathBuf {
        self.output_file.with_extension("h")
    }

    /// Arguments passed to the toolchain, starting with the `build` verb.
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![
            "build".to_string(),
            "-o".to_string(),
            self.output_file.to_string_lossy().into_owned(),
        ];
        args.extend(self.flags.as_slice().iter().cloned());
        args.push(self.source_file.to_string_lossy().into_owned());
        args
    }

    pub fn command(&self, go: &Path) -> ProcessBuilder {
        ProcessBuilder::new(go).args(self.args())
    }

    /// Run the build, blocking until the toolchain exits.
    ///
    /// The toolchain's stdout and stderr go straight to ours.
    pub fn run(&self, go: &Path) -> Result<(), BuildError> {
        let pb = self.command(go);
        tracing::debug!("Running `{}`", pb.display_command());

        let status = pb.status().map_err(|e| BuildError::Spawn {
            command: pb.display_command(),
            message: format!("{:#}", e),
        })?;

        if !status.success() {
            return Err(BuildError::Failed { status });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::FuzzConfig;

    fn invocation() -> BuildInvocation {
        let flags = BuildFlags::new(&FuzzConfig::new("Fuzz").unwrap());
        BuildInvocation::new(flags, "main.123.go", "sample-fuzz.a")
    }

    #[test]
    fn test_args_layout() {
        let args = invocation().args();
        assert_eq!(&args[..3], ["build", "-o", "sample-fuzz.a"]);
        assert_eq!(args[3], "-buildmode");
        assert_eq!(args.last().map(String::as_str), Some("main.123.go"));
        assert_eq!(args.len(), 3 + 9 + 1);
    }

    #[test]
    fn test_header_next_to_archive() {
        assert_eq!(invocation().header_file(), PathBuf::from("sample-fuzz.h"));

        let flags = BuildFlags::new(&FuzzConfig::new("Fuzz").unwrap());
        let inv = BuildInvocation::new(flags, "main.go", "out/libfuzz");
        assert_eq!(inv.header_file(), PathBuf::from("out/libfuzz.h"));
    }

    #[test]
    fn test_display_command() {
        let pb = invocation().command(Path::new("go"));
        assert!(pb.display_command().starts_with("go build -o sample-fuzz.a -buildmode c-archive"));
        assert!(pb.display_command().ends_with("-trimpath main.123.go"));
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_is_failure() {
        let err = invocation().run(Path::new("false")).unwrap_err();
        assert!(matches!(err, BuildError::Failed { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_zero_exit_is_success() {
        invocation().run(Path::new("true")).unwrap();
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let err = invocation()
            .run(Path::new("/nonexistent/fuzzbuild/go"))
            .unwrap_err();
        assert!(matches!(err, BuildError::Spawn { .. }));
    }
}
