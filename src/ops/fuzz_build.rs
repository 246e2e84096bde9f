//! Implementation of the fuzz archive build.
//!
//! Runs the three stages strictly in order: resolve the package, write the
//! bridge program to a temporary file, and compile it with `go build`. The
//! temporary file is owned by a [`HarnessFile`] and is gone by the time this
//! returns, whichever way it returns.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;

use crate::builder::{BuildFlags, BuildInvocation};
use crate::core::config::FuzzConfig;
use crate::harness::{self, HarnessFile};
use crate::resolver::{resolve_target, PackageQuery, ResolvedTarget};
use crate::util::shell::{Shell, Status};

/// Outcome of a successful build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzBuildResult {
    /// The package that was wrapped.
    pub target: ResolvedTarget,
    /// The static archive.
    pub archive: PathBuf,
    /// The C header the toolchain writes next to the archive.
    pub header: PathBuf,
}

/// Build `pattern` into a fuzzing archive.
///
/// `work_dir` is where the harness source is written; it must lie inside
/// the module that contains the target so the toolchain can resolve the
/// import.
pub fn fuzz_build(
    config: &FuzzConfig,
    pattern: &str,
    query: &dyn PackageQuery,
    work_dir: &Path,
    shell: &Arc<Shell>,
) -> Result<FuzzBuildResult> {
    let flags = BuildFlags::new(config);
    tracing::debug!("Build flags: {}", flags.as_slice().join(" "));

    shell.status(Status::Resolving, pattern);
    let target = resolve_target(query, pattern, flags.as_slice())?;
    tracing::info!(
        "Resolved `{}` to package {} ({})",
        pattern,
        target.package_name,
        target.import_path
    );

    let archive = config.output_for(&target.package_name);

    shell.status(
        Status::Generating,
        format!("harness for {}.{}", target.import_path, config.entry_func()),
    );
    let source = harness::generate(&target.import_path, config.entry_func());
    let harness = HarnessFile::create(work_dir, &source)?;

    let invocation = BuildInvocation::new(flags, harness.path(), &archive);
    let span = shell.span(Status::Building, archive.display());
    if shell.is_verbose() {
        shell.note(format!(
            "`{}`",
            invocation.command(config.go()).display_command()
        ));
    }
    invocation.run(config.go())?;

    let harness_path = harness.path().to_path_buf();
    if let Err(e) = harness.remove() {
        shell.warn(format!(
            "could not remove {}: {}",
            harness_path.display(),
            e
        ));
    }

    let header = invocation.header_file();
    span.finish_with_message(format!("`{}`", archive.display()));
    shell.note(format!("C header `{}`", header.display()));

    Ok(FuzzBuildResult {
        target,
        archive,
        header,
    })
}
