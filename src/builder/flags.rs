//! Build flag composition.

use crate::core::config::FuzzConfig;

/// Packages compiled without libFuzzer instrumentation.
///
/// Instrumenting `syscall` breaks the runtime's signal and syscall handling
/// (google/oss-fuzz#3639).
pub const INSTRUMENTATION_EXEMPT: &[&str] = &["syscall"];

/// Flags shared by the package query and the archive build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildFlags {
    flags: Vec<String>,
}

impl BuildFlags {
    pub fn new(config: &FuzzConfig) -> Self {
        let mut flags: Vec<String> = vec![
            "-buildmode".into(),
            "c-archive".into(),
            "-gcflags".into(),
            "all=-d=libfuzzer".into(),
        ];

        for pkg in INSTRUMENTATION_EXEMPT {
            flags.push("-gcflags".into());
            flags.push(format!("{}=-d=libfuzzer=0", pkg));
        }

        flags.push("-tags".into());
        flags.push(config.build_tags());
        flags.push("-trimpath".into());

        let toggles = [
            (config.race(), "-race"),
            (config.verbose(), "-v"),
            (config.keep_work_dir(), "-work"),
            (config.print_commands(), "-x"),
        ];
        flags.extend(
            toggles
                .into_iter()
                .filter(|(enabled, _)| *enabled)
                .map(|(_, flag)| flag.to_string()),
        );

        BuildFlags { flags }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.flags
    }

    /// Value following `-tags`.
    pub fn tags(&self) -> Option<&str> {
        self.flags
            .iter()
            .position(|f| f == "-tags")
            .and_then(|i| self.flags.get(i + 1))
            .map(String::as_str)
    }
}
