//! Validated user intent for a single fuzz build.
//!
//! A [`FuzzConfig`] is constructed once from CLI input (merged with the
//! configuration files) and threaded by reference through the resolver, the
//! harness generator and the build orchestrator. Construction validates the
//! entry function name, so every downstream stage can assume it is an
//! exported Go identifier.

use std::path::{Path, PathBuf};

use thiserror::Error;
use unicode_general_category::{get_general_category, GeneralCategory};

/// Build tags that are always satisfied for a fuzz build, in order.
pub const FIXED_TAGS: [&str; 3] = ["gofuzz", "gofuzz_libfuzzer", "libfuzzer"];

/// Default entry function name.
pub const DEFAULT_ENTRY_FUNC: &str = "Fuzz";

/// Suffix appended to the package name when no output path is given.
pub const DEFAULT_OUTPUT_SUFFIX: &str = "-fuzz.a";

const GO_KEYWORDS: &[&str] = &[
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

/// Invalid user input detected before any I/O.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("--func must be an exported identifier (got `{0}`)")]
    InvalidEntryFunc(String),

    #[error("must specify exactly one package path (got {0})")]
    PackageCount(usize),
}

/// Immutable configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzConfig {
    entry_func: String,
    output: Option<PathBuf>,
    race: bool,
    extra_tags: Vec<String>,
    verbose: bool,
    keep_work_dir: bool,
    print_commands: bool,
    go: PathBuf,
}

impl FuzzConfig {
    /// Create a configuration for the given entry function.
    ///
    /// Fails unless `entry_func` is a Go identifier starting with an
    /// uppercase letter.
    pub fn new(entry_func: impl Into<String>) -> Result<Self, ConfigError> {
        let entry_func = entry_func.into();
        if !is_identifier(&entry_func) || !is_exported(&entry_func) {
            return Err(ConfigError::InvalidEntryFunc(entry_func));
        }

        Ok(FuzzConfig {
            entry_func,
            output: None,
            race: false,
            extra_tags: Vec::new(),
            verbose: false,
            keep_work_dir: false,
            print_commands: false,
            go: PathBuf::from("go"),
        })
    }

    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = output;
        self
    }

    pub fn with_race(mut self, race: bool) -> Self {
        self.race = race;
        self
    }

    /// Add user build tags.
    ///
    /// Entries may themselves be comma-separated. Blank entries and the
    /// fixed tags are skipped; repeated tags keep their first position.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for entry in tags {
            for tag in entry.as_ref().split(',') {
                let tag = tag.trim();
                if tag.is_empty()
                    || FIXED_TAGS.contains(&tag)
                    || self.extra_tags.iter().any(|t| t == tag)
                {
                    continue;
                }
                self.extra_tags.push(tag.to_string());
            }
        }
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_keep_work_dir(mut self, keep: bool) -> Self {
        self.keep_work_dir = keep;
        self
    }

    pub fn with_print_commands(mut self, print: bool) -> Self {
        self.print_commands = print;
        self
    }

    /// Set the Go toolchain program used for both the query and the build.
    pub fn with_go(mut self, go: impl Into<PathBuf>) -> Self {
        self.go = go.into();
        self
    }

    pub fn entry_func(&self) -> &str {
        &self.entry_func
    }

    pub fn output(&self) -> Option<&Path> {
        self.output.as_deref()
    }

    pub fn race(&self) -> bool {
        self.race
    }

    pub fn extra_tags(&self) -> &[String] {
        &self.extra_tags
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn keep_work_dir(&self) -> bool {
        self.keep_work_dir
    }

    pub fn print_commands(&self) -> bool {
        self.print_commands
    }

    pub fn go(&self) -> &Path {
        &self.go
    }

    /// The comma-joined tag list passed to `-tags`.
    pub fn build_tags(&self) -> String {
        FIXED_TAGS
            .iter()
            .copied()
            .chain(self.extra_tags.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Output path for the archive: the explicit one, or `<package>-fuzz.a`.
    pub fn output_for(&self, package_name: &str) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("{}{}", package_name, DEFAULT_OUTPUT_SUFFIX)))
    }
}

/// Check that exactly one package path was given and return it.
pub fn single_package(paths: &[String]) -> Result<&str, ConfigError> {
    match paths {
        [path] => Ok(path),
        _ => Err(ConfigError::PackageCount(paths.len())),
    }
}

/// Whether `name` is a Go identifier that is not a keyword.
///
/// Go letters are the Unicode `L*` categories plus `_`; digits are `Nd` only.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if is_letter(c) => {}
        _ => return false,
    }
    chars.all(|c| is_letter(c) || is_digit(c)) && !GO_KEYWORDS.contains(&name)
}

/// Whether `name` would be exported from a Go package (first char is `Lu`).
pub fn is_exported(name: &str) -> bool {
    name.chars()
        .next()
        .is_some_and(|c| get_general_category(c) == GeneralCategory::UppercaseLetter)
}

fn is_letter(c: char) -> bool {
    c == '_'
        || matches!(
            get_general_category(c),
            GeneralCategory::UppercaseLetter
                | GeneralCategory::LowercaseLetter
                | GeneralCategory::TitlecaseLetter
                | GeneralCategory::ModifierLetter
                | GeneralCategory::OtherLetter
        )
}

fn is_digit(c: char) -> bool {
    get_general_category(c) == GeneralCategory::DecimalNumber
}
