//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use fuzzbuild::core::config::DEFAULT_ENTRY_FUNC;
use fuzzbuild::util::shell::ColorChoice;

/// fuzzbuild - Build a Go package into a libFuzzer-instrumented static archive
#[derive(Parser)]
#[command(name = "fuzzbuild")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Package path to build (exactly one, without ... wildcards)
    #[arg(value_name = "PACKAGE")]
    pub packages: Vec<String>,

    /// Fuzzer entry point
    #[arg(long, default_value = DEFAULT_ENTRY_FUNC)]
    pub func: String,

    /// Output file (defaults to <package>-fuzz.a)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Enable data race detection
    #[arg(long, overrides_with = "no_race")]
    pub race: bool,

    /// Disable data race detection, even if a config file enables it
    #[arg(long, overrides_with = "race")]
    pub no_race: bool,

    /// Comma-separated list of additional build tags to consider satisfied
    #[arg(long, value_name = "TAG,...")]
    pub tags: Vec<String>,

    /// Print the names of packages as they are compiled, and debug logs
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the name of the temporary work directory and keep it
    #[arg(long)]
    pub work: bool,

    /// Print the commands run by the toolchain
    #[arg(short = 'x')]
    pub print_commands: bool,

    /// Path to the go command
    #[arg(long, env = "FUZZBUILD_GO", value_name = "PATH")]
    pub go: Option<PathBuf>,

    /// Only print errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Coloring of status output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorChoice,

    /// Format of status messages
    #[arg(long, value_enum, default_value_t = MessageFormat::Human)]
    pub message_format: MessageFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MessageFormat {
    Human,
    Json,
}
