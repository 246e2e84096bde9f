//! `fuzzbuild <PACKAGE>` command

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::cli::Cli;
use fuzzbuild::core::config::{single_package, FuzzConfig};
use fuzzbuild::ops::fuzz_build;
use fuzzbuild::resolver::GoList;
use fuzzbuild::util::config::{global_config_path, load_config, project_config_path};
use fuzzbuild::util::process::find_go;
use fuzzbuild::util::Shell;

pub fn execute(args: &Cli, shell: &Arc<Shell>) -> Result<()> {
    // Validate before touching the filesystem or spawning anything
    let config = FuzzConfig::new(args.func.as_str())?;
    let pattern = single_package(&args.packages)?;

    let cwd = std::env::current_dir().context("failed to determine current directory")?;

    // Load configuration (global + project)
    let file_config = load_config(global_config_path().as_deref(), &project_config_path(&cwd));

    // Toolchain: CLI/env > config > PATH
    let go = args
        .go
        .clone()
        .or_else(|| file_config.toolchain.go.clone())
        .or_else(find_go)
        .unwrap_or_else(|| PathBuf::from("go"));

    // --race / --no-race > config > off
    let race = if args.no_race {
        false
    } else {
        args.race || file_config.build.race.unwrap_or(false)
    };

    let config = config
        .with_output(args.output.clone())
        .with_race(race)
        .with_tags(file_config.build.tags.iter().chain(&args.tags))
        .with_verbose(args.verbose)
        .with_keep_work_dir(args.work)
        .with_print_commands(args.print_commands)
        .with_go(go);

    let query = GoList::new(config.go()).with_cwd(&cwd);
    let result = fuzz_build(&config, pattern, &query, &cwd, shell)?;

    shell.json_event(&serde_json::json!({
        "reason": "artifact",
        "package": result.target.package_name,
        "import_path": result.target.import_path,
        "archive": result.archive,
        "header": result.header,
    }));

    Ok(())
}
