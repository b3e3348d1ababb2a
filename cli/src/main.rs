// Scratch CLI - Command Line Interface Entry Point

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};

use scratch_config::{SettingsLoader, TMP_FILE_DIR, TMP_FILE_PREFIX};
use scratch_temp_dir::{AllocatorOptions, ResolvedNaming, TempDirAllocator, DEFAULT_MAX_ATTEMPTS};

/// Scratch - create a uniquely named temporary directory
#[derive(Parser, Debug)]
#[command(name = "scratch")]
#[command(version, about, long_about = None)]
struct TopCli {
    #[clap(flatten)]
    config_overrides: CliConfigOverrides,

    /// Print a confirmation line naming the new directory
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Base directory (shorthand for -c TmpFileDir=DIR)
    #[arg(short = 'd', long = "dir")]
    dir: Option<PathBuf>,

    /// Directory name prefix (shorthand for -c TmpFilePrefix=PREFIX)
    #[arg(short = 'p', long = "prefix")]
    prefix: Option<String>,

    /// Program name used for the default prefix and the confirmation line
    #[arg(long = "program-name", value_name = "NAME")]
    program_name: Option<String>,

    /// Names to try before giving up
    #[arg(long = "max-attempts", default_value_t = DEFAULT_MAX_ATTEMPTS)]
    max_attempts: usize,

    /// Show the resolved base directory and prefix without creating anything
    #[arg(long = "dry-run")]
    dry_run: bool,

    /// Print the result as JSON
    #[arg(long = "json")]
    json: bool,
}

/// CLI configuration overrides
#[derive(Debug, clap::Args)]
struct CliConfigOverrides {
    /// Setting override in key=value format
    #[arg(short = 'c', long = "config", value_name = "KEY=VALUE")]
    overrides: Vec<String>,
}

#[derive(Debug, Serialize)]
struct Allocation<'a> {
    path: Option<PathBuf>,
    #[serde(flatten)]
    naming: &'a ResolvedNaming,
}

fn main() -> Result<()> {
    // Initialize logging, stdout is reserved for results
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "warn".to_string())
                .as_str(),
        )
        .with_writer(std::io::stderr)
        .init();

    // Parse CLI arguments
    let cli = TopCli::parse();
    run(cli)
}

fn run(cli: TopCli) -> Result<()> {
    let program_name = cli
        .program_name
        .clone()
        .unwrap_or_else(scratch_env::program_name);
    let overrides = collect_overrides(&cli);

    let settings = SettingsLoader::new()
        .load_with_cli_overrides(&overrides)
        .context("Invalid setting override")?;
    debug!(?settings, "settings loaded");

    let mut allocator = TempDirAllocator::new(settings, program_name).with_options(AllocatorOptions {
        max_attempts: cli.max_attempts,
    });
    let naming = allocator.resolve_naming();

    if cli.dry_run {
        info!(base_dir = %naming.base_dir.display(), prefix = %naming.prefix, "dry run");
        return print_result(&naming, None, cli.json);
    }

    let path = allocator
        .allocate(cli.verbose)
        .with_context(|| format!("Failed to allocate a directory under {}", naming.base_dir.display()))?;
    info!(path = %path.display(), "allocated");

    print_result(&naming, Some(path), cli.json)
}

/// `-c` overrides followed by the `--dir` / `--prefix` shorthands
fn collect_overrides(cli: &TopCli) -> Vec<String> {
    let mut overrides = cli.config_overrides.overrides.clone();
    if let Some(dir) = &cli.dir {
        overrides.push(format!("{TMP_FILE_DIR}={}", dir.to_string_lossy()));
    }
    if let Some(prefix) = &cli.prefix {
        overrides.push(format!("{TMP_FILE_PREFIX}={prefix}"));
    }
    overrides
}

fn print_result(naming: &ResolvedNaming, path: Option<PathBuf>, json: bool) -> Result<()> {
    if json {
        let allocation = Allocation { path, naming };
        println!("{}", serde_json::to_string(&allocation)?);
        return Ok(());
    }

    match path {
        Some(path) => println!("{}", path.display()),
        None => {
            println!("base_dir: {}", naming.base_dir.display());
            println!("prefix:   {}", naming.prefix);
        }
    }
    Ok(())
}
