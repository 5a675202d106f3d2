//! Typedef Checker CLI
//!
//! Finds `*.typedef.json` files under a directory and validates each
//! sibling `*.json` document against it.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use typedef_check::{check_directory, CheckConfig, OutputFormat, Validator};

#[derive(Parser)]
#[command(name = "typedef-check")]
#[command(about = "Validate JSON documents against their *.typedef.json schemas")]
struct Cli {
    /// Directory with json files to validate
    #[arg(short, long)]
    directory: Option<PathBuf>,

    /// Config file layered over typedef-check.toml
    #[arg(short, long)]
    config: Option<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<Format>,

    /// Consecutive alias dereferences allowed at one location
    #[arg(long)]
    max_alias_depth: Option<usize>,

    /// Fail when documents carry fields their typedef does not describe
    #[arg(long)]
    fail_on_warning: bool,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<bool> {
    let mut config = CheckConfig::load_from(cli.config.as_deref())
        .context("failed to load configuration")?;

    if let Some(directory) = cli.directory {
        config.check.directory = directory;
    }
    if let Some(format) = cli.format {
        config.output.format = match format {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
        };
    }
    if let Some(depth) = cli.max_alias_depth {
        config.check.max_alias_depth = depth;
    }
    if cli.fail_on_warning {
        config.check.fail_on_warning = true;
    }

    let validator = Validator::new(config.validator_options());
    let summary = check_directory(&config.check.directory, &validator)?;

    match config.output.format {
        OutputFormat::Text => print!("{}", summary.text(&config.output.prefix)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary.json_report()?)?),
    }

    Ok(summary.succeeded(config.check.fail_on_warning))
}
