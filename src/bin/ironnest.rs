//! ironnest CLI
//!
//! Reads records (a JSON array or JSON Lines) from stdin or a file, groups
//! them by the keys given as arguments, and writes the nested document to
//! stdout or a file.
//!
//! Usage:
//!   ironnest currency country < transactions.json
//!   ironnest -i transactions.jsonl.gz -o out/result.json --create-dirs city
//!   IRONNEST_KEYS=currency,country ironnest -c nest.json -i data.json
//!
//! Settings resolve as: flags over `IRONNEST_*` variables over `--config`.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use ironnest::config::NestConfig;
use ironnest::sink::SinkMode;
use ironnest::{SinkOutcome, read_records, read_records_file, transform, write_tree, write_tree_to};

/// Group flat JSON records into a tree nested by the given keys
#[derive(Parser, Debug)]
#[command(name = "ironnest", version)]
struct Args {
    /// Grouping keys, outermost first
    keys: Vec<String>,

    /// Read records from this file instead of stdin
    #[arg(long, short = 'i')]
    input: Option<PathBuf>,

    /// Write the tree to this file instead of stdout
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Indent the output document
    #[arg(long)]
    pretty: bool,

    /// Log and continue when the output directory does not exist
    #[arg(long)]
    best_effort: bool,

    /// Create missing parent directories of --output
    #[arg(long)]
    create_dirs: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ironnest=info".into()),
        )
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn resolve_config(args: &Args) -> Result<NestConfig> {
    let mut cfg = match &args.config {
        Some(path) => NestConfig::from_file(path)?,
        None => NestConfig::default(),
    };
    cfg.apply_env()?;
    if !args.keys.is_empty() {
        cfg.keys = args.keys.clone();
    }
    if args.output.is_some() {
        cfg.output = args.output.clone();
    }
    cfg.pretty |= args.pretty;
    cfg.create_dirs |= args.create_dirs;
    if args.best_effort {
        cfg.mode = SinkMode::BestEffort;
    }
    Ok(cfg)
}

fn run(args: Args) -> Result<()> {
    let cfg = resolve_config(&args)?;
    let keys = cfg.grouping_keys()?;

    let records = match &args.input {
        Some(path) => read_records_file(path)?,
        None => read_records(io::stdin().lock()).context("read records from stdin")?,
    };
    info!(records = records.len(), keys = %keys, "records loaded");

    let tree = transform(records, &keys)?;

    match &cfg.output {
        Some(path) => {
            if let SinkOutcome::Skipped { reason, .. } = write_tree(&tree, path, &cfg.sink_options())? {
                info!(%reason, "output skipped");
            }
        }
        None => {
            let mut out = io::stdout().lock();
            write_tree_to(&tree, &mut out, cfg.pretty)?;
            out.write_all(b"\n").context("write stdout")?;
        }
    }
    Ok(())
}
