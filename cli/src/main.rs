use anyhow::Context;
use clap::Parser;
use std::{path::PathBuf, process};
use strict_json::{parse_file, parse_file_profiled, Profiler};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Parse a JSON document and print it back in compact form.
#[derive(Debug, Parser)]
#[command(name = "strict-json", version)]
struct Args {
    /// Document to read
    path: PathBuf,

    /// Print a timing report to stderr once done
    #[arg(long)]
    profile: bool,

    /// Only validate, print nothing on success
    #[arg(short, long)]
    quiet: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(args: &Args) -> anyhow::Result<()> {
    let profiler = args.profile.then(Profiler::new);

    let value = match &profiler {
        Some(profiler) => parse_file_profiled(&args.path, profiler),
        None => parse_file(&args.path),
    }
    .with_context(|| format!("failed to parse {}", args.path.display()))?;

    info!(path = %args.path.display(), root = %value.kind(), "document is valid");

    if !args.quiet {
        println!("{}", value);
    }

    if let Some(profiler) = profiler {
        eprint!("{}", profiler.report());
    }

    Ok(())
}

fn main() {
    init_tracing();

    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("error: {:#}", e);
        process::exit(1);
    }
}
