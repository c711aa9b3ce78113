//! Lectern CLI - documentation site index generator.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "lectern")]
#[command(about = "Documentation site index generator")]
#[command(version)]
pub struct Cli {
    /// Source and target directories
    #[arg(value_name = "DIR")]
    dirs: Vec<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    // Bad arity is a usage problem, not an error: point at the help text
    // and exit clean, before anything touches the filesystem.
    match cli.dirs.as_slice() {
        [source, target] => commands::build::run(source, target)?,
        [_] => println!("Not enough parameters! For usage help, use 'lectern -h'"),
        _ => println!("Wrong number of parameters! For usage help, use 'lectern -h'"),
    }

    Ok(())
}
