use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use dosgictl::cmd_dump;
use dosgictl::cmd_scan;

#[derive(Parser, Debug)]
#[command(name = "dosgictl", version, about = "Remote service descriptor CLI")]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
    /// Output JSON where applicable
    #[arg(long)]
    json: bool,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Discover endpoint descriptions in a deployment unit directory
    Scan {
        /// Unit root directory
        root: PathBuf,
        /// Print the properties of each endpoint
        #[arg(long)]
        properties: bool,
    },
    /// Dump the endpoints of a single descriptor file
    Dump {
        /// Descriptor XML file
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let Cli { verbose, json, cmd } = Cli::parse();

    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| level.into()),
        ))
        .with_target(false)
        .init();

    match cmd {
        Cmd::Scan { root, properties } => cmd_scan::run(&root, properties, json)?,
        Cmd::Dump { file } => cmd_dump::run(&file, json)?,
    };

    Ok(())
}
