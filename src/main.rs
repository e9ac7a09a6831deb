//! CTF Timeline CLI
//!
//! Converts a decoded kernel trace into a Chrome Trace Event timeline.

use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use std::path::PathBuf;

use ctf_timeline::commands::{execute_convert, validate_args, ConvertArgs, PartialConversion};
use ctf_timeline::utils::config::DEFAULT_OUTPUT_PATH;

/// CTF Timeline - kernel traces for Chrome trace viewers
#[derive(Parser, Debug)]
#[command(name = "ctf-timeline")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Tracing data (directory with the decoded event stream, or the event file)
    #[arg(short, long)]
    trace: PathBuf,

    /// Output path for the Chrome trace JSON
    #[arg(short, long, env = "CTF_TIMELINE_OUTPUT", default_value = DEFAULT_OUTPUT_PATH)]
    output: PathBuf,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let args = ConvertArgs {
        trace_path: cli.trace,
        output_path: cli.output,
        pretty: cli.pretty,
    };

    // Validate args first
    validate_args(&args)?;

    let summary = match execute_convert(args) {
        Ok(summary) => summary,
        Err(e) => {
            // A fatal conversion error still leaves a timeline on disk
            if e.downcast_ref::<PartialConversion>().is_some() {
                println!("Done");
            }
            return Err(e);
        }
    };

    println!("Done");
    println!("{}", summary.describe());
    println!("Timeline written to: {}", summary.output_path.display());

    Ok(())
}
