//! Convert command implementation.
//!
//! The convert command:
//! 1. Opens the decoded trace
//! 2. Runs every raw event through a conversion session
//! 3. Writes the Chrome trace, even if step 2 failed part-way

use super::models::{ConversionSummary, ConvertArgs, PartialConversion};
use crate::output::{validate_path, write_trace};
use crate::parser::{open_trace, RawEvent};
use crate::timeline::ConversionSession;
use crate::utils::error::SourceError;
use anyhow::{Context, Result};
use log::{debug, error, info};
use std::time::Instant;

/// Execute the convert command
///
/// **Public** - main entry point called from main.rs
///
/// # Arguments
/// * `args` - Convert command arguments
///
/// # Returns
/// Summary of the conversion
///
/// # Errors
/// * Trace cannot be opened
/// * Output file cannot be written
/// * A fatal conversion error; the partial timeline is written first
pub fn execute_convert(args: ConvertArgs) -> Result<ConversionSummary> {
    let start_time = Instant::now();

    info!("Starting conversion of: {}", args.trace_path.display());

    // Step 1: Open trace
    info!("Step 1/3: Opening trace...");
    let source = open_trace(&args.trace_path).with_context(|| {
        format!("Failed to open trace {}", args.trace_path.display())
    })?;

    let summary = convert_events(source, &args)?;

    info!(
        "Conversion completed in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );
    Ok(summary)
}

/// Convert an already opened event stream and write the result
///
/// **Public** - lets callers supply their own raw-event source
///
/// Finalization runs exactly once on every path; a fatal conversion error is
/// returned only after the partial timeline is on disk, with a
/// `PartialConversion` context callers can downcast to.
pub fn convert_events<I>(source: I, args: &ConvertArgs) -> Result<ConversionSummary>
where
    I: IntoIterator<Item = Result<RawEvent, SourceError>>,
{
    // Step 2: Convert
    info!("Step 2/3: Converting events...");
    let mut session = ConversionSession::new();
    let outcome = session.run(source);

    if let Err(e) = &outcome {
        error!("Conversion aborted: {}", e);
    }

    let stats = session.stats();
    let track_count = session.registry().len();
    debug!(
        "Session ended with {} raw events, {} emitted, ISR {:?}",
        stats.raw_events,
        stats.emitted_events,
        session.isr().state()
    );

    // Step 3: Finalize and write
    info!("Step 3/3: Writing timeline...");
    let trace = session.finish();
    if let Err(write_error) = write_trace(&trace, &args.output_path, args.pretty) {
        let error = anyhow::Error::new(write_error).context(format!(
            "Failed to write trace to {}",
            args.output_path.display()
        ));
        return Err(match outcome {
            Err(run_error) => error.context(format!("Conversion aborted: {}", run_error)),
            Ok(_) => error,
        });
    }

    info!("Timeline written to: {}", args.output_path.display());

    let outcome = outcome.with_context(|| PartialConversion {
        emitted_events: stats.emitted_events,
        output_path: args.output_path.clone(),
    })?;

    Ok(ConversionSummary {
        outcome,
        stats,
        track_count,
        output_path: args.output_path.clone(),
    })
}

/// Validate convert arguments
///
/// **Public** - can be called before execute_convert for early validation
pub fn validate_args(args: &ConvertArgs) -> Result<()> {
    if args.trace_path.as_os_str().is_empty() {
        anyhow::bail!("Trace path cannot be empty");
    }

    if !args.trace_path.exists() {
        anyhow::bail!("Trace path does not exist: {}", args.trace_path.display());
    }

    validate_path(&args.output_path).context("Invalid output path")?;

    Ok(())
}
