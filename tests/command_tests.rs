use ctf_timeline::commands::{
    convert_events, execute_convert, validate_args, ConvertArgs, PartialConversion,
};
use ctf_timeline::output::{read_trace, Phase};
use ctf_timeline::parser::RawEvent;
use ctf_timeline::timeline::RunOutcome;
use ctf_timeline::utils::error::SourceError;
use std::path::{Path, PathBuf};

fn args_for(trace_path: &Path, output_path: PathBuf) -> ConvertArgs {
    ConvertArgs {
        trace_path: trace_path.to_path_buf(),
        output_path,
        ..Default::default()
    }
}

#[test]
fn test_validate_args_valid() {
    let temp_dir = tempfile::tempdir().unwrap();
    let args = args_for(temp_dir.path(), temp_dir.path().join("out.json"));

    assert!(validate_args(&args).is_ok());
}

#[test]
fn test_validate_args_empty_trace() {
    let args = ConvertArgs::default();

    assert!(validate_args(&args).is_err());
}

#[test]
fn test_validate_args_missing_trace() {
    let temp_dir = tempfile::tempdir().unwrap();
    let args = args_for(&temp_dir.path().join("missing"), temp_dir.path().join("out.json"));

    assert!(validate_args(&args).is_err());
}

#[test]
fn test_validate_args_output_is_directory() {
    let temp_dir = tempfile::tempdir().unwrap();
    let args = args_for(temp_dir.path(), temp_dir.path().to_path_buf());

    assert!(validate_args(&args).is_err());
}

#[test]
fn test_default_output_path() {
    assert_eq!(ConvertArgs::default().output_path, PathBuf::from("out.json"));
}

#[test]
fn test_execute_convert_end_to_end() {
    let temp_dir = tempfile::tempdir().unwrap();
    std::fs::write(
        temp_dir.path().join("events.jsonl"),
        concat!(
            "{\"name\": \"isr_enter\", \"timestamp_ns\": 1000}\n",
            "{\"name\": \"thread_switched_in\", \"timestamp_ns\": 1000, \"payload\": {\"thread_id\": 8192, \"name\": \"main\"}}\n",
            "{\"name\": \"thread_switched_out\", \"timestamp_ns\": 4000, \"payload\": {\"thread_id\": 8192, \"name\": \"main\"}}\n",
        ),
    )
    .unwrap();
    let output_path = temp_dir.path().join("out.json");

    let summary = execute_convert(args_for(temp_dir.path(), output_path.clone())).unwrap();

    assert_eq!(summary.outcome, RunOutcome::Completed);
    assert_eq!(summary.stats.raw_events, 3);
    assert_eq!(summary.stats.emitted_events, 4);
    assert_eq!(summary.track_count, 1);

    let trace = read_trace(&output_path).unwrap();
    assert_eq!(trace.trace_events.len(), 4 + 8 + 1);
    assert_eq!(trace.trace_events[1].phase, Phase::End);
    assert_eq!(trace.trace_events[1].track_id, 1);
}

#[test]
fn test_fatal_error_still_writes_partial_timeline() {
    let temp_dir = tempfile::tempdir().unwrap();
    let output_path = temp_dir.path().join("out.json");
    let source = vec![
        RawEvent::new("isr_enter", 1000),
        RawEvent::new("isr_exit", 2000),
        RawEvent::new("flux_capacitor_event", 3000),
        RawEvent::new("isr_enter", 4000),
    ];

    let result = convert_events(
        source.into_iter().map(Ok),
        &args_for(temp_dir.path(), output_path.clone()),
    );

    let error = result.unwrap_err();
    assert!(format!("{:#}", error).contains("flux_capacitor_event"));
    assert_eq!(
        error.downcast_ref::<PartialConversion>(),
        Some(&PartialConversion {
            emitted_events: 2,
            output_path: output_path.clone(),
        })
    );

    let trace = read_trace(&output_path).unwrap();
    let timeline: Vec<_> = trace
        .trace_events
        .iter()
        .filter(|e| e.phase != Phase::Metadata)
        .collect();
    assert_eq!(timeline.len(), 2);
    assert_eq!(trace.trace_events.len(), 2 + 8);
}

#[test]
fn test_malformed_line_still_writes_partial_timeline() {
    let temp_dir = tempfile::tempdir().unwrap();
    std::fs::write(
        temp_dir.path().join("events.jsonl"),
        concat!(
            "{\"name\": \"timer_start\", \"timestamp_ns\": 1000}\n",
            "{\"name\": \"timer_stop\", \"timestamp_ns\": \n",
            "{\"name\": \"timer_start\", \"timestamp_ns\": 3000}\n",
        ),
    )
    .unwrap();
    let output_path = temp_dir.path().join("out.json");

    let error = execute_convert(args_for(temp_dir.path(), output_path.clone())).unwrap_err();

    assert!(format!("{:#}", error).contains("line 2"));
    assert!(error.downcast_ref::<PartialConversion>().is_some());
    assert_eq!(read_trace(&output_path).unwrap().trace_events.len(), 1 + 8);
}

#[test]
fn test_write_failure_keeps_conversion_error() {
    let temp_dir = tempfile::tempdir().unwrap();
    let source = vec![
        RawEvent::new("isr_enter", 1000),
        RawEvent::new("flux_capacitor_event", 2000),
    ];

    // Output path is a directory, so the write fails
    let error = convert_events(
        source.into_iter().map(Ok),
        &args_for(temp_dir.path(), temp_dir.path().to_path_buf()),
    )
    .unwrap_err();

    let message = format!("{:#}", error);
    assert!(message.contains("flux_capacitor_event"));
    assert!(message.contains("Failed to write trace"));
    assert!(error.downcast_ref::<PartialConversion>().is_none());
}

#[test]
fn test_truncated_source_is_not_an_error() {
    let temp_dir = tempfile::tempdir().unwrap();
    let output_path = temp_dir.path().join("out.json");
    let source = vec![
        Ok(RawEvent::new("timer_start", 1000)),
        Err(SourceError::Truncated { line: 2 }),
    ];

    let summary = convert_events(source, &args_for(temp_dir.path(), output_path.clone())).unwrap();

    assert_eq!(summary.outcome, RunOutcome::Truncated);
    assert!(summary.describe().contains("trace truncated"));
    assert_eq!(read_trace(&output_path).unwrap().trace_events.len(), 1 + 8);
}

#[test]
fn test_empty_trace_writes_metadata_only() {
    let temp_dir = tempfile::tempdir().unwrap();
    std::fs::write(temp_dir.path().join("events.jsonl"), "").unwrap();
    let output_path = temp_dir.path().join("out.json");

    execute_convert(args_for(temp_dir.path(), output_path.clone())).unwrap();

    let trace = read_trace(&output_path).unwrap();
    assert_eq!(trace.trace_events.len(), 8);
    assert!(trace
        .trace_events
        .iter()
        .all(|e| e.phase == Phase::Metadata));
}
