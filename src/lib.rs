//! CTF Timeline
//!
//! Converts kernel tracing events (thread switches, interrupts,
//! semaphores, GPIO, named markers) into Chrome Trace Event timelines
//! viewable in chrome://tracing or Perfetto.
//!
//! This crate provides the core implementation for the
//! `ctf-timeline` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! ctf-timeline --trace path/to/trace
//! ```

pub mod commands;
pub mod output;
pub mod parser;
pub mod timeline;
pub mod utils;
