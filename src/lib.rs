//! Shift Ledger - employee attendance and sales ledger.
//!
//! This crate provides the core functionality for the `shiftledger` CLI.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface using clap, plus the interactive menu
//! - [`model`] - Data types (Employee, AttendanceRecord, Sale, Amount)
//! - [`storage`] - SQLite database layer and monthly reports
//! - [`config`] - Database path resolution
//! - [`validate`] - Parsing of operator input
//! - [`error`] - Error types and handling

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod storage;
pub mod validate;

pub use error::{Error, Result};

/// Global CSV output flag (set when `--format csv`).
pub static CSV_OUTPUT: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(false);

/// Check if CSV output is requested.
#[inline]
pub fn is_csv() -> bool {
    CSV_OUTPUT.load(std::sync::atomic::Ordering::Relaxed)
}

/// Escape a value for CSV output (wrap in quotes if it contains commas, quotes, or newlines).
pub fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
