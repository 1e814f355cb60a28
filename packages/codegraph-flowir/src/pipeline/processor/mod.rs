//! Per-file processing
//!
//! # Module Organization
//!
//! - `types`: ProcessResult
//! - `language`: front-end selection by file extension
//! - `main`: entry points

pub mod language;
mod main;
pub mod types;

pub use language::frontend_for_file;
pub use main::{process_file, process_files, process_source};
pub use types::ProcessResult;
