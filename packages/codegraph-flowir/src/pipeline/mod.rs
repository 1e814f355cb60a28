//! Pipeline orchestration
//!
//! source → AST (front-end) → graph (translator) → verify → stats

pub mod processor;

pub use processor::{process_file, process_files, process_source, ProcessResult};
