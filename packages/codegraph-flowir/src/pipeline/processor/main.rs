//! Processing entry points

use super::language::frontend_for_file;
use super::types::ProcessResult;
use crate::config::ExtractorConfig;
use crate::errors::Result;
use crate::features::ir_generation::extract_program;
use crate::features::parsing::ports::SourceFrontend;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info_span};

/// Parse and extract a single source text. `file_path` selects the
/// front-end and labels diagnostics.
pub fn process_source(source: &str, file_path: &str, config: &ExtractorConfig) -> Result<ProcessResult> {
    let _span = info_span!("process", file = file_path).entered();
    let started = Instant::now();

    let frontend = frontend_for_file(Path::new(file_path))?;
    let unit = frontend.parse(source, file_path)?;
    let graph = extract_program(std::slice::from_ref(&unit), config)?;

    let result = ProcessResult::new(file_path, graph, started.elapsed());
    debug!(elapsed_ms = result.elapsed.as_millis() as u64, "processed");
    Ok(result)
}

pub fn process_file(path: &Path, config: &ExtractorConfig) -> Result<ProcessResult> {
    let source = fs::read_to_string(path)?;
    process_source(&source, &path.to_string_lossy(), config)
}

/// Process inputs in parallel; every input gets its own session, so results
/// do not depend on scheduling. Output order follows `paths`.
pub fn process_files(paths: &[PathBuf], config: &ExtractorConfig) -> Vec<(PathBuf, Result<ProcessResult>)> {
    paths
        .par_iter()
        .map(|path| (path.clone(), process_file(path, config)))
        .collect()
}
