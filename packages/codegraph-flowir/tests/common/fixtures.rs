//! Extraction fixtures

use codegraph_flowir::config::{ExtractorConfig, Preset};
use codegraph_flowir::features::parsing::SourceUnit;
use codegraph_flowir::{extract_program, process_source, ExtractError, Graph};

/// Extract a TypeScript snippet with the strict preset
pub fn extract(source: &str) -> Graph {
    extract_with(source, &ExtractorConfig::default())
}

pub fn extract_with(source: &str, config: &ExtractorConfig) -> Graph {
    match process_source(source, "fixture.ts", config) {
        Ok(result) => result.graph,
        Err(e) => panic!("extraction failed: {}\n--- source ---\n{}", e, source),
    }
}

pub fn extract_lenient(source: &str) -> Graph {
    extract_with(source, &ExtractorConfig::preset(Preset::Lenient))
}

/// Extraction that must fail
pub fn extract_err(source: &str) -> ExtractError {
    match process_source(source, "fixture.ts", &ExtractorConfig::default()) {
        Ok(result) => panic!("expected failure, got graph with stats {}", result.stats),
        Err(e) => e,
    }
}

/// Extract a hand-built AST
pub fn extract_unit(unit: SourceUnit) -> Graph {
    match extract_program(&[unit], &ExtractorConfig::default()) {
        Ok(graph) => graph,
        Err(e) => panic!("extraction failed: {}", e),
    }
}
