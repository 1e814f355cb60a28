/*
 * Codegraph FlowIR - control/data-flow graph extraction
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Common models (Span)
 * - features/    : Vertical slices (parsing → ir_generation → ir_graph → export)
 * - pipeline/    : Orchestration (source → graph → stats)
 * - config/      : Extractor configuration (presets + YAML)
 *
 * Translation is single-threaded per input; the CLI runs inputs in parallel,
 * one IrSession each.
 */

#![allow(clippy::module_inception)] // Module naming intentional
#![allow(clippy::new_without_default)] // Default impl not always needed
#![allow(clippy::upper_case_acronyms)] // IR, SSA naming

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Shared models and utilities
pub mod shared;

/// Feature modules (parsing, IR generation, IR graph, export)
pub mod features;

/// Pipeline orchestration
pub mod pipeline;

/// Configuration system
pub mod config;

/// Error types
pub mod errors;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::{ExtractorConfig, FreeIdentifierPolicy, Preset};
pub use errors::{ErrorKind, ExtractError, Result};
pub use features::ir_generation::extract_program;
pub use features::ir_graph::{
    verify, verify_with, Edge, EdgeKind, EdgeLabel, Graph, GraphStats, IrSession, Vertex,
    VertexCategory, VertexId, VertexKind, VerifyOptions,
};
pub use pipeline::processor::{process_file, process_files, process_source, ProcessResult};
