//! IR Generation Feature
//!
//! Lowers the AST into the control/data-flow graph.
//!
//! ## Structure
//! - `domain/` - symbol table, semantics accumulator, backpatch table
//! - `ports/` - IrExtractor trait
//! - `application/` - ExtractIrUseCase, extract_program
//! - `infrastructure/` - Translator, loop pre-scan

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::{extract_program, ExtractIrUseCase};
pub use infrastructure::TranslatingExtractor;
pub use ports::IrExtractor;
