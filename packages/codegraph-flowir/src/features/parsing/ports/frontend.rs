//! Source front-end port (interface)
//!
//! Defines the contract for turning source text into the AST the IR
//! translator consumes.

use crate::errors::Result;
use crate::features::parsing::domain::SourceUnit;

/// Front-end trait - abstraction over the parser and AST lowering
pub trait SourceFrontend: Send + Sync {
    /// Parse and lower `source` into a compilation unit
    fn parse(&self, source: &str, file_path: &str) -> Result<SourceUnit>;

    /// Check if this front-end handles the given file extension
    fn supports_extension(&self, ext: &str) -> bool;

    /// Get supported language name
    fn language_name(&self) -> &'static str;
}
