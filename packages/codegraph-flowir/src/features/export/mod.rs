//! Export Feature
//!
//! Serializes a finished graph for other tools.
//!
//! ## Structure
//! - `domain/` - ExportFormat
//! - `ports/` - GraphExporter trait
//! - `infrastructure/` - DOT, relation facts, JSON writers

pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use domain::ExportFormat;
pub use infrastructure::{exporters_for, DotExporter, JsonExporter, RelationsExporter};
pub use ports::GraphExporter;
