//! Exporter implementations

mod dot;
mod json;
mod relations;

pub use dot::DotExporter;
pub use json::JsonExporter;
pub use relations::RelationsExporter;

use crate::features::export::domain::ExportFormat;
use crate::features::export::ports::GraphExporter;

/// Exporters for a format selection
pub fn exporters_for(format: ExportFormat) -> Vec<Box<dyn GraphExporter>> {
    format
        .expand()
        .into_iter()
        .filter_map(|f| -> Option<Box<dyn GraphExporter>> {
            match f {
                ExportFormat::Dot => Some(Box::new(DotExporter)),
                ExportFormat::Relations => Some(Box::new(RelationsExporter)),
                ExportFormat::Json => Some(Box::new(JsonExporter::default())),
                ExportFormat::All => None,
            }
        })
        .collect()
}
