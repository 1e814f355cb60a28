//! Export ports

mod exporter;

pub use exporter::GraphExporter;
