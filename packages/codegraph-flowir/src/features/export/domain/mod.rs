//! Export domain models

mod format;

pub use format::ExportFormat;
