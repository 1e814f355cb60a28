//! Parsing ports

mod frontend;

pub use frontend::SourceFrontend;
