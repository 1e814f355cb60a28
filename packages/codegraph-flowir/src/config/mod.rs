//! Configuration system
//!
//! Preset-based extractor options with versioned YAML overrides.

pub mod error;
pub mod extractor_config;
pub mod preset;

pub use error::{ConfigError, ConfigResult};
pub use extractor_config::{ExtractorConfig, FreeIdentifierPolicy, SUPPORTED_VERSIONS};
pub use preset::Preset;
