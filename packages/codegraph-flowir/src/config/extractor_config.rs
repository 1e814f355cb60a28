//! Extractor configuration
//!
//! Built from a [`Preset`] and optionally overridden from a versioned YAML
//! file:
//!
//! ```yaml
//! version: 1
//! preset: lenient
//! intern_literals: true
//! entry_name: program
//! ```

use super::error::{ConfigError, ConfigResult};
use super::preset::Preset;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Supported YAML schema versions
pub const SUPPORTED_VERSIONS: &[u32] = &[1];

/// How identifiers without any binding are treated once backpatching is over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FreeIdentifierPolicy {
    /// Fail extraction with `UndefinedSymbol`
    #[default]
    Error,
    /// Keep the placeholder Symbol vertex as an implicit global
    Global,
}

/// Options for one extraction run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    pub free_identifiers: FreeIdentifierPolicy,
    /// Reuse one Literal vertex per distinct literal within a function graph
    pub intern_literals: bool,
    /// Emit BlockBegin/BlockEnd around explicit `{}` blocks
    pub block_markers: bool,
    /// Translate class constructors/methods into subgraphs
    pub class_members: bool,
    /// Run the invariant verifier on the finished graph
    pub verify: bool,
    /// Name carried by the top-level Start vertex
    pub entry_name: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self::preset(Preset::Strict)
    }
}

impl ExtractorConfig {
    pub fn preset(preset: Preset) -> Self {
        let free_identifiers = match preset {
            Preset::Strict => FreeIdentifierPolicy::Error,
            Preset::Lenient => FreeIdentifierPolicy::Global,
        };
        Self {
            free_identifiers,
            intern_literals: false,
            block_markers: false,
            class_members: true,
            verify: true,
            entry_name: "main".to_string(),
        }
    }

    pub fn free_identifiers(mut self, policy: FreeIdentifierPolicy) -> Self {
        self.free_identifiers = policy;
        self
    }

    pub fn intern_literals(mut self, enabled: bool) -> Self {
        self.intern_literals = enabled;
        self
    }

    pub fn block_markers(mut self, enabled: bool) -> Self {
        self.block_markers = enabled;
        self
    }

    pub fn class_members(mut self, enabled: bool) -> Self {
        self.class_members = enabled;
        self
    }

    pub fn verify(mut self, enabled: bool) -> Self {
        self.verify = enabled;
        self
    }

    pub fn entry_name(mut self, name: impl Into<String>) -> Self {
        self.entry_name = name.into();
        self
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.entry_name.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "entry_name".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Parse a versioned YAML document
    pub fn from_yaml(yaml: &str) -> ConfigResult<Self> {
        let file: ConfigFileV1 = serde_yaml::from_str(yaml)?;
        let version = file.version.ok_or(ConfigError::MissingVersion)?;
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(ConfigError::UnsupportedVersion {
                found: version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let preset = match file.preset.as_deref() {
            Some(name) => name.parse::<Preset>()?,
            None => Preset::default(),
        };

        let mut config = Self::preset(preset);
        if let Some(policy) = file.free_identifiers {
            config.free_identifiers = policy;
        }
        if let Some(enabled) = file.intern_literals {
            config.intern_literals = enabled;
        }
        if let Some(enabled) = file.block_markers {
            config.block_markers = enabled;
        }
        if let Some(enabled) = file.class_members {
            config.class_members = enabled;
        }
        if let Some(enabled) = file.verify {
            config.verify = enabled;
        }
        if let Some(name) = file.entry_name {
            config.entry_name = name;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Export as a complete v1 YAML document
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let file = ConfigFileV1 {
            version: Some(1),
            preset: None,
            free_identifiers: Some(self.free_identifiers),
            intern_literals: Some(self.intern_literals),
            block_markers: Some(self.block_markers),
            class_members: Some(self.class_members),
            verify: Some(self.verify),
            entry_name: Some(self.entry_name.clone()),
        };
        Ok(serde_yaml::to_string(&file)?)
    }
}

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFileV1 {
    version: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    preset: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    free_identifiers: Option<FreeIdentifierPolicy>,

    #[serde(skip_serializing_if = "Option::is_none")]
    intern_literals: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    block_markers: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    class_members: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    verify: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    entry_name: Option<String>,
}
