use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use crate::core::mapping::MappingTable;
use crate::encoders::shape::OutputShape;
use crate::errors::{ConfigError, MappingNotFoundError, find_closest_mapping};

/// Name of the built-in code page 437 preset.
pub const DEFAULT_MAPPING: &str = "base437";

/// A named mapping preset loaded from TOML.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct MappingConfig {
    /// Short human-readable summary shown by `--list`
    #[serde(default)]
    pub description: Option<String>,
    /// Byte overrides applied over the default table, keyed by decimal byte
    /// value: `{ "34" = "U+201C" }`
    #[serde(default)]
    pub overrides: BTreeMap<String, String>,
}

impl MappingConfig {
    /// Applies the overrides over the default table and validates the result.
    pub fn build(&self) -> Result<MappingTable, crate::errors::MappingError> {
        MappingTable::from_overrides(
            self.overrides
                .iter()
                .map(|(key, literal)| (key.as_str(), literal.as_str())),
        )
    }
}

/// Global settings for base437.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Settings {
    /// Preset used when none is named explicitly
    #[serde(default)]
    pub default_mapping: Option<String>,
    /// Default output shape for decoding
    #[serde(default)]
    pub output: Option<OutputShape>,
}

/// Collection of mapping presets loaded from TOML files.
#[derive(Debug, Deserialize)]
pub struct MappingRegistry {
    /// Map of preset names to their configurations
    #[serde(default)]
    pub mappings: HashMap<String, MappingConfig>,
    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

impl MappingRegistry {
    /// Parses mapping presets from TOML content.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Loads the presets compiled into the binary.
    pub fn load_default() -> Result<Self, ConfigError> {
        let content = include_str!("../../mappings.toml");
        Self::from_toml(content)
    }

    /// Load configuration from custom file path
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load configuration with user overrides from standard locations
    /// 1. Start with built-in presets
    /// 2. Override with ~/.config/base437/mappings.toml if it exists
    /// 3. Override with ./mappings.toml if it exists in current directory
    pub fn load_with_overrides() -> Result<Self, ConfigError> {
        let mut config = Self::load_default()?;

        if let Some(config_dir) = dirs::config_dir() {
            let user_config_path = config_dir.join("base437").join("mappings.toml");
            config.merge_file(&user_config_path);
        }

        config.merge_file(Path::new("mappings.toml"));

        Ok(config)
    }

    fn merge_file(&mut self, path: &Path) {
        if !path.exists() {
            return;
        }

        match Self::load_from_file(path) {
            Ok(other) => {
                tracing::debug!(
                    path = %path.display(),
                    presets = other.mappings.len(),
                    "merging mapping presets"
                );
                self.merge(other);
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to load mapping presets"
                );
            }
        }
    }

    /// Merge another registry into this one, overriding existing presets
    pub fn merge(&mut self, other: MappingRegistry) {
        self.mappings.extend(other.mappings);

        if other.settings.default_mapping.is_some() {
            self.settings.default_mapping = other.settings.default_mapping;
        }
        if other.settings.output.is_some() {
            self.settings.output = other.settings.output;
        }
    }

    pub fn get_mapping(&self, name: &str) -> Option<&MappingConfig> {
        self.mappings.get(name)
    }

    /// Preset names in sorted order.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.mappings.keys().cloned().collect();
        names.sort();
        names
    }

    /// The preset to use when none is named: settings first, then `base437`.
    pub fn default_name(&self) -> &str {
        self.settings
            .default_mapping
            .as_deref()
            .unwrap_or(DEFAULT_MAPPING)
    }

    /// Builds and validates the named preset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] with a spelling suggestion for an
    /// unknown name, or [`ConfigError::Mapping`] if the preset's overrides
    /// are invalid.
    pub fn build(&self, name: &str) -> Result<MappingTable, ConfigError> {
        let config = self.get_mapping(name).ok_or_else(|| {
            let suggestion = find_closest_mapping(name, &self.names());
            MappingNotFoundError::new(name, suggestion)
        })?;

        config.build().map_err(|source| ConfigError::Mapping {
            name: name.to_string(),
            source,
        })
    }
}

/// Reads a JSON mapping document (`{"34": "U+201C", ...}`) and builds a
/// validated table from it. Entries absent from the document keep their
/// default code point.
pub fn import_mapping_document(content: &str) -> Result<MappingTable, ConfigError> {
    let entries: BTreeMap<String, String> = serde_json::from_str(content)?;

    MappingTable::from_overrides(
        entries
            .iter()
            .map(|(key, literal)| (key.as_str(), literal.as_str())),
    )
    .map_err(|source| ConfigError::Mapping {
        name: "document".to_string(),
        source,
    })
}

/// Renders a table as a pretty-printed JSON mapping document.
pub fn export_mapping_document(table: &MappingTable) -> Result<String, ConfigError> {
    Ok(serde_json::to_string_pretty(table)?)
}
