//! Scanner configuration: platform mapping tables and the enabled
//! provider set.
//!
//! The config file lives at `~/.config/ludex/config.toml`:
//!
//! ```toml
//! [platforms.aliases]
//! nes = "nintendo-entertainment-system"
//!
//! [platforms.versions]
//! ngpc = "ngp"
//!
//! [metadata]
//! sources = ["igdb", "moby", "ss"]
//! ```
//!
//! A missing file or missing `sources` list means all providers are
//! enabled and no folder mappings apply.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use ludex_meta::{MetadataSource, SourceSet};

use crate::error::ScanError;

/// Mapping tables and provider set consumed by the scanner.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanConfig {
    /// Folder slug → canonical platform slug overrides.
    pub platform_aliases: HashMap<String, String>,
    /// Variant platform slug → parent platform slug.
    pub platform_versions: HashMap<String, String>,
    /// Providers permitted to be queried at all.
    pub sources: SourceSet,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            platform_aliases: HashMap::new(),
            platform_versions: HashMap::new(),
            sources: SourceSet::all(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    platforms: PlatformTables,
    #[serde(default)]
    metadata: MetadataTable,
}

#[derive(Debug, Default, Deserialize)]
struct PlatformTables {
    #[serde(default)]
    aliases: HashMap<String, String>,
    #[serde(default)]
    versions: HashMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
struct MetadataTable {
    sources: Option<Vec<MetadataSource>>,
}

impl ScanConfig {
    /// Canonical path to the config file: `~/.config/ludex/config.toml`.
    pub fn config_path() -> PathBuf {
        let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config.join("ludex").join("config.toml")
    }

    /// Load from the canonical path; a missing file yields the default.
    pub fn load() -> Result<Self, ScanError> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self, ScanError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml_str(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(ScanError::Io(e)),
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ScanError> {
        let file: ConfigFile =
            toml::from_str(contents).map_err(|e| ScanError::Config(e.to_string()))?;
        Ok(Self {
            platform_aliases: file.platforms.aliases,
            platform_versions: file.platforms.versions,
            sources: match file.metadata.sources {
                Some(list) => list.into_iter().collect(),
                None => SourceSet::all(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_enables_all_sources() {
        let config = ScanConfig::from_toml_str("").unwrap();
        assert!(config.platform_aliases.is_empty());
        assert!(config.sources.contains(MetadataSource::Igdb));
        assert!(config.sources.contains(MetadataSource::Sgdb));
    }

    #[test]
    fn test_full_config_round_trip() {
        let config = ScanConfig::from_toml_str(
            r#"
            [platforms.aliases]
            nes = "nintendo-entertainment-system"

            [platforms.versions]
            ngpc = "ngp"

            [metadata]
            sources = ["igdb", "moby"]
            "#,
        )
        .unwrap();
        assert_eq!(
            config.platform_aliases.get("nes").map(String::as_str),
            Some("nintendo-entertainment-system")
        );
        assert_eq!(
            config.platform_versions.get("ngpc").map(String::as_str),
            Some("ngp")
        );
        assert_eq!(config.sources.len(), 2);
        assert!(!config.sources.contains(MetadataSource::Ss));
    }

    #[test]
    fn test_explicit_empty_source_list_is_preserved() {
        let config = ScanConfig::from_toml_str("[metadata]\nsources = []\n").unwrap();
        assert!(config.sources.is_empty());
    }

    #[test]
    fn test_unknown_source_is_an_error() {
        let result = ScanConfig::from_toml_str("[metadata]\nsources = [\"gamefaqs\"]\n");
        assert!(matches!(result, Err(ScanError::Config(_))));
    }
}
