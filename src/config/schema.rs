//! Configuration schema for uidl
//!
//! Global configuration lives at `~/.config/uidl/config.toml`; a project
//! `uidl.toml` overrides individual keys.

use crate::cache::PublishPolicy;
use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Code generator settings
    pub generator: GeneratorConfig,

    /// Model metadata cache settings
    pub cache: CacheConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
        }
    }
}

/// Code generator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Package of the generated modules when `--package` is not given
    pub package: Option<String>,

    /// File extension of schema sources
    pub extension: String,

    /// Always regenerate, ignoring the stored fingerprint
    pub force: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            package: None,
            extension: "dto".to_string(),
            force: false,
        }
    }
}

/// Metadata cache configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// How concurrent misses publish: "blind" or "compare_and_swap"
    pub publish: PublishPolicy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[general]"));
        assert!(toml.contains("[generator]"));
        assert!(toml.contains("publish = \"blind\""));
    }

    #[test]
    fn config_deserializes_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.generator.extension, "dto");
        assert_eq!(config.cache.publish, PublishPolicy::Blind);
    }

    #[test]
    fn config_deserializes_partial() {
        let toml = r#"
            [cache]
            publish = "compare_and_swap"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.cache.publish, PublishPolicy::CompareAndSwap);
        assert_eq!(config.general.log_format, "text"); // default preserved
    }

    #[test]
    fn unknown_policy_rejected() {
        let result: Result<Config, _> = toml::from_str("[cache]\npublish = \"sometimes\"");
        assert!(result.is_err());
    }
}
