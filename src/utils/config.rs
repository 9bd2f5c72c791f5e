// src/utils/config.rs
use config::{Config as ConfigLib, ConfigError, Environment, File};
use parking_lot::RwLock;
use serde::Deserialize;

use crate::utils::error::{GateError, Result};

/// Configured version bounds plus the one output slot the gate writes.
#[derive(Debug, Deserialize)]
pub struct GateConfig {
    pub bounds: BoundsConfig,
    pub plugin: PluginConfig,

    /// Server minor version detected at startup. Written exactly once, by the
    /// gate, only when every check has passed; readers elsewhere in the host
    /// treat None as "gate not yet passed".
    #[serde(skip)]
    server_minor: RwLock<Option<u64>>,
}

#[derive(Debug, Deserialize)]
pub struct BoundsConfig {
    /// Oldest platform version the plugin runs on.
    pub min_platform_version: String,
    /// Newest platform version known to work; binding on the community
    /// edition only.
    pub latest_platform_version: String,
    /// Oldest supported host-runtime version.
    pub min_runtime_version: String,
    /// Oldest plugin release still considered valid off the dev branch.
    pub min_patch_version: String,
}

#[derive(Debug, Deserialize)]
pub struct PluginConfig {
    pub name: String,
    pub platform_name: String,
    pub runtime_name: String,
}

impl GateConfig {
    /// Build a config from already-known bounds, for hosts that carry their
    /// own configuration store.
    pub fn from_parts(bounds: BoundsConfig, plugin: PluginConfig) -> Result<Self> {
        let config = Self {
            bounds,
            plugin,
            server_minor: RwLock::new(None),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn new() -> Result<Self> {
        Self::load(None)
    }

    /// Load from an explicit config file instead of the config/ directory.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        Self::load(Some(path))
    }

    fn load(file: Option<&std::path::Path>) -> Result<Self> {
        let mut builder = ConfigLib::builder()
            // Start with default values
            .set_default("bounds.min_platform_version", "1.18")?
            .set_default("bounds.latest_platform_version", "1.21")?
            .set_default("bounds.min_runtime_version", "17")?
            .set_default("bounds.min_patch_version", env!("CARGO_PKG_VERSION"))?
            .set_default("plugin.name", env!("CARGO_PKG_NAME"))?
            .set_default("plugin.platform_name", "Server")?
            .set_default("plugin.runtime_name", "Runtime")?;

        // Load from config file
        builder = match file {
            Some(path) => builder.add_source(File::from(path.to_path_buf())),
            None => builder
                .add_source(File::with_name("config/default").required(false))
                .add_source(File::with_name("config/local").required(false)),
        };

        // Override with environment variables
        // (e.g., LAUNCHGATE__BOUNDS__MIN_PLATFORM_VERSION)
        let config = builder
            .add_source(Environment::with_prefix("LAUNCHGATE").separator("__"))
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let bounds = [
            ("min_platform_version", &self.bounds.min_platform_version),
            ("latest_platform_version", &self.bounds.latest_platform_version),
            ("min_runtime_version", &self.bounds.min_runtime_version),
            ("min_patch_version", &self.bounds.min_patch_version),
        ];
        for (name, value) in bounds {
            if value.is_empty() {
                return Err(GateError::Config(format!("{} must be set", name)));
            }
        }

        if self.plugin.name.is_empty() {
            return Err(GateError::Config("plugin name must be set".into()));
        }

        Ok(())
    }

    pub fn server_minor(&self) -> Option<u64> {
        *self.server_minor.read()
    }

    pub(crate) fn store_server_minor(&self, minor: u64) {
        *self.server_minor.write() = Some(minor);
    }
}

impl From<ConfigError> for GateError {
    fn from(error: ConfigError) -> Self {
        GateError::Config(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> GateConfig {
        GateConfig::from_parts(
            BoundsConfig {
                min_platform_version: "1.18".into(),
                latest_platform_version: "1.21".into(),
                min_runtime_version: "17".into(),
                min_patch_version: "2.0.0".into(),
            },
            PluginConfig {
                name: "launchgate".into(),
                platform_name: "Server".into(),
                runtime_name: "Runtime".into(),
            },
        )
        .unwrap()
    }

    #[test]
    fn test_from_file_overrides_defaults() {
        use std::io::Write;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gate.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[bounds]\nmin_platform_version = \"1.20\"\n\n[plugin]\nname = \"testplugin\""
        )
        .unwrap();

        let config = GateConfig::from_file(&path).unwrap();
        assert_eq!(config.bounds.min_platform_version, "1.20");
        assert_eq!(config.plugin.name, "testplugin");
        // Untouched keys keep their defaults.
        assert_eq!(config.bounds.min_runtime_version, "17");
    }

    #[test]
    fn test_validate_rejects_empty_bound() {
        let mut config = test_config();
        config.bounds.min_runtime_version.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_server_minor_slot_starts_empty() {
        let config = test_config();
        assert_eq!(config.server_minor(), None);
        config.store_server_minor(21);
        assert_eq!(config.server_minor(), Some(21));
    }
}
