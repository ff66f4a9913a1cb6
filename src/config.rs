use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "luasurface.toml";

/// Module name stamped into stubs when none is given
pub const DEFAULT_MODULE_NAME: &str = "ccad.generated";

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scan: ScanConfig,
    pub output: OutputConfig,
}

/// Source discovery and extraction settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Extensions routed to the C++ binding extractor
    pub native_extensions: Vec<String>,
    /// Extensions routed to the Lua extractor
    pub script_extensions: Vec<String>,
    /// Glob patterns of files to skip
    pub exclude: Vec<String>,
    /// Identifiers accepted as receivers of `set_function`
    pub receivers: Vec<String>,
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub module_name: String,
    pub progress: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            native_extensions: ["hpp", "hh", "h", "cpp", "cc", "cxx"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            script_extensions: vec!["lua".to_string()],
            exclude: vec![],
            receivers: ["lua", "L", "state", "state_view"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            module_name: DEFAULT_MODULE_NAME.to_string(),
            progress: false,
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from file or return defaults
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(Error::Io(_)) => Self::default(),
            Err(e) => {
                tracing::warn!("ignoring {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Merge CLI arguments into config (CLI takes precedence)
    pub fn merge_cli(&mut self, module_name: Option<String>) {
        if let Some(name) = module_name {
            self.output.module_name = name;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.scan.native_extensions.is_empty() {
            return Err(Error::config_validation("native_extensions must not be empty"));
        }

        if self.scan.script_extensions.is_empty() {
            return Err(Error::config_validation("script_extensions must not be empty"));
        }

        if self.scan.receivers.is_empty() {
            return Err(Error::config_validation("at least one receiver required"));
        }

        for pattern in &self.scan.exclude {
            glob::Pattern::new(pattern).map_err(|e| {
                Error::config_validation(format!("invalid exclude pattern '{}': {}", pattern, e))
            })?;
        }

        Ok(())
    }
}
