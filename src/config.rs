//! Engine configuration
//!
//! Stored as pretty-printed JSON. Every field has a default, so a missing
//! file is not an error for hosts that call [`MacroConfig::default`].

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

use crate::error::{ConfigError, ConfigResult};

/// Configuration for the compiler and player
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacroConfig {
    /// Compiler settings
    pub compiler: CompilerConfig,

    /// Enable debug tracing
    pub debug: bool,
}

/// Settings that shape how counts are read from macro source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Maximum number of leading characters read from a count token
    pub count_digits: usize,

    /// Count used when a line has none, or an unusable one
    pub default_count: usize,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            count_digits: 3,
            default_count: 1,
        }
    }
}

impl MacroConfig {
    /// Most verbose tracing level hosts should enable.
    pub fn log_level(&self) -> tracing::Level {
        if self.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// Reject values the compiler cannot work with.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.compiler.count_digits == 0 {
            return Err(ConfigError::Invalid(
                "compiler.count_digits must be at least 1".into(),
            ));
        }
        if self.compiler.default_count == 0 {
            return Err(ConfigError::Invalid(
                "compiler.default_count must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Write configuration to `path`
pub fn write_config(path: &Path, config: &MacroConfig) -> ConfigResult<()> {
    let json = serde_json::to_vec_pretty(config)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, json)?;
    Ok(())
}

/// Load configuration from `path`
pub fn load_config(path: &Path) -> ConfigResult<MacroConfig> {
    let data = fs::read(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => ConfigError::NotFound(path.to_path_buf()),
        _ => ConfigError::Io(err),
    })?;
    let config: MacroConfig = serde_json::from_slice(&data)?;
    config.validate()?;
    Ok(config)
}
