//! Configuration file support for lbal.
//!
//! lbal supports two configuration file locations:
//! - Global: `~/.lbal/config.toml` - User-wide defaults
//! - Project: `.lbal/config.toml` - Project-specific settings
//!
//! Project config takes precedence over global config, key by key.
//! Command-line flags take precedence over both. A config file that
//! exists but cannot be read or parsed is an error: silently dropping it
//! would drop its overrides too.
//!
//! ```toml
//! [probe]
//! cxx = "/usr/bin/clang++"
//! std = "c++20"
//! flags = ["-stdlib=libc++"]
//!
//! [resolve]
//! validate-overrides = true
//! format = "header"
//!
//! [overrides]
//! LBAL_RTTI = false
//! LBAL_CPP17_IF_CONSTEXPR = 201606
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::{CppStandard, OverrideSet};
use crate::ops::emit::OutputFormat;

/// lbal configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Compiler probing
    pub probe: ProbeConfig,

    /// Resolution settings
    pub resolve: ResolveConfig,

    /// Capability overrides
    pub overrides: OverrideSet,
}

/// How to probe the compiler.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Path to the C++ compiler (e.g., /usr/bin/clang++)
    pub cxx: Option<PathBuf>,

    /// Language standard to probe with
    pub std: Option<CppStandard>,

    /// Additional flags (e.g., `--target=aarch64-linux-gnu`)
    pub flags: Vec<String>,
}

/// Resolution settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ResolveConfig {
    /// Check overrides against direct probes
    pub validate_overrides: Option<bool>,

    /// Default output format (header, json, text)
    pub format: Option<String>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration, or defaults if the file doesn't exist.
    pub fn load_if_exists(path: &Path) -> Result<Self> {
        if path.exists() {
            tracing::debug!("loading config {}", path.display());
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        // Probe settings
        if other.probe.cxx.is_some() {
            self.probe.cxx = other.probe.cxx;
        }
        if other.probe.std.is_some() {
            self.probe.std = other.probe.std;
        }
        if !other.probe.flags.is_empty() {
            self.probe.flags = other.probe.flags;
        }

        // Resolve settings
        if other.resolve.validate_overrides.is_some() {
            self.resolve.validate_overrides = other.resolve.validate_overrides;
        }
        if other.resolve.format.is_some() {
            self.resolve.format = other.resolve.format;
        }

        // Overrides merge per capability
        self.overrides.merge(other.overrides);
    }

    /// Parse output format from config string.
    pub fn format(&self) -> Result<Option<OutputFormat>> {
        self.resolve
            .format
            .as_deref()
            .map(|s| {
                s.parse::<OutputFormat>()
                    .with_context(|| format!("invalid `format` in [resolve] config: {}", s))
            })
            .transpose()
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.lbal/config.toml)
/// 2. Global config (~/.lbal/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Result<Config> {
    let mut config = Config::default();

    // Load global config first
    if let Some(global_path) = global_path {
        config.merge(Config::load_if_exists(global_path)?);
    }

    // Project config overrides global
    config.merge(Config::load_if_exists(project_path)?);

    Ok(config)
}

/// Get the global lbal config directory (~/.lbal).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".lbal"))
}

/// Get the global config path (~/.lbal/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.lbal/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".lbal").join("config.toml")
}
