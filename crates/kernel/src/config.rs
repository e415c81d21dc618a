//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::module::{DEFAULT_TTL, ValidationMode};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory scanned for module units (default: ./modules).
    pub modules_dir: PathBuf,

    /// How long a loaded module set stays valid (default: 300 seconds).
    pub module_cache_ttl: Duration,

    /// Module names excluded from every snapshot (from DISABLED_MODULES).
    pub disabled_modules: Vec<String>,

    /// Duplicate name/base path handling: off, warn or strict (default: warn).
    pub module_validation: ValidationMode,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let modules_dir = lookup("MODULES_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./modules"));

        let module_cache_ttl = match lookup("MODULE_CACHE_TTL_SECS") {
            Some(v) => Duration::from_secs(
                v.trim()
                    .parse::<u64>()
                    .context("MODULE_CACHE_TTL_SECS must be a valid u64")?,
            ),
            None => DEFAULT_TTL,
        };

        let disabled_modules = lookup("DISABLED_MODULES")
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let module_validation = match lookup("MODULE_VALIDATION") {
            Some(v) => v.parse::<ValidationMode>().context("MODULE_VALIDATION is invalid")?,
            None => ValidationMode::default(),
        };

        Ok(Self {
            modules_dir,
            module_cache_ttl,
            disabled_modules,
            module_validation,
        })
    }
}
