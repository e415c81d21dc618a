//! Module system error types with clear, actionable messages.
//!
//! Every error names the module (or module directory) and the path involved so
//! a misconfigured unit can be found without reading logs twice.

use thiserror::Error;

/// Errors raised while discovering, validating or scaffolding modules.
#[derive(Debug, Error)]
pub enum ModuleError {
    /// Module directory is missing its `.module.toml` manifest.
    #[error("module '{module}': no .module.toml manifest found in {path}")]
    MissingManifest { module: String, path: String },

    /// More than one manifest in a single module directory.
    #[error("module directory '{path}': multiple .module.toml files found, expected exactly one")]
    MultipleManifests { path: String },

    /// The manifest could not be parsed or failed validation.
    #[error("module '{module}': invalid manifest at {path}: {details}")]
    InvalidManifest {
        module: String,
        path: String,
        details: String,
    },

    /// The modules root could not be read at all.
    #[error("modules directory {path} is unavailable: {details}")]
    SourceUnavailable { path: String, details: String },

    /// Two loaded modules share a name.
    #[error("module name '{name}' is declared more than once")]
    DuplicateName { name: String },

    /// Two loaded modules share a base path.
    #[error("base path '{base_path}' is claimed by both '{first}' and '{second}'")]
    DuplicateBasePath {
        base_path: String,
        first: String,
        second: String,
    },

    /// Strict validation rejected a freshly loaded module set.
    #[error("module validation failed: {}", .findings.join("; "))]
    ValidationFailed { findings: Vec<String> },

    /// Scaffold target already exists.
    #[error("module '{module}' already exists at {path}")]
    AlreadyExists { module: String, path: String },

    /// Scaffold name yields an empty directory name.
    #[error("'{name}' is not a usable module name")]
    InvalidName { name: String },
}

impl ModuleError {
    /// Create a missing manifest error from a module directory path.
    pub fn missing_manifest(path: impl Into<String>) -> Self {
        let path = path.into();
        let module = std::path::Path::new(&path)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();
        Self::MissingManifest { module, path }
    }

    /// Create an invalid manifest error.
    pub fn invalid_manifest(
        module: impl Into<String>,
        path: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self::InvalidManifest {
            module: module.into(),
            path: path.into(),
            details: details.into(),
        }
    }
}
