//! Cross-module validation of a loaded module set.
//!
//! Lookup by name and by base path is first-match, and route composition
//! concatenates blindly, so duplicates would otherwise go unnoticed.

use std::collections::HashMap;
use std::str::FromStr;

use atrium_sdk::ModuleDeclaration;

use super::error::ModuleError;

/// What to do with validation findings after a reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Skip the pass entirely.
    Off,
    /// Log each finding and keep the snapshot.
    #[default]
    Warn,
    /// Refuse the snapshot; the reload fails.
    Strict,
}

impl FromStr for ValidationMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "off" => Ok(Self::Off),
            "warn" => Ok(Self::Warn),
            "strict" => Ok(Self::Strict),
            other => anyhow::bail!("unknown validation mode '{other}' (expected off, warn or strict)"),
        }
    }
}

/// Report duplicate names and duplicate base paths, in module order.
pub fn validate_modules(modules: &[ModuleDeclaration]) -> Vec<ModuleError> {
    let mut findings = Vec::new();
    let mut names: HashMap<&str, usize> = HashMap::new();
    let mut base_paths: HashMap<&str, &str> = HashMap::new();

    for module in modules {
        let seen = names.entry(module.name.as_str()).or_insert(0);
        *seen += 1;
        if *seen == 2 {
            findings.push(ModuleError::DuplicateName {
                name: module.name.clone(),
            });
        }

        match base_paths.get(module.base_path.as_str()) {
            Some(first) => findings.push(ModuleError::DuplicateBasePath {
                base_path: module.base_path.clone(),
                first: (*first).to_string(),
                second: module.name.clone(),
            }),
            None => {
                base_paths.insert(module.base_path.as_str(), module.name.as_str());
            }
        }
    }

    findings
}
