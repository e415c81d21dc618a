//! Module scaffolding.
//!
//! Generates a new module unit: a directory named after the module in
//! kebab-case holding a stub manifest with no routes and no navigation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use atrium_sdk::ModuleDeclaration;
use tracing::info;

use super::error::ModuleError;
use super::manifest::{self, MANIFEST_SUFFIX};

/// Convert a module name to kebab-case.
///
/// `SchedulePlanner`, `schedule_planner` and `Schedule Planner` all become
/// `schedule-planner`.
pub fn to_kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev: Option<char> = None;

    for c in name.chars() {
        if c.is_alphanumeric() {
            if c.is_uppercase()
                && prev.is_some_and(|p| p.is_lowercase() || p.is_ascii_digit())
                && !out.ends_with('-')
            {
                out.push('-');
            }
            out.extend(c.to_lowercase());
        } else if !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
        prev = Some(c);
    }

    out.trim_end_matches('-').to_string()
}

/// The stub declaration written for a fresh module.
pub fn stub_declaration(name: &str) -> Result<ModuleDeclaration, ModuleError> {
    let slug = to_kebab_case(name);
    if slug.is_empty() {
        return Err(ModuleError::InvalidName {
            name: name.to_string(),
        });
    }

    Ok(ModuleDeclaration::new(name.trim(), format!("/{slug}")))
}

/// Create `<modules_dir>/<kebab>/<kebab>.module.toml`.
///
/// Returns the path of the written manifest. Never overwrites an existing
/// module directory.
pub fn scaffold_module(modules_dir: &Path, name: &str) -> Result<PathBuf> {
    let declaration = stub_declaration(name)?;
    let slug = to_kebab_case(name);
    let unit_dir = modules_dir.join(&slug);

    if unit_dir.exists() {
        return Err(ModuleError::AlreadyExists {
            module: declaration.name,
            path: unit_dir.display().to_string(),
        }
        .into());
    }

    std::fs::create_dir_all(&unit_dir)
        .with_context(|| format!("failed to create module directory {}", unit_dir.display()))?;

    let manifest_path = unit_dir.join(format!("{slug}{MANIFEST_SUFFIX}"));
    let body = manifest::to_toml(&declaration)?;
    std::fs::write(&manifest_path, body)
        .with_context(|| format!("failed to write manifest {}", manifest_path.display()))?;

    info!(
        module = %declaration.name,
        path = %manifest_path.display(),
        "module scaffolded"
    );
    Ok(manifest_path)
}
