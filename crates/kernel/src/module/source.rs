//! Module sources: where the registry gets its declarations from.
//!
//! A source answers one question, "what modules exist right now?", and is
//! called again every time the registry's snapshot goes stale.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use atrium_sdk::ModuleDeclaration;
use parking_lot::RwLock;
use tracing::{debug, info, warn};

use super::error::ModuleError;
use super::manifest::{self, MANIFEST_SUFFIX};

/// Returns every discoverable module declaration, eagerly.
///
/// An `Err` is a loader failure and propagates to whoever asked the registry
/// for modules. Individual malformed units must be skipped, not reported here.
pub trait ModuleSource: Send + Sync {
    fn load(&self) -> Result<Vec<ModuleDeclaration>>;
}

impl<S: ModuleSource + ?Sized> ModuleSource for Arc<S> {
    fn load(&self) -> Result<Vec<ModuleDeclaration>> {
        (**self).load()
    }
}

/// Scans a directory of module units.
///
/// Each immediate subdirectory is a unit and must contain exactly one
/// `{name}.module.toml` manifest. Units are visited in directory-name order.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Locate the manifest inside one module unit.
    fn find_manifest(unit_dir: &Path) -> Result<PathBuf, ModuleError> {
        let entries = std::fs::read_dir(unit_dir).map_err(|e| {
            ModuleError::invalid_manifest(
                unit_name(unit_dir),
                unit_dir.display().to_string(),
                format!("failed to read module directory: {e}"),
            )
        })?;

        let mut manifests: Vec<PathBuf> = entries
            .filter_map(|entry| readable_entry(entry, unit_dir))
            .filter(|p| {
                p.is_file()
                    && p.file_name()
                        .and_then(|n| n.to_str())
                        .is_some_and(|n| n.ends_with(MANIFEST_SUFFIX))
            })
            .collect();

        match manifests.len() {
            0 => Err(ModuleError::missing_manifest(
                unit_dir.display().to_string(),
            )),
            1 => Ok(manifests.remove(0)),
            _ => Err(ModuleError::MultipleManifests {
                path: unit_dir.display().to_string(),
            }),
        }
    }

    fn load_unit(unit_dir: &Path) -> Result<ModuleDeclaration, ModuleError> {
        let manifest_path = Self::find_manifest(unit_dir)?;
        manifest::parse(&manifest_path)
    }
}

impl ModuleSource for DirectorySource {
    fn load(&self) -> Result<Vec<ModuleDeclaration>> {
        let read = std::fs::read_dir(&self.root).map_err(|e| ModuleError::SourceUnavailable {
            path: self.root.display().to_string(),
            details: e.to_string(),
        })?;

        let mut units: Vec<PathBuf> = read
            .filter_map(|entry| readable_entry(entry, &self.root))
            .filter(|p| p.is_dir())
            .collect();

        // Sort for deterministic module order
        units.sort();

        let mut modules = Vec::with_capacity(units.len());
        for unit_dir in units {
            match Self::load_unit(&unit_dir) {
                Ok(module) => {
                    debug!(module = %module.name, dir = %unit_dir.display(), "module discovered");
                    modules.push(module);
                }
                Err(e) => {
                    warn!(dir = %unit_dir.display(), error = %e, "skipping module unit");
                }
            }
        }

        info!(
            root = %self.root.display(),
            modules = modules.len(),
            "module directory scanned"
        );
        Ok(modules)
    }
}

/// Path of a directory entry, or `None` (with a warning) if it can't be read.
fn readable_entry(entry: std::io::Result<std::fs::DirEntry>, parent: &Path) -> Option<PathBuf> {
    match entry {
        Ok(entry) => Some(entry.path()),
        Err(e) => {
            warn!(dir = %parent.display(), error = %e, "skipping unreadable directory entry");
            None
        }
    }
}

fn unit_name(dir: &Path) -> String {
    dir.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown")
        .to_string()
}

/// Modules registered explicitly by their own initialisation code.
#[derive(Debug, Default)]
pub struct StaticSource {
    modules: RwLock<Vec<ModuleDeclaration>>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a source from an already assembled list.
    pub fn with_modules(modules: Vec<ModuleDeclaration>) -> Self {
        Self {
            modules: RwLock::new(modules),
        }
    }

    /// Register a module. Visible to the registry on its next reload.
    pub fn register_module(&self, declaration: ModuleDeclaration) {
        debug!(module = %declaration.name, "module registered");
        self.modules.write().push(declaration);
    }

    pub fn len(&self) -> usize {
        self.modules.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.read().is_empty()
    }
}

impl ModuleSource for StaticSource {
    fn load(&self) -> Result<Vec<ModuleDeclaration>> {
        Ok(self.modules.read().clone())
    }
}

/// Adapts a closure into a [`ModuleSource`].
pub struct FnSource<F> {
    load: F,
}

impl<F> FnSource<F>
where
    F: Fn() -> Result<Vec<ModuleDeclaration>> + Send + Sync,
{
    pub fn new(load: F) -> Self {
        Self { load }
    }
}

impl<F> ModuleSource for FnSource<F>
where
    F: Fn() -> Result<Vec<ModuleDeclaration>> + Send + Sync,
{
    fn load(&self) -> Result<Vec<ModuleDeclaration>> {
        (self.load)()
    }
}

impl<F> std::fmt::Debug for FnSource<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnSource").finish()
    }
}
