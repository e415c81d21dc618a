//! Module registry - the time-cached view of every loaded module.
//!
//! The registry pulls declarations from its [`ModuleSource`] lazily: the first
//! access loads them, later accesses reuse the snapshot until it is older than
//! the TTL, and the first access after that reloads synchronously. There is no
//! background refresh.
//!
//! Snapshots are replaced wholesale, so a reader sees either the old module set
//! or the new one, never a mix.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use anyhow::Result;
use atrium_sdk::ModuleDeclaration;
use parking_lot::RwLock;
use tracing::{debug, info, warn};

use super::clock::{Clock, SystemClock};
use super::error::ModuleError;
use super::source::ModuleSource;
use super::validate::{ValidationMode, validate_modules};

/// Default snapshot lifetime (5 minutes).
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// An immutable, shareable module set.
pub type ModuleSnapshot = Arc<[ModuleDeclaration]>;

/// Cache state as of the registry clock's current time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    /// Nothing loaded yet (or invalidated).
    Empty,
    /// Snapshot younger than the TTL.
    Valid,
    /// Snapshot expired; the next access reloads.
    Stale,
}

/// Tunables for a [`ModuleRegistry`].
#[derive(Debug, Clone)]
pub struct RegistryOptions {
    /// How long a snapshot stays valid.
    pub ttl: Duration,
    /// What to do with duplicate names/base paths in a fresh snapshot.
    pub validation: ValidationMode,
    /// Module names dropped from every snapshot.
    pub disabled: Vec<String>,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_TTL,
            validation: ValidationMode::default(),
            disabled: Vec::new(),
        }
    }
}

struct Snapshot {
    modules: ModuleSnapshot,
    loaded_at: Instant,
}

/// Canonical, lazily refreshed list of module declarations.
pub struct ModuleRegistry {
    source: Box<dyn ModuleSource>,
    clock: Box<dyn Clock>,
    options: RegistryOptions,
    snapshot: RwLock<Option<Snapshot>>,
    /// Bumped by `invalidate`; a reload started under an older generation
    /// does not store its result.
    generation: AtomicU64,
    reloads: AtomicU64,
}

impl ModuleRegistry {
    /// Create a registry with default options and the system clock.
    pub fn new(source: impl ModuleSource + 'static) -> Self {
        Self::with_options(source, RegistryOptions::default())
    }

    /// Create a registry with explicit options and the system clock.
    pub fn with_options(source: impl ModuleSource + 'static, options: RegistryOptions) -> Self {
        Self {
            source: Box::new(source),
            clock: Box::new(SystemClock),
            options,
            snapshot: RwLock::new(None),
            generation: AtomicU64::new(0),
            reloads: AtomicU64::new(0),
        }
    }

    /// Replace the time source.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Snapshot lifetime.
    pub fn ttl(&self) -> Duration {
        self.options.ttl
    }

    /// All modules, reloading first if the snapshot is missing or stale.
    ///
    /// Loader failures propagate unchanged; the previous snapshot is not
    /// served as a fallback.
    pub fn modules(&self) -> Result<ModuleSnapshot> {
        if let Some(modules) = self.fresh_snapshot() {
            debug!(modules = modules.len(), "module cache hit");
            return Ok(modules);
        }

        self.reload()
    }

    /// First module whose `name` equals `name`.
    pub fn module_by_name(&self, name: &str) -> Result<Option<ModuleDeclaration>> {
        Ok(self.modules()?.iter().find(|m| m.name == name).cloned())
    }

    /// First module whose `base_path` equals `base_path`.
    pub fn module_by_base_path(&self, base_path: &str) -> Result<Option<ModuleDeclaration>> {
        Ok(self
            .modules()?
            .iter()
            .find(|m| m.base_path == base_path)
            .cloned())
    }

    /// Drop the snapshot; the next access reloads.
    ///
    /// A reload already in flight still returns its modules to its own caller
    /// but does not repopulate the cache.
    pub fn invalidate(&self) {
        let mut slot = self.snapshot.write();
        *slot = None;
        self.generation.fetch_add(1, Ordering::AcqRel);
        debug!("module cache invalidated");
    }

    /// Reload now, regardless of snapshot age.
    pub fn force_reload(&self) -> Result<ModuleSnapshot> {
        self.reload()
    }

    /// Cache state at the clock's current time.
    pub fn state(&self) -> CacheState {
        match self.snapshot.read().as_ref() {
            None => CacheState::Empty,
            Some(snap) if self.is_fresh(snap) => CacheState::Valid,
            Some(_) => CacheState::Stale,
        }
    }

    /// Number of completed loader invocations.
    pub fn reload_count(&self) -> u64 {
        self.reloads.load(Ordering::Relaxed)
    }

    fn is_fresh(&self, snap: &Snapshot) -> bool {
        self.clock.now().saturating_duration_since(snap.loaded_at) < self.options.ttl
    }

    fn fresh_snapshot(&self) -> Option<ModuleSnapshot> {
        self.snapshot
            .read()
            .as_ref()
            .filter(|snap| self.is_fresh(snap))
            .map(|snap| Arc::clone(&snap.modules))
    }

    fn reload(&self) -> Result<ModuleSnapshot> {
        // The lock is not held while loading; two callers racing on a stale
        // snapshot may both load, and the later assignment wins.
        let generation = self.generation.load(Ordering::Acquire);
        let loaded = self.source.load()?;

        let discovered = loaded.len();
        let modules: Vec<ModuleDeclaration> = loaded
            .into_iter()
            .filter(|m| {
                let disabled = self.options.disabled.iter().any(|d| d == &m.name);
                if disabled {
                    debug!(module = %m.name, "module disabled, excluded from snapshot");
                }
                !disabled
            })
            .collect();

        self.check(&modules)?;

        let modules: ModuleSnapshot = modules.into();
        self.reloads.fetch_add(1, Ordering::Relaxed);
        {
            let mut slot = self.snapshot.write();
            if self.generation.load(Ordering::Acquire) == generation {
                *slot = Some(Snapshot {
                    modules: Arc::clone(&modules),
                    loaded_at: self.clock.now(),
                });
            } else {
                debug!("cache invalidated during reload, result not stored");
            }
        }

        info!(
            discovered,
            modules = modules.len(),
            ttl_secs = self.options.ttl.as_secs(),
            "module registry reloaded"
        );
        Ok(modules)
    }

    fn check(&self, modules: &[ModuleDeclaration]) -> Result<()> {
        if self.options.validation == ValidationMode::Off {
            return Ok(());
        }

        let findings = validate_modules(modules);
        if findings.is_empty() {
            return Ok(());
        }

        match self.options.validation {
            ValidationMode::Strict => Err(ModuleError::ValidationFailed {
                findings: findings.iter().map(ToString::to_string).collect(),
            }
            .into()),
            _ => {
                for finding in &findings {
                    warn!(finding = %finding, "module validation");
                }
                Ok(())
            }
        }
    }
}

impl std::fmt::Debug for ModuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleRegistry")
            .field("options", &self.options)
            .field("state", &self.state())
            .field("reloads", &self.reload_count())
            .finish()
    }
}
