//! Application state shared with the rendering layer.

use std::sync::Arc;

use tracing::info;

use crate::config::Config;
use crate::module::{DirectorySource, ModuleRegistry, RegistryOptions};
use crate::navigation::NavigationComposer;
use crate::route::RouteComposer;

/// Shared application state.
///
/// Wrapped in Arc internally so Clone is cheap. Built once at startup and
/// handed to whatever needs routes or navigation.
#[derive(Clone, Debug)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

#[derive(Debug)]
struct AppStateInner {
    config: Config,
    registry: ModuleRegistry,
}

impl AppState {
    /// Build state backed by the configured modules directory.
    ///
    /// Nothing is loaded yet; the first registry access triggers the scan.
    pub fn new(config: &Config) -> Self {
        let registry = ModuleRegistry::with_options(
            DirectorySource::new(&config.modules_dir),
            RegistryOptions {
                ttl: config.module_cache_ttl,
                validation: config.module_validation,
                disabled: config.disabled_modules.clone(),
            },
        );

        info!(
            modules_dir = %config.modules_dir.display(),
            ttl_secs = config.module_cache_ttl.as_secs(),
            "module registry configured"
        );
        Self::with_registry(config.clone(), registry)
    }

    /// Build state around an existing registry (explicit registration, tests).
    pub fn with_registry(config: Config, registry: ModuleRegistry) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, registry }),
        }
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    pub fn registry(&self) -> &ModuleRegistry {
        &self.inner.registry
    }

    pub fn routes(&self) -> RouteComposer<'_> {
        RouteComposer::new(&self.inner.registry)
    }

    pub fn navigation(&self) -> NavigationComposer<'_> {
        NavigationComposer::new(&self.inner.registry)
    }
}
