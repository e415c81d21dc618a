//! Navigation composition across modules.

use anyhow::Result;
use atrium_sdk::{ModuleDeclaration, NavLocation, NavigationItem};
use tracing::debug;

use super::filter::filter_navigation;
use crate::access::ViewerRoles;
use crate::module::ModuleRegistry;

/// Concatenate every module's top-level navigation items.
///
/// Module order and each module's own item order are preserved; children stay
/// nested under their parents.
pub fn compose_navigation(modules: &[ModuleDeclaration]) -> Vec<NavigationItem> {
    modules
        .iter()
        .flat_map(|m| m.navigation_items.iter().cloned())
        .collect()
}

/// Top-level items placed at `location`.
///
/// Only the top-level node's location is checked; descendants ride along with
/// their parent whatever their own location says.
pub fn items_at(items: Vec<NavigationItem>, location: NavLocation) -> Vec<NavigationItem> {
    items
        .into_iter()
        .filter(|item| item.location == location)
        .collect()
}

/// Navigation views over the registry's current snapshot.
#[derive(Debug, Clone, Copy)]
pub struct NavigationComposer<'a> {
    registry: &'a ModuleRegistry,
}

impl<'a> NavigationComposer<'a> {
    pub fn new(registry: &'a ModuleRegistry) -> Self {
        Self { registry }
    }

    /// The whole navigation forest.
    pub fn all_navigation_items(&self) -> Result<Vec<NavigationItem>> {
        let modules = self.registry.modules()?;
        let items = compose_navigation(&modules);
        debug!(items = items.len(), "composed navigation");
        Ok(items)
    }

    pub fn navigation_items_by_location(&self, location: NavLocation) -> Result<Vec<NavigationItem>> {
        Ok(items_at(self.all_navigation_items()?, location))
    }

    pub fn dashboard_items(&self) -> Result<Vec<NavigationItem>> {
        self.navigation_items_by_location(NavLocation::Dashboard)
    }

    pub fn public_items(&self) -> Result<Vec<NavigationItem>> {
        self.navigation_items_by_location(NavLocation::Public)
    }

    pub fn admin_items(&self) -> Result<Vec<NavigationItem>> {
        self.navigation_items_by_location(NavLocation::Admin)
    }

    /// Items at `location` pruned to what `viewer` may see.
    pub fn visible_items(
        &self,
        location: NavLocation,
        viewer: &ViewerRoles,
    ) -> Result<Vec<NavigationItem>> {
        let items = self.navigation_items_by_location(location)?;
        Ok(filter_navigation(&items, viewer))
    }
}
