//! Route composition - the application route table built from every module.

use anyhow::Result;
use atrium_sdk::{ModuleDeclaration, RenderTarget};
use serde::Serialize;
use tracing::debug;

use super::table::RouteTable;
use crate::module::ModuleRegistry;

/// A route with its path resolved against the owning module's base path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComposedRoute {
    /// Module that declared the route.
    pub module: String,
    pub name: String,
    /// `base_path + path`, concatenated verbatim.
    pub path: String,
    pub authorize: bool,
    pub render_target: RenderTarget,
}

/// Flatten all module routes, prefixing each with its module's base path.
///
/// Modules are visited in order, and each module's routes in declaration
/// order. Paths are not normalised.
pub fn compose_routes(modules: &[ModuleDeclaration]) -> Vec<ComposedRoute> {
    modules
        .iter()
        .flat_map(|module| {
            module.routes.iter().map(move |route| ComposedRoute {
                module: module.name.clone(),
                name: route.name.clone(),
                path: format!("{}{}", module.base_path, route.path),
                authorize: route.authorize,
                render_target: route.render_target.clone(),
            })
        })
        .collect()
}

/// Route views over the registry's current snapshot.
///
/// Every call re-derives from the snapshot; nothing is cached here.
#[derive(Debug, Clone, Copy)]
pub struct RouteComposer<'a> {
    registry: &'a ModuleRegistry,
}

impl<'a> RouteComposer<'a> {
    pub fn new(registry: &'a ModuleRegistry) -> Self {
        Self { registry }
    }

    /// Every route of every module, in composition order.
    pub fn application_routes(&self) -> Result<Vec<ComposedRoute>> {
        let modules = self.registry.modules()?;
        let routes = compose_routes(&modules);
        debug!(routes = routes.len(), "composed application routes");
        Ok(routes)
    }

    /// Routes that require an authenticated session.
    pub fn authenticated_routes(&self) -> Result<Vec<ComposedRoute>> {
        Ok(self
            .application_routes()?
            .into_iter()
            .filter(|r| r.authorize)
            .collect())
    }

    /// Routes open to anyone.
    pub fn public_routes(&self) -> Result<Vec<ComposedRoute>> {
        Ok(self
            .application_routes()?
            .into_iter()
            .filter(|r| !r.authorize)
            .collect())
    }

    /// A matchable table of the current routes.
    pub fn route_table(&self) -> Result<RouteTable> {
        Ok(RouteTable::from_routes(self.application_routes()?))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::module::StaticSource;
    use atrium_sdk::RouteDeclaration;

    fn paths(routes: &[ComposedRoute]) -> Vec<&str> {
        routes.iter().map(|r| r.path.as_str()).collect()
    }

    #[test]
    fn prefixes_with_base_path() {
        let modules = vec![
            ModuleDeclaration::new("x", "/x").route(RouteDeclaration::new("y", "/y", "Y")),
        ];
        let routes = compose_routes(&modules);
        assert_eq!(routes[0].path, "/x/y");
        assert_eq!(routes[0].module, "x");
    }

    #[test]
    fn root_base_with_empty_path_is_root() {
        let modules = vec![
            ModuleDeclaration::new("home", "/").route(RouteDeclaration::new("home", "", "Home")),
        ];
        assert_eq!(compose_routes(&modules)[0].path, "/");
    }

    #[test]
    fn no_normalisation_of_slashes() {
        let modules = vec![
            ModuleDeclaration::new("odd", "/odd/").route(RouteDeclaration::new("p", "/p", "P")),
        ];
        assert_eq!(compose_routes(&modules)[0].path, "/odd//p");
    }

    #[test]
    fn order_is_module_then_declaration() {
        let modules = vec![
            ModuleDeclaration::new("a", "/a")
                .route(RouteDeclaration::new("a2", "/2", "A"))
                .route(RouteDeclaration::new("a1", "/1", "A")),
            ModuleDeclaration::new("b", "/b"),
            ModuleDeclaration::new("c", "/c").route(RouteDeclaration::new("c1", "/1", "C")),
        ];
        assert_eq!(paths(&compose_routes(&modules)), vec!["/a/2", "/a/1", "/c/1"]);
    }

    #[test]
    fn partition_is_exact() {
        let registry = ModuleRegistry::new(StaticSource::with_modules(vec![
            ModuleDeclaration::new("m", "/m")
                .route(RouteDeclaration::new("open", "/open", "O"))
                .route(RouteDeclaration::new("closed", "/closed", "C").authorize())
                .route(RouteDeclaration::new("open2", "/open2", "O")),
        ]));
        let composer = RouteComposer::new(&registry);

        let all = composer.application_routes().unwrap();
        let public = composer.public_routes().unwrap();
        let authed = composer.authenticated_routes().unwrap();

        assert_eq!(paths(&public), vec!["/m/open", "/m/open2"]);
        assert_eq!(paths(&authed), vec!["/m/closed"]);
        assert_eq!(public.len() + authed.len(), all.len());
        for route in &all {
            assert!(public.contains(route) != authed.contains(route));
        }
    }
}
