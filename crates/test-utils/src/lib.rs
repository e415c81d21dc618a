//! Atrium test utilities.
//!
//! Helpers for integration testing: fixture module sets, a module source that
//! counts and can fail its loads, and manifest writers for directory tests.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use atrium_kernel::module::ModuleSource;
use atrium_sdk::{ModuleDeclaration, NavLocation, NavigationItem, RoleType, RouteDeclaration};
use parking_lot::RwLock;

/// The two-module bootstrap set: a home module mounted at `/` with one public
/// route, and a schedule module with one authenticated route.
pub fn bootstrap_modules() -> Vec<ModuleDeclaration> {
    vec![
        ModuleDeclaration::new("home", "/").route(RouteDeclaration::new("home", "", "HomePage")),
        ModuleDeclaration::new("schedule", "/schedule")
            .owner("ops")
            .route(RouteDeclaration::new("periods", "/periods", "SchedulePeriodsPage").authorize()),
    ]
}

/// A dashboard-sized module set with nested, role-gated navigation.
pub fn dashboard_modules() -> Vec<ModuleDeclaration> {
    vec![
        ModuleDeclaration::new("home", "/")
            .route(RouteDeclaration::new("home", "", "HomePage"))
            .navigation_item(NavigationItem::link("Home", "/", NavLocation::Public))
            .navigation_item(NavigationItem::link("Overview", "/", NavLocation::Dashboard).order(0)),
        ModuleDeclaration::new("resources", "/resources")
            .route(RouteDeclaration::new("list", "", "ResourceList").authorize())
            .route(RouteDeclaration::new("detail", "/:id", "ResourceDetail").authorize())
            .navigation_item(
                NavigationItem::link("Resources", "/resources", NavLocation::Dashboard)
                    .require_role(RoleType::ResourceManager)
                    .require_role(RoleType::Operator),
            ),
        ModuleDeclaration::new("admin", "/admin")
            .route(RouteDeclaration::new("users", "/users", "UserAdmin").authorize())
            .route(RouteDeclaration::new("roles", "/roles", "RoleAdmin").authorize())
            .navigation_item(
                NavigationItem::group("Management", NavLocation::Admin)
                    .icon("settings")
                    .child(
                        NavigationItem::link("Users", "/admin/users", NavLocation::Admin)
                            .require_role(RoleType::UserManager)
                            .require_role(RoleType::Administrator),
                    )
                    .child(
                        NavigationItem::link("Roles", "/admin/roles", NavLocation::Admin)
                            .require_role(RoleType::Administrator),
                    ),
            ),
    ]
}

/// A module source with a swappable module set and a load counter.
#[derive(Debug, Default)]
pub struct CountingSource {
    modules: RwLock<Vec<ModuleDeclaration>>,
    loads: AtomicUsize,
    fail: AtomicBool,
}

impl CountingSource {
    pub fn new(modules: Vec<ModuleDeclaration>) -> Arc<Self> {
        Arc::new(Self {
            modules: RwLock::new(modules),
            ..Self::default()
        })
    }

    /// Number of times `load` was called, including failed calls.
    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    /// Replace the module set returned by subsequent loads.
    pub fn set_modules(&self, modules: Vec<ModuleDeclaration>) {
        *self.modules.write() = modules;
    }

    /// Make subsequent loads fail (or succeed again).
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

impl ModuleSource for CountingSource {
    fn load(&self) -> anyhow::Result<Vec<ModuleDeclaration>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            anyhow::bail!("module scan failed");
        }
        Ok(self.modules.read().clone())
    }
}

/// Write `<root>/<dir>/<dir>.module.toml` with the given body.
pub fn write_manifest(root: &Path, dir: &str, body: &str) -> std::io::Result<PathBuf> {
    let unit = root.join(dir);
    std::fs::create_dir_all(&unit)?;
    let path = unit.join(format!("{dir}.module.toml"));
    std::fs::write(&path, body)?;
    Ok(path)
}
