//! CLI command implementations for module inspection and scaffolding.
//!
//! These commands run against a registry built from the configured modules
//! directory and print to stdout, either as tables or as JSON for tooling.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Result, bail};
use atrium_sdk::{ModuleDeclaration, NavLocation, NavigationItem, RoleType};

use super::registry::ModuleRegistry;
use super::scaffold;
use super::validate::validate_modules;
use crate::access::ViewerRoles;
use crate::navigation::{NavigationComposer, filter_navigation};
use crate::route::{ComposedRoute, RouteComposer};

/// Which slice of the route table to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum RouteScope {
    #[default]
    All,
    Public,
    Authenticated,
}

/// List all loaded modules.
pub fn cmd_module_list(registry: &ModuleRegistry) -> Result<()> {
    let modules = registry.modules()?;
    if modules.is_empty() {
        println!("No modules found.");
        return Ok(());
    }
    print!("{}", render_module_table(&modules));
    Ok(())
}

/// Print the composed route table.
pub fn cmd_routes(registry: &ModuleRegistry, scope: RouteScope, json: bool) -> Result<()> {
    let composer = RouteComposer::new(registry);
    let routes = match scope {
        RouteScope::All => composer.application_routes()?,
        RouteScope::Public => composer.public_routes()?,
        RouteScope::Authenticated => composer.authenticated_routes()?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&routes)?);
    } else {
        print!("{}", render_route_table(&routes));
    }
    Ok(())
}

/// Print the navigation forest, optionally by location and filtered by roles.
///
/// With no roles the forest is printed unfiltered.
pub fn cmd_nav(
    registry: &ModuleRegistry,
    location: Option<NavLocation>,
    roles: &[RoleType],
    json: bool,
) -> Result<()> {
    let composer = NavigationComposer::new(registry);
    let mut items = match location {
        Some(loc) => composer.navigation_items_by_location(loc)?,
        None => composer.all_navigation_items()?,
    };

    if !roles.is_empty() {
        let viewer = ViewerRoles::from_roles(roles.iter().copied());
        items = filter_navigation(&items, &viewer);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        print!("{}", render_nav_tree(&items));
    }
    Ok(())
}

/// Reload and validate; fails if any finding is reported.
pub fn cmd_check(registry: &ModuleRegistry) -> Result<()> {
    let modules = registry.force_reload()?;
    let findings = validate_modules(&modules);

    if findings.is_empty() {
        println!("{} modules OK.", modules.len());
        return Ok(());
    }

    for finding in &findings {
        println!("error: {finding}");
    }
    bail!("{} validation finding(s)", findings.len());
}

/// Scaffold a new module unit.
pub fn cmd_scaffold(modules_dir: &Path, name: &str) -> Result<()> {
    let path = scaffold::scaffold_module(modules_dir, name)?;
    println!("Created {}", path.display());
    Ok(())
}

pub fn render_module_table(modules: &[ModuleDeclaration]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<20} {:<20} {:<16} {:<7} {:<4}",
        "MODULE", "BASE PATH", "OWNER", "ROUTES", "NAV"
    );
    let _ = writeln!(out, "{}", "-".repeat(71));

    for m in modules {
        let owner = if m.owner.is_empty() { "-" } else { m.owner.as_str() };
        let _ = writeln!(
            out,
            "{:<20} {:<20} {:<16} {:<7} {}",
            m.name,
            m.base_path,
            owner,
            m.routes.len(),
            m.navigation_items.len()
        );
    }
    out
}

pub fn render_route_table(routes: &[ComposedRoute]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<32} {:<20} {:<6} {}",
        "PATH", "MODULE", "AUTH", "TARGET"
    );
    let _ = writeln!(out, "{}", "-".repeat(80));

    for r in routes {
        let auth = if r.authorize { "yes" } else { "no" };
        let _ = writeln!(
            out,
            "{:<32} {:<20} {:<6} {}",
            r.path,
            r.module,
            auth,
            r.render_target.as_str()
        );
    }
    out
}

pub fn render_nav_tree(items: &[NavigationItem]) -> String {
    let mut out = String::new();
    write_nav_level(&mut out, items, 0);
    out
}

fn write_nav_level(out: &mut String, items: &[NavigationItem], depth: usize) {
    for item in items {
        let indent = "  ".repeat(depth);
        let _ = write!(out, "{indent}- {}", item.label);
        if let Some(href) = &item.href {
            let _ = write!(out, " ({href})");
        }
        if depth == 0 {
            let _ = write!(out, " @{}", item.location);
        }
        if let Some(roles) = item.required_roles.as_ref().filter(|r| !r.is_empty()) {
            let names: Vec<&str> = roles.iter().map(|r| r.as_str()).collect();
            let _ = write!(out, " [{}]", names.join(", "));
        }
        out.push('\n');

        if let Some(children) = &item.children {
            write_nav_level(out, children, depth + 1);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::module::StaticSource;
    use crate::route::compose_routes;
    use atrium_sdk::RouteDeclaration;

    #[test]
    fn module_table_lists_each_module() {
        let modules = vec![
            ModuleDeclaration::new("home", "/"),
            ModuleDeclaration::new("schedule", "/schedule")
                .owner("ops")
                .route(RouteDeclaration::new("periods", "/periods", "Periods")),
        ];
        let table = render_module_table(&modules);
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[2].starts_with("home"));
        assert!(lines[3].contains("/schedule"));
        assert!(lines[3].contains("ops"));
    }

    #[test]
    fn route_table_marks_authorization() {
        let routes = compose_routes(&[ModuleDeclaration::new("schedule", "/schedule")
            .route(RouteDeclaration::new("periods", "/periods", "Periods").authorize())]);
        let table = render_route_table(&routes);
        let row = table.lines().nth(2).unwrap();
        assert!(row.starts_with("/schedule/periods"));
        assert!(row.contains("yes"));
        assert!(row.ends_with("Periods"));
    }

    #[test]
    fn nav_tree_indents_children() {
        let items = vec![
            NavigationItem::group("Management", NavLocation::Admin)
                .child(
                    NavigationItem::link("Users", "/admin/users", NavLocation::Admin)
                        .require_role(RoleType::UserManager),
                ),
        ];
        let tree = render_nav_tree(&items);
        assert_eq!(
            tree,
            "- Management @admin\n  - Users (/admin/users) [UserManager]\n"
        );
    }

    #[test]
    fn check_fails_on_duplicates() {
        let registry = ModuleRegistry::new(StaticSource::with_modules(vec![
            ModuleDeclaration::new("a", "/same"),
            ModuleDeclaration::new("b", "/same"),
        ]));
        assert!(cmd_check(&registry).is_err());

        let clean = ModuleRegistry::new(StaticSource::with_modules(vec![
            ModuleDeclaration::new("a", "/a"),
        ]));
        assert!(cmd_check(&clean).is_ok());
    }
}
