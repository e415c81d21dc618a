//! Parser for module `.module.toml` manifest files.
//!
//! Each module unit has a `{name}.module.toml` file holding its
//! [`ModuleDeclaration`]:
//! - name, owner, base path
//! - routes relative to the base path
//! - navigation items, optionally nested

use std::path::Path;

use atrium_sdk::ModuleDeclaration;

use super::error::ModuleError;

/// File suffix that marks a module manifest.
pub const MANIFEST_SUFFIX: &str = ".module.toml";

/// Parse a module manifest from the given path.
pub fn parse(path: &Path) -> Result<ModuleDeclaration, ModuleError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        ModuleError::invalid_manifest(
            module_hint(path),
            path.display().to_string(),
            format!("failed to read: {e}"),
        )
    })?;

    parse_str(&content, path)
}

/// Parse a module manifest from a TOML string.
pub fn parse_str(content: &str, path: &Path) -> Result<ModuleDeclaration, ModuleError> {
    let declaration: ModuleDeclaration = toml::from_str(content).map_err(|e| {
        ModuleError::invalid_manifest(module_hint(path), path.display().to_string(), e.to_string())
    })?;

    validate(&declaration, path)?;
    Ok(declaration)
}

/// Render a declaration back to manifest TOML.
pub fn to_toml(declaration: &ModuleDeclaration) -> anyhow::Result<String> {
    Ok(toml::to_string(declaration)?)
}

fn validate(declaration: &ModuleDeclaration, path: &Path) -> Result<(), ModuleError> {
    if declaration.name.trim().is_empty() {
        return Err(ModuleError::invalid_manifest(
            module_hint(path),
            path.display().to_string(),
            "empty 'name' field",
        ));
    }

    if !declaration.base_path.starts_with('/') {
        return Err(ModuleError::invalid_manifest(
            &declaration.name,
            path.display().to_string(),
            format!(
                "'base_path' must start with '/', got '{}'",
                declaration.base_path
            ),
        ));
    }

    Ok(())
}

/// Best-effort module name for error messages, taken from the file name.
fn module_hint(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.trim_end_matches(MANIFEST_SUFFIX).to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use atrium_sdk::{NavLocation, RoleType};

    #[test]
    fn parse_full_manifest() {
        let toml = r#"
name = "schedule"
owner = "ops-team"
base_path = "/schedule"

[[routes]]
name = "periods"
path = "/periods"
authorize = true
render_target = "SchedulePeriodsPage"

[[routes]]
name = "calendar"
path = "/calendar"
render_target = "CalendarPage"

[[navigation_items]]
label = "Planning"
location = "dashboard"
icon = "calendar"

[[navigation_items.children]]
label = "Periods"
href = "/schedule/periods"
location = "dashboard"
required_roles = ["Operator", "Administrator"]
order = 2
"#;

        let module = parse_str(toml, Path::new("schedule.module.toml")).unwrap();
        assert_eq!(module.name, "schedule");
        assert_eq!(module.owner, "ops-team");
        assert_eq!(module.routes.len(), 2);
        assert!(module.routes[0].authorize);
        assert!(!module.routes[1].authorize);

        let group = &module.navigation_items[0];
        assert_eq!(group.location, NavLocation::Dashboard);
        assert!(group.href.is_none());
        let children = group.children.as_ref().unwrap();
        assert_eq!(children[0].order, Some(2));
        let roles = children[0].required_roles.as_ref().unwrap();
        assert!(roles.contains(&RoleType::Operator));
        assert!(roles.contains(&RoleType::Administrator));
    }

    #[test]
    fn parse_minimal_manifest() {
        let toml = r#"
name = "home"
base_path = "/"
"#;
        let module = parse_str(toml, Path::new("home.module.toml")).unwrap();
        assert_eq!(module.owner, "");
        assert!(module.routes.is_empty());
        assert!(module.navigation_items.is_empty());
    }

    #[test]
    fn reject_empty_name() {
        let toml = r#"
name = ""
base_path = "/x"
"#;
        let err = parse_str(toml, Path::new("x.module.toml")).unwrap_err();
        assert!(err.to_string().contains("empty 'name'"));
    }

    #[test]
    fn reject_relative_base_path() {
        let toml = r#"
name = "reports"
base_path = "reports"
"#;
        let err = parse_str(toml, Path::new("reports.module.toml")).unwrap_err();
        assert!(err.to_string().contains("must start with '/'"));
    }

    #[test]
    fn reject_unknown_role() {
        let toml = r#"
name = "admin"
base_path = "/admin"

[[navigation_items]]
label = "Users"
href = "/admin/users"
location = "admin"
required_roles = ["Superuser"]
"#;
        let err = parse_str(toml, Path::new("admin.module.toml")).unwrap_err();
        assert!(matches!(err, ModuleError::InvalidManifest { ref module, .. } if module == "admin"));
    }

    #[test]
    fn reject_misspelled_route_key() {
        let toml = r#"
name = "schedule"
base_path = "/schedule"

[[routes]]
name = "periods"
path = "/periods"
authorise = true
render_target = "SchedulePeriodsPage"
"#;
        let err = parse_str(toml, Path::new("schedule.module.toml")).unwrap_err();
        assert!(matches!(err, ModuleError::InvalidManifest { .. }));
        assert!(err.to_string().contains("authorise"));
    }

    #[test]
    fn reject_misspelled_navigation_key() {
        let toml = r#"
name = "admin"
base_path = "/admin"

[[navigation_items]]
label = "Users"
href = "/admin/users"
location = "admin"
required_role = ["Administrator"]
"#;
        assert!(parse_str(toml, Path::new("admin.module.toml")).is_err());
    }

    #[test]
    fn role_names_accept_any_case() {
        let toml = r#"
name = "admin"
base_path = "/admin"

[[navigation_items]]
label = "Users"
href = "/admin/users"
location = "admin"
required_roles = ["operator", "user_manager"]
"#;
        let module = parse_str(toml, Path::new("admin.module.toml")).unwrap();
        let roles = module.navigation_items[0].required_roles.as_ref().unwrap();
        assert!(roles.contains(&RoleType::Operator));
        assert!(roles.contains(&RoleType::UserManager));
    }

    #[test]
    fn stub_round_trips() {
        let stub = ModuleDeclaration::new("Reports", "/reports");
        let text = to_toml(&stub).unwrap();
        let parsed = parse_str(&text, Path::new("reports.module.toml")).unwrap();
        assert_eq!(parsed, stub);
    }
}
