#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Module discovery from a modules directory, end to end through AppState.

use std::collections::HashMap;

use atrium_kernel::module::scaffold::scaffold_module;
use atrium_kernel::module::{CacheState, DirectorySource, ModuleError, ModuleSource};
use atrium_kernel::{AppState, Config, ViewerRoles};
use atrium_sdk::{NavLocation, RoleType};
use atrium_test_utils::write_manifest;

const HOME: &str = r#"
name = "home"
base_path = "/"

[[routes]]
name = "home"
path = ""
render_target = "HomePage"
"#;

const SCHEDULE: &str = r#"
name = "schedule"
owner = "ops"
base_path = "/schedule"

[[routes]]
name = "periods"
path = "/periods"
authorize = true
render_target = "SchedulePeriodsPage"

[[navigation_items]]
label = "Planning"
location = "dashboard"

[[navigation_items.children]]
label = "Periods"
href = "/schedule/periods"
location = "dashboard"
required_roles = ["Operator"]
"#;

fn config_for(dir: &std::path::Path, extra: &[(&str, &str)]) -> Config {
    let mut vars: HashMap<String, String> = extra
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    vars.insert("MODULES_DIR".into(), dir.display().to_string());
    Config::from_lookup(|key| vars.get(key).cloned()).unwrap()
}

#[test]
fn app_state_composes_discovered_modules() {
    let tmp = tempfile::tempdir().unwrap();
    // Directory names sort "00-home" before "10-schedule".
    write_manifest(tmp.path(), "10-schedule", SCHEDULE).unwrap();
    write_manifest(tmp.path(), "00-home", HOME).unwrap();

    let state = AppState::new(&config_for(tmp.path(), &[]));
    assert_eq!(state.registry().state(), CacheState::Empty);

    let routes = state.routes().application_routes().unwrap();
    let paths: Vec<_> = routes.iter().map(|r| r.path.as_str()).collect();
    assert_eq!(paths, vec!["/", "/schedule/periods"]);

    let operator = ViewerRoles::from_roles([RoleType::Operator]);
    let nav = state
        .navigation()
        .visible_items(NavLocation::Dashboard, &operator)
        .unwrap();
    assert_eq!(nav.len(), 1);
    assert_eq!(nav[0].label, "Planning");

    let anon = state
        .navigation()
        .visible_items(NavLocation::Dashboard, &ViewerRoles::anonymous())
        .unwrap();
    assert!(anon.is_empty());
    assert_eq!(state.registry().reload_count(), 1);
}

#[test]
fn broken_unit_is_skipped_not_fatal() {
    let tmp = tempfile::tempdir().unwrap();
    write_manifest(tmp.path(), "home", HOME).unwrap();
    write_manifest(tmp.path(), "broken", "name = \"broken\"\nbase_path = 42\n").unwrap();
    std::fs::create_dir_all(tmp.path().join("no-manifest")).unwrap();

    let state = AppState::new(&config_for(tmp.path(), &[]));
    let modules = state.registry().modules().unwrap();
    assert_eq!(modules.len(), 1);
    assert_eq!(modules[0].name, "home");
}

#[test]
fn missing_modules_dir_is_fatal() {
    let tmp = tempfile::tempdir().unwrap();
    let state = AppState::new(&config_for(&tmp.path().join("absent"), &[]));

    let err = state.routes().application_routes().unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ModuleError>(),
        Some(ModuleError::SourceUnavailable { .. })
    ));
}

#[test]
fn disabled_modules_from_config() {
    let tmp = tempfile::tempdir().unwrap();
    write_manifest(tmp.path(), "home", HOME).unwrap();
    write_manifest(tmp.path(), "schedule", SCHEDULE).unwrap();

    let state = AppState::new(&config_for(tmp.path(), &[("DISABLED_MODULES", "schedule")]));
    let routes = state.routes().application_routes().unwrap();
    assert_eq!(routes.len(), 1);
    assert!(state.registry().module_by_name("schedule").unwrap().is_none());
}

#[test]
fn strict_validation_from_config_rejects_base_path_collision() {
    let tmp = tempfile::tempdir().unwrap();
    write_manifest(tmp.path(), "home", HOME).unwrap();
    write_manifest(tmp.path(), "landing", "name = \"landing\"\nbase_path = \"/\"\n").unwrap();

    let strict = AppState::new(&config_for(tmp.path(), &[("MODULE_VALIDATION", "strict")]));
    let err = strict.registry().modules().unwrap_err();
    assert!(err.to_string().contains("base path '/'"));

    let lenient = AppState::new(&config_for(tmp.path(), &[]));
    assert_eq!(lenient.registry().modules().unwrap().len(), 2);
}

#[test]
fn scaffolded_module_is_discovered() {
    let tmp = tempfile::tempdir().unwrap();
    scaffold_module(tmp.path(), "Resource Pools").unwrap();

    let modules = DirectorySource::new(tmp.path()).load().unwrap();
    assert_eq!(modules.len(), 1);
    assert_eq!(modules[0].name, "Resource Pools");
    assert_eq!(modules[0].base_path, "/resource-pools");
    assert_eq!(modules[0].owner, "");
    assert!(modules[0].routes.is_empty());
    assert!(modules[0].navigation_items.is_empty());
}
