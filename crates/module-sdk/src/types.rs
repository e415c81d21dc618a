//! Core types for Atrium modules.
//!
//! A module describes itself with a single [`ModuleDeclaration`]: the routes it
//! mounts under its base path and the navigation entries it contributes. The
//! kernel never mutates a declaration once loaded.

use serde::{Deserialize, Serialize};

use crate::navigation::NavigationItem;

/// Opaque reference to whatever the rendering layer mounts for a route.
///
/// The kernel carries it through composition untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RenderTarget(String);

impl RenderTarget {
    pub fn new(target: impl Into<String>) -> Self {
        Self(target.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RenderTarget {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A route relative to its module's base path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteDeclaration {
    /// Route identifier (not required to be unique across modules).
    pub name: String,

    /// Path relative to the module's `base_path` (may be empty).
    #[serde(default)]
    pub path: String,

    /// Whether the route requires an authenticated session.
    #[serde(default)]
    pub authorize: bool,

    /// What the rendering layer mounts for this route.
    pub render_target: RenderTarget,
}

impl RouteDeclaration {
    pub fn new(
        name: impl Into<String>,
        path: impl Into<String>,
        render_target: impl Into<RenderTarget>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            authorize: false,
            render_target: render_target.into(),
        }
    }

    /// Mark the route as requiring an authenticated session.
    pub fn authorize(mut self) -> Self {
        self.authorize = true;
        self
    }
}

/// Manifest for one module.
///
/// Unknown keys are rejected so a misspelled `authorize` cannot silently
/// publish a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleDeclaration {
    /// Human-readable identifier, used for lookup.
    pub name: String,

    /// Contact metadata; opaque to the kernel.
    #[serde(default)]
    pub owner: String,

    /// Mount point prefixed to every route path.
    pub base_path: String,

    /// Routes in declaration order.
    #[serde(default)]
    pub routes: Vec<RouteDeclaration>,

    /// Top-level navigation entries in declaration order.
    #[serde(default)]
    pub navigation_items: Vec<NavigationItem>,
}

impl ModuleDeclaration {
    pub fn new(name: impl Into<String>, base_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            owner: String::new(),
            base_path: base_path.into(),
            routes: Vec::new(),
            navigation_items: Vec::new(),
        }
    }

    pub fn owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = owner.into();
        self
    }

    pub fn route(mut self, route: RouteDeclaration) -> Self {
        self.routes.push(route);
        self
    }

    pub fn navigation_item(mut self, item: NavigationItem) -> Self {
        self.navigation_items.push(item);
        self
    }
}
