//! Navigation contributions and the roles that gate them.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Closed set of roles a viewer can hold.
///
/// Deserializes through the same lenient parser as [`FromStr`], so manifests
/// may write `operator` or `user_manager`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum RoleType {
    Administrator,
    UserManager,
    ResourceManager,
    Operator,
    Viewer,
}

impl RoleType {
    pub const ALL: [RoleType; 5] = [
        RoleType::Administrator,
        RoleType::UserManager,
        RoleType::ResourceManager,
        RoleType::Operator,
        RoleType::Viewer,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RoleType::Administrator => "Administrator",
            RoleType::UserManager => "UserManager",
            RoleType::ResourceManager => "ResourceManager",
            RoleType::Operator => "Operator",
            RoleType::Viewer => "Viewer",
        }
    }
}

impl fmt::Display for RoleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a role or location name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseNameError {
    kind: &'static str,
    value: String,
}

impl FromStr for RoleType {
    type Err = ParseNameError;

    /// Case-insensitive; accepts `UserManager`, `usermanager` and `user_manager`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();

        RoleType::ALL
            .into_iter()
            .find(|r| r.as_str().to_lowercase() == wanted)
            .ok_or_else(|| ParseNameError {
                kind: "role",
                value: s.to_string(),
            })
    }
}

impl TryFrom<String> for RoleType {
    type Error = ParseNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Where a navigation entry is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum NavLocation {
    Dashboard,
    Public,
    Admin,
}

impl NavLocation {
    pub fn as_str(self) -> &'static str {
        match self {
            NavLocation::Dashboard => "dashboard",
            NavLocation::Public => "public",
            NavLocation::Admin => "admin",
        }
    }
}

impl fmt::Display for NavLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NavLocation {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dashboard" => Ok(NavLocation::Dashboard),
            "public" => Ok(NavLocation::Public),
            "admin" => Ok(NavLocation::Admin),
            _ => Err(ParseNameError {
                kind: "navigation location",
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for NavLocation {
    type Error = ParseNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Opaque icon handle for the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Icon(String);

impl Icon {
    pub fn new(icon: impl Into<String>) -> Self {
        Self(icon.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One node of a navigation forest.
///
/// A node with an `href` is a link; a node without one is a grouping header
/// whose visibility comes from its children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavigationItem {
    pub label: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,

    pub location: NavLocation,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<NavigationItem>>,

    /// Advisory sort key; the kernel never sorts by it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,

    /// Absent or empty means visible to everyone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_roles: Option<BTreeSet<RoleType>>,
}

impl NavigationItem {
    /// A link node.
    pub fn link(label: impl Into<String>, href: impl Into<String>, location: NavLocation) -> Self {
        Self {
            href: Some(href.into()),
            ..Self::group(label, location)
        }
    }

    /// A grouping node with no link of its own.
    pub fn group(label: impl Into<String>, location: NavLocation) -> Self {
        Self {
            label: label.into(),
            href: None,
            location,
            icon: None,
            children: None,
            order: None,
            required_roles: None,
        }
    }

    /// Append a child entry, creating the child list if needed.
    pub fn child(mut self, child: NavigationItem) -> Self {
        self.children.get_or_insert_with(Vec::new).push(child);
        self
    }

    /// Set the icon handle.
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(Icon::new(icon));
        self
    }

    /// Set the advisory sort key.
    pub fn order(mut self, order: i32) -> Self {
        self.order = Some(order);
        self
    }

    /// Add a role that grants visibility.
    pub fn require_role(mut self, role: RoleType) -> Self {
        self.required_roles
            .get_or_insert_with(BTreeSet::new)
            .insert(role);
        self
    }

    /// Whether this node links somewhere.
    pub fn is_link(&self) -> bool {
        self.href.is_some()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn role_parsing_is_lenient_about_case_and_separators() {
        assert_eq!("Administrator".parse::<RoleType>().unwrap(), RoleType::Administrator);
        assert_eq!("user_manager".parse::<RoleType>().unwrap(), RoleType::UserManager);
        assert_eq!("resource-manager".parse::<RoleType>().unwrap(), RoleType::ResourceManager);
        assert!("root".parse::<RoleType>().is_err());
    }

    #[test]
    fn location_round_trips_through_display() {
        for loc in [NavLocation::Dashboard, NavLocation::Public, NavLocation::Admin] {
            assert_eq!(loc.to_string().parse::<NavLocation>().unwrap(), loc);
        }
        let err = "sidebar".parse::<NavLocation>().unwrap_err();
        assert!(err.to_string().contains("sidebar"));
    }

    #[test]
    fn group_with_children_and_roles() {
        let item = NavigationItem::group("Management", NavLocation::Admin)
            .require_role(RoleType::Administrator)
            .child(NavigationItem::link("Users", "/users", NavLocation::Admin))
            .child(NavigationItem::link("Roles", "/roles", NavLocation::Admin));

        assert!(!item.is_link());
        assert_eq!(item.children.as_ref().map(Vec::len), Some(2));
        assert!(item.required_roles.unwrap().contains(&RoleType::Administrator));
    }

    #[test]
    fn role_and_location_deserialize_leniently() {
        let roles: Vec<RoleType> =
            serde_json::from_str(r#"["operator", "user_manager", "ResourceManager"]"#).unwrap();
        assert_eq!(
            roles,
            vec![RoleType::Operator, RoleType::UserManager, RoleType::ResourceManager]
        );

        let loc: NavLocation = serde_json::from_str(r#""Admin""#).unwrap();
        assert_eq!(loc, NavLocation::Admin);

        let err = serde_json::from_str::<RoleType>(r#""root""#).unwrap_err();
        assert!(err.to_string().contains("unknown role 'root'"));

        // Serialized form stays canonical.
        assert_eq!(serde_json::to_value(RoleType::UserManager).unwrap(), "UserManager");
    }

    #[test]
    fn unknown_item_keys_are_rejected() {
        let json = r#"{"label": "Users", "location": "admin", "required_role": ["Administrator"]}"#;
        assert!(serde_json::from_str::<NavigationItem>(json).is_err());
    }

    #[test]
    fn absent_fields_are_omitted_from_json() {
        let item = NavigationItem::link("Home", "/", NavLocation::Public);
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["location"], "public");
        assert!(value.get("children").is_none());
        assert!(value.get("required_roles").is_none());
    }
}
