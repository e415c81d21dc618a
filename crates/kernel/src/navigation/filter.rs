//! Role-based pruning of a navigation forest.
//!
//! Children are filtered before their parent is judged:
//! - a link node (has `href`) is shown iff the viewer satisfies its
//!   `required_roles`; its children are filtered and attached either way
//! - a grouping node (no `href`) is shown iff at least one child survives;
//!   its own `required_roles` are not consulted
//!
//! A grouping node with no children is therefore always dropped. The input is
//! never modified; surviving nodes are fresh copies.

use atrium_sdk::NavigationItem;

use crate::access::ViewerRoles;

/// Return the subset of `items` the viewer may see, in original order.
pub fn filter_navigation(items: &[NavigationItem], viewer: &ViewerRoles) -> Vec<NavigationItem> {
    items
        .iter()
        .filter_map(|item| filter_item(item, viewer))
        .collect()
}

fn filter_item(item: &NavigationItem, viewer: &ViewerRoles) -> Option<NavigationItem> {
    let filtered_children = item
        .children
        .as_deref()
        .map(|children| filter_navigation(children, viewer));

    let should_show = if item.is_link() {
        viewer.satisfies(item.required_roles.as_ref())
    } else {
        filtered_children.as_ref().is_some_and(|c| !c.is_empty())
    };

    if !should_show {
        return None;
    }

    Some(NavigationItem {
        label: item.label.clone(),
        href: item.href.clone(),
        location: item.location,
        icon: item.icon.clone(),
        children: filtered_children,
        order: item.order,
        required_roles: item.required_roles.clone(),
    })
}
