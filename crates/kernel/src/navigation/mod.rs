//! Navigation composition and role-based filtering.
//!
//! Modules contribute navigation forests; the kernel concatenates them, groups
//! them by placement location and prunes them per viewer.

mod composer;
mod filter;

pub use composer::{NavigationComposer, compose_navigation, items_at};
pub use filter::filter_navigation;
