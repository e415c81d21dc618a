//! Route composition for the application router.
//!
//! Module routes are collected from the registry and provide:
//! - The global route table, paths prefixed with each module's base path
//! - Public/authenticated partitions for the router's guards
//! - Path matching with `:param` extraction

mod composer;
mod table;

pub use composer::{ComposedRoute, RouteComposer, compose_routes};
pub use table::{RouteMatch, RoutePattern, RouteTable};
