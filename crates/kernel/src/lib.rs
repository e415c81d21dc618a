//! Atrium Kernel Library
//!
//! Composes independently authored dashboard modules into one application:
//! the module registry, the route and navigation composers, and the
//! role-based navigation filter. The `atrium` binary wraps these for
//! inspection and scaffolding.

pub mod access;
pub mod config;
pub mod module;
pub mod navigation;
pub mod route;
pub mod state;

pub use access::ViewerRoles;
pub use config::Config;
pub use state::AppState;
