//! Atrium Module SDK
//!
//! The contract every Atrium module fulfils: a [`ModuleDeclaration`] naming the
//! routes it mounts and the navigation entries it contributes. Module crates
//! depend on this crate and build their declaration with the builder APIs.

pub mod navigation;
pub mod types;

pub use navigation::{Icon, NavLocation, NavigationItem, ParseNameError, RoleType};
pub use types::{ModuleDeclaration, RenderTarget, RouteDeclaration};

pub mod prelude {
    pub use crate::navigation::*;
    pub use crate::types::*;
}
