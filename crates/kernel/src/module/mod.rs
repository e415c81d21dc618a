//! Module system for Atrium.
//!
//! This module handles:
//! - Parsing module declarations from `.module.toml` manifests
//! - Discovering module units through pluggable sources
//! - Caching the loaded module set with a time-to-live
//! - Validating and scaffolding modules

mod clock;
pub mod cli;
mod error;
pub mod manifest;
mod registry;
pub mod scaffold;
mod source;
mod validate;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::ModuleError;
pub use registry::{CacheState, DEFAULT_TTL, ModuleRegistry, ModuleSnapshot, RegistryOptions};
pub use source::{DirectorySource, FnSource, ModuleSource, StaticSource};
pub use validate::{ValidationMode, validate_modules};
