//! Built-in plugin catalog for flatconf.
//!
//! Plugins here only describe what they provide (rule names, parsers,
//! processors and preset blocks); rule implementations live in the linting
//! engine that consumes the resolved configuration.

mod catalog;
pub mod javascript;
mod manifest;
mod registry;
pub mod svelte;
pub mod typescript;

pub use catalog::BuiltinPlugin;
pub use manifest::{load_manifest, parse_manifest, ManifestPlugin};
pub use registry::{builtin_plugins, builtin_registry};
