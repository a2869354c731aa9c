pub mod check;
pub mod common;
pub mod resolve;
pub mod rules;

use std::path::PathBuf;

/// Where the configuration and extra plugins come from, shared by every
/// command.
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    pub config: Option<PathBuf>,
    pub plugin_manifests: Vec<PathBuf>,
}
