//! Loading shared by the commands: plugin registry, config discovery and
//! error reporting.

use crate::commands::ConfigSources;
use crate::{ExitCode, OutputFormat};
use anyhow::{Context, Result};
use colored::Colorize;
use flatconf_config::{find_config, load_config, ConfigError, ConfigSet, Plugin, PluginRegistry};
use flatconf_plugins::{builtin_registry, load_manifest};
use std::path::{Path, PathBuf};

/// A validated configuration and the registry it was checked against.
pub struct CommandContext {
    pub config_path: PathBuf,
    pub config: ConfigSet,
    pub registry: PluginRegistry,
}

impl CommandContext {
    /// Find (or take) the config file, load it and build the config set.
    #[tracing::instrument(skip_all)]
    pub fn load(sources: &ConfigSources) -> Result<Self> {
        let registry = load_registry(&sources.plugin_manifests)?;
        let config_path = locate_config(sources.config.as_deref())?;

        let config = load_config(&config_path)
            .and_then(|loaded| loaded.build(&registry))
            .with_context(|| format!("Failed to load {}", config_path.display()))?;

        tracing::debug!(
            path = %config_path.display(),
            blocks = config.len(),
            "configuration ready"
        );
        Ok(Self {
            config_path,
            config,
            registry,
        })
    }
}

/// Built-in plugins plus every manifest given on the command line.
pub fn load_registry(manifests: &[PathBuf]) -> Result<PluginRegistry> {
    let mut registry = builtin_registry();
    for path in manifests {
        let plugin = load_manifest(path)
            .with_context(|| format!("Failed to load plugin manifest {}", path.display()))?;
        tracing::debug!(id = plugin.id(), "registered manifest plugin");
        registry.register(plugin);
    }
    Ok(registry)
}

/// The explicit `--config` path, or the nearest config file above the
/// current directory. Returned absolute so file paths can be made relative
/// to its directory.
fn locate_config(explicit: Option<&Path>) -> Result<PathBuf> {
    let path = if let Some(path) = explicit {
        path.to_path_buf()
    } else {
        let cwd = std::env::current_dir().map_err(ConfigError::Io)?;
        find_config(&cwd)?.with_context(|| {
            format!(
                "No flatconf config file found in {} or any parent directory",
                cwd.display()
            )
        })?
    };

    std::fs::canonicalize(&path)
        .map_err(ConfigError::Io)
        .with_context(|| format!("Cannot read config file {}", path.display()))
}

/// Exit code for an error raised while running a command.
pub fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    err.downcast_ref::<ConfigError>()
        .map_or(ExitCode::ConfigError, ExitCode::from)
}

/// Report `err` on stderr and exit with the matching code.
pub fn fail(err: &anyhow::Error, format: OutputFormat) -> ! {
    match format {
        OutputFormat::Human => eprintln!("{} {err:#}", "✗".red().bold()),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": format!("{err:#}") }));
        }
    }
    let code = exit_code_for(err);
    tracing::debug!(%code, "command failed");
    code.exit()
}
