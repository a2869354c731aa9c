use crate::block::RawConfigEntry;
use crate::config_set::ConfigSet;
use crate::plugin::PluginRegistry;
use crate::{ConfigError, Result};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Config file names to search for, in order of preference
const CONFIG_FILES: &[&str] = &[
    "flatconf.config.yaml",
    "flatconf.config.yml",
    "flatconf.config.json",
    "flatconf.config.toml",
    ".flatconfrc.yaml",
    ".flatconfrc.yml",
    ".flatconfrc.json",
    ".flatconfrc",
];

/// Entries read from a config file, not yet validated.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig {
    pub path: PathBuf,
    pub entries: Vec<RawConfigEntry>,
}

impl LoadedConfig {
    /// Directory containing the config file; patterns are relative to it.
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }

    /// Build and validate the config set, anchored at the config directory.
    pub fn build(self, registry: &PluginRegistry) -> Result<ConfigSet> {
        let base_dir = self.base_dir().to_path_buf();
        ConfigSet::build(self.entries, registry).map(|set| set.with_base_dir(base_dir))
    }
}

/// Find a flatconf config file by walking up the directory tree from the given start directory.
/// Returns the path to the config file if found.
#[tracing::instrument(fields(start = %start_dir.display()))]
pub fn find_config(start_dir: &Path) -> Result<Option<PathBuf>> {
    let mut current_dir = start_dir.to_path_buf();
    let mut checked_dirs = 0;

    loop {
        tracing::trace!(dir = %current_dir.display(), "Checking directory for config files");
        for file_name in CONFIG_FILES {
            let config_path = current_dir.join(file_name);
            if config_path.is_file() {
                tracing::info!(path = %config_path.display(), checked_dirs, "Found config file");
                return Ok(Some(config_path));
            }
        }

        checked_dirs += 1;
        if !current_dir.pop() {
            tracing::debug!(checked_dirs, "No config file found");
            break;
        }
    }

    Ok(None)
}

/// Load config entries from the specified path.
/// Automatically detects the format based on file extension.
#[tracing::instrument(fields(path = %path.display()))]
pub fn load_config(path: &Path) -> Result<LoadedConfig> {
    tracing::debug!("Reading config file");
    let contents = fs::read_to_string(path)?;
    let entries = load_config_from_str(&contents, path)?;
    tracing::info!(entries = entries.len(), "Config loaded successfully");
    Ok(LoadedConfig {
        path: path.to_path_buf(),
        entries,
    })
}

/// Parse config entries from a string.
/// The path is used for error messages and format detection.
#[tracing::instrument(skip(contents), fields(path = %path.display(), size = contents.len()))]
pub fn load_config_from_str(contents: &str, path: &Path) -> Result<Vec<RawConfigEntry>> {
    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("");

    tracing::debug!(extension, file_name, "Detecting config format");

    let root = match extension {
        "yml" | "yaml" => {
            tracing::trace!("Parsing as YAML");
            parse_yaml(contents, path)?
        }
        "json" => {
            tracing::trace!("Parsing as JSON");
            parse_json(contents, path)?
        }
        "toml" => {
            tracing::trace!("Parsing as TOML");
            parse_toml(contents, path)?
        }
        "" if file_name == ".flatconfrc" => {
            // .flatconfrc without extension - try YAML first, then JSON
            tracing::trace!("Trying YAML then JSON for .flatconfrc");
            parse_yaml(contents, path).or_else(|_| parse_json(contents, path))?
        }
        _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    };

    entries_from_value(root, path)
}

/// Parse YAML configuration
fn parse_yaml(contents: &str, path: &Path) -> Result<Value> {
    serde_yaml::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("YAML parse error: {e}"),
    })
}

/// Parse JSON configuration
fn parse_json(contents: &str, path: &Path) -> Result<Value> {
    serde_json::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("JSON parse error: {e}"),
    })
}

/// Parse TOML configuration
fn parse_toml(contents: &str, path: &Path) -> Result<Value> {
    toml::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("TOML parse error: {e}"),
    })
}

/// The root is either the entry list itself or `{ config: [...] }`.
fn entries_from_value(root: Value, path: &Path) -> Result<Vec<RawConfigEntry>> {
    let invalid = |message: String| ConfigError::Invalid {
        path: path.to_path_buf(),
        message,
    };

    let items = match root {
        Value::Array(items) => items,
        Value::Object(mut object) => match object.remove("config") {
            Some(Value::Array(items)) if object.is_empty() => items,
            Some(Value::Array(_)) => {
                let extra: Vec<_> = object.keys().cloned().collect();
                return Err(invalid(format!(
                    "unexpected top-level keys next to `config`: {}",
                    extra.join(", ")
                )));
            }
            Some(_) => return Err(invalid("`config` must be a list of entries".to_string())),
            None => {
                return Err(invalid(
                    "expected a list of entries or a `config` list".to_string(),
                ))
            }
        },
        Value::Null => Vec::new(),
        _ => {
            return Err(invalid(
                "expected a list of entries or a `config` list".to_string(),
            ))
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item).map_err(|e| invalid(format!("entry {index}: {e}")))
        })
        .collect()
}
