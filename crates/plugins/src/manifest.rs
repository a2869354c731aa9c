//! Plugins described by a manifest file instead of compiled in.
//!
//! ```yaml
//! id: eslint-plugin-local
//! parsers: [local-parser]
//! processors: [markdown]
//! rules:
//!   - no-todo
//!   - name: max-depth
//!     description: Limit nesting
//!     recommended: true
//! presets:
//!   recommended:
//!     - plugins: { local: eslint-plugin-local }
//!       rules: { local/max-depth: error }
//! ```

use flatconf_config::{ConfigError, Plugin, RawConfigBlock, Result, RuleMeta};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ManifestRule {
    Name(String),
    Detailed {
        name: String,
        #[serde(default)]
        description: String,
        #[serde(default)]
        recommended: bool,
    },
}

impl From<ManifestRule> for RuleMeta {
    fn from(rule: ManifestRule) -> Self {
        match rule {
            ManifestRule::Name(name) => Self::new(name, "", false),
            ManifestRule::Detailed {
                name,
                description,
                recommended,
            } => Self::new(name, description, recommended),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Manifest {
    id: String,
    #[serde(default)]
    rules: Vec<ManifestRule>,
    #[serde(default)]
    parsers: Vec<String>,
    #[serde(default)]
    processors: Vec<String>,
    #[serde(default)]
    presets: BTreeMap<String, Vec<RawConfigBlock>>,
}

/// A plugin loaded from a manifest.
#[derive(Debug, Clone)]
pub struct ManifestPlugin {
    id: String,
    rules: Vec<RuleMeta>,
    parsers: Vec<String>,
    processors: Vec<String>,
    presets: BTreeMap<String, Vec<RawConfigBlock>>,
}

impl Plugin for ManifestPlugin {
    fn id(&self) -> &str {
        &self.id
    }

    fn rules(&self) -> &[RuleMeta] {
        &self.rules
    }

    fn parsers(&self) -> &[String] {
        &self.parsers
    }

    fn processors(&self) -> &[String] {
        &self.processors
    }

    fn preset_names(&self) -> Vec<&str> {
        self.presets.keys().map(String::as_str).collect()
    }

    fn preset(&self, name: &str) -> Option<Vec<RawConfigBlock>> {
        self.presets.get(name).cloned()
    }
}

/// Load a plugin manifest. YAML and JSON are detected by extension.
#[tracing::instrument(fields(path = %path.display()))]
pub fn load_manifest(path: &Path) -> Result<ManifestPlugin> {
    let contents = fs::read_to_string(path)?;
    let plugin = parse_manifest(&contents, path)?;
    tracing::debug!(
        id = %plugin.id,
        rules = plugin.rules.len(),
        presets = plugin.presets.len(),
        "Loaded plugin manifest"
    );
    Ok(plugin)
}

/// Parse a manifest; the path is used for format detection and errors.
pub fn parse_manifest(contents: &str, path: &Path) -> Result<ManifestPlugin> {
    let invalid = |message: String| ConfigError::Invalid {
        path: path.to_path_buf(),
        message,
    };

    let manifest: Manifest = match path.extension().and_then(|ext| ext.to_str()) {
        Some("yml" | "yaml") => serde_yaml::from_str(contents)
            .map_err(|e| invalid(format!("YAML parse error: {e}")))?,
        Some("json") => serde_json::from_str(contents)
            .map_err(|e| invalid(format!("JSON parse error: {e}")))?,
        _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    };

    if manifest.id.trim().is_empty() {
        return Err(invalid("plugin id must not be empty".to_string()));
    }

    Ok(ManifestPlugin {
        id: manifest.id,
        rules: manifest.rules.into_iter().map(RuleMeta::from).collect(),
        parsers: manifest.parsers,
        processors: manifest.processors,
        presets: manifest.presets,
    })
}
