//! Plugin handles and the registry a config set is validated against.

use crate::block::RawConfigBlock;
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Catalog entry for one rule a plugin provides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleMeta {
    pub name: String,
    pub description: String,
    /// Enabled by the plugin's recommended preset.
    pub recommended: bool,
}

impl RuleMeta {
    pub fn new(name: impl Into<String>, description: impl Into<String>, recommended: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            recommended,
        }
    }
}

/// A bundle of rules, parsers, processors and preset blocks.
///
/// Rule implementations live in the external linting engine; a plugin here
/// only describes what it provides so configurations can be checked.
pub trait Plugin: Send + Sync {
    /// Package id, e.g. `eslint-plugin-svelte`.
    fn id(&self) -> &str;

    fn rules(&self) -> &[RuleMeta];

    fn has_rule(&self, name: &str) -> bool {
        self.rules().iter().any(|rule| rule.name == name)
    }

    /// Parser ids shipped with the plugin.
    fn parsers(&self) -> &[String] {
        &[]
    }

    /// Processor names, referenced from blocks as `<short name>/<processor>`.
    fn processors(&self) -> &[String] {
        &[]
    }

    fn preset_names(&self) -> Vec<&str> {
        Vec::new()
    }

    /// Blocks spliced in place of a preset reference.
    fn preset(&self, _name: &str) -> Option<Vec<RawConfigBlock>> {
        None
    }
}

/// Shared reference to a registered plugin. Two handles are equal when they
/// refer to the same plugin id.
#[derive(Clone)]
pub struct PluginHandle(Arc<dyn Plugin>);

impl PluginHandle {
    pub fn new(plugin: impl Plugin + 'static) -> Self {
        Self(Arc::new(plugin))
    }
}

impl Deref for PluginHandle {
    type Target = dyn Plugin;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl fmt::Debug for PluginHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PluginHandle").field(&self.id()).finish()
    }
}

impl PartialEq for PluginHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for PluginHandle {}

impl Serialize for PluginHandle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}

/// Every plugin and parser known to a run.
#[derive(Debug, Clone, Default)]
pub struct PluginRegistry {
    plugins: BTreeMap<String, PluginHandle>,
    parsers: BTreeSet<String>,
    core: Option<PluginHandle>,
}

impl PluginRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin and its parsers. A plugin with the same id replaces
    /// the earlier registration.
    pub fn register(&mut self, plugin: impl Into<PluginHandle>) -> PluginHandle {
        let handle = plugin.into();
        for parser in handle.parsers() {
            self.parsers.insert(parser.clone());
        }
        if self
            .plugins
            .insert(handle.id().to_string(), handle.clone())
            .is_some()
        {
            tracing::debug!(plugin = handle.id(), "replaced plugin registration");
        }
        handle
    }

    /// Register the plugin whose rules are available without a prefix.
    pub fn register_core(&mut self, plugin: impl Into<PluginHandle>) -> PluginHandle {
        let handle = self.register(plugin);
        self.core = Some(handle.clone());
        handle
    }

    /// Register a parser that does not ship with any plugin.
    pub fn register_parser(&mut self, id: impl Into<String>) {
        self.parsers.insert(id.into());
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&PluginHandle> {
        self.plugins.get(id)
    }

    #[must_use]
    pub fn has_parser(&self, id: &str) -> bool {
        self.parsers.contains(id)
    }

    #[must_use]
    pub const fn core(&self) -> Option<&PluginHandle> {
        self.core.as_ref()
    }

    pub fn plugins(&self) -> impl Iterator<Item = &PluginHandle> {
        self.plugins.values()
    }

    pub fn parsers(&self) -> impl Iterator<Item = &str> {
        self.parsers.iter().map(String::as_str)
    }
}

impl<P: Plugin + 'static> From<P> for PluginHandle {
    fn from(plugin: P) -> Self {
        Self::new(plugin)
    }
}

/// Closest rule name for a did-you-mean hint.
pub(crate) fn suggest_rule(plugin: &dyn Plugin, name: &str) -> Option<String> {
    plugin
        .rules()
        .iter()
        .map(|rule| (strsim::levenshtein(&rule.name, name), &rule.name))
        .filter(|(distance, _)| *distance <= 3)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, rule)| rule.clone())
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Small in-memory plugin for unit tests.
    pub struct FakePlugin {
        pub id: &'static str,
        pub rules: Vec<RuleMeta>,
        pub parsers: Vec<String>,
        pub processors: Vec<String>,
        pub presets: Vec<(&'static str, Vec<RawConfigBlock>)>,
    }

    impl FakePlugin {
        pub fn new(id: &'static str, rules: &[&str]) -> Self {
            Self {
                id,
                rules: rules.iter().map(|r| RuleMeta::new(*r, "", false)).collect(),
                parsers: Vec::new(),
                processors: Vec::new(),
                presets: Vec::new(),
            }
        }

        pub fn with_parser(mut self, parser: &str) -> Self {
            self.parsers.push(parser.to_string());
            self
        }

        pub fn with_processor(mut self, processor: &str) -> Self {
            self.processors.push(processor.to_string());
            self
        }

        pub fn with_preset(mut self, name: &'static str, blocks: Vec<RawConfigBlock>) -> Self {
            self.presets.push((name, blocks));
            self
        }
    }

    impl Plugin for FakePlugin {
        fn id(&self) -> &str {
            self.id
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
            self.presets.iter().map(|(name, _)| *name).collect()
        }

        fn preset(&self, name: &str) -> Option<Vec<RawConfigBlock>> {
            self.presets
                .iter()
                .find(|(preset, _)| *preset == name)
                .map(|(_, blocks)| blocks.clone())
        }
    }

    /// Registry with a core plugin, a TypeScript-like and a Svelte-like plugin.
    pub fn registry() -> PluginRegistry {
        let mut registry = PluginRegistry::new();
        registry.register_core(
            FakePlugin::new("core", &["no-console", "no-debugger", "eqeqeq", "no-undef"])
                .with_parser("espree"),
        );
        registry.register(
            FakePlugin::new("ts-plugin", &["no-unused-vars", "no-explicit-any"])
                .with_parser("ts-parser"),
        );
        registry.register(
            FakePlugin::new("svelte-plugin", &["valid-compile", "no-at-html-tags"])
                .with_parser("svelte-parser")
                .with_processor("svelte")
                .with_preset(
                    "recommended",
                    vec![
                        RawConfigBlock::new().plugin("svelte", "svelte-plugin"),
                        RawConfigBlock::new()
                            .files(["**/*.svelte"])
                            .parser("svelte-parser")
                            .rule("svelte/valid-compile", flatconf_types::RuleSeverity::Error),
                    ],
                ),
        );
        registry
    }
}
