//! Shared plumbing for the built-in plugins.

use flatconf_config::{Plugin, RawConfigBlock, RuleMeta};

/// `(name, description, recommended)`
pub(crate) type RuleRow = (&'static str, &'static str, bool);

/// Builds the preset blocks of a built-in plugin.
pub(crate) type PresetFn = fn(&BuiltinPlugin) -> Vec<RawConfigBlock>;

/// A plugin whose catalog is compiled into the binary.
pub struct BuiltinPlugin {
    id: &'static str,
    rules: Vec<RuleMeta>,
    parsers: Vec<String>,
    processors: Vec<String>,
    presets: &'static [(&'static str, PresetFn)],
}

impl BuiltinPlugin {
    pub(crate) fn new(
        id: &'static str,
        rules: &[RuleRow],
        parsers: &[&str],
        processors: &[&str],
        presets: &'static [(&'static str, PresetFn)],
    ) -> Self {
        Self {
            id,
            rules: rules
                .iter()
                .map(|(name, description, recommended)| {
                    RuleMeta::new(*name, *description, *recommended)
                })
                .collect(),
            parsers: parsers.iter().map(ToString::to_string).collect(),
            processors: processors.iter().map(ToString::to_string).collect(),
            presets,
        }
    }

    /// Names of the rules flagged as recommended.
    pub(crate) fn recommended_rules(&self) -> impl Iterator<Item = &str> {
        self.rules
            .iter()
            .filter(|rule| rule.recommended)
            .map(|rule| rule.name.as_str())
    }
}

impl Plugin for BuiltinPlugin {
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
            .map(|(_, build)| build(self))
    }
}
